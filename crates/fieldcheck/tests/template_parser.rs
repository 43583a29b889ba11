//! Integration tests for message template parsing and rendering.

use fieldcheck::parser::{Segment, parse_template};
use fieldcheck::{MessageTemplate, ParseError};

// =========================================================================
// Segments
// =========================================================================

#[test]
fn test_parse_literal_only() {
    let template = parse_template("Hello, world!").unwrap();
    assert_eq!(
        template.segments(),
        &[Segment::Literal("Hello, world!".to_string())]
    );
    assert_eq!(template.max_placeholder(), None);
}

#[test]
fn test_parse_placeholders_in_order() {
    let template = parse_template("{1} before {0}").unwrap();
    assert_eq!(
        template.segments(),
        &[
            Segment::Placeholder(1),
            Segment::Literal(" before ".to_string()),
            Segment::Placeholder(0),
        ]
    );
    assert_eq!(template.placeholders().collect::<Vec<_>>(), [1, 0]);
}

#[test]
fn test_placeholder_allows_inner_spaces() {
    let template = parse_template("{ 0 } is required").unwrap();
    assert_eq!(template.render(&["Name"]), "Name is required");
}

#[test]
fn test_escapes_merge_into_literals() {
    let template = parse_template("{{literal}} {0}").unwrap();
    assert_eq!(
        template.segments(),
        &[
            Segment::Literal("{literal} ".to_string()),
            Segment::Placeholder(0),
        ]
    );
}

#[test]
fn test_empty_template() {
    let template = parse_template("").unwrap();
    assert!(template.segments().is_empty());
    assert_eq!(template.render(&["unused"]), "");
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn test_render_repeated_placeholder() {
    let template: MessageTemplate = "{0}, {0}!".parse().unwrap();
    assert_eq!(template.render(&["Hey"]), "Hey, Hey!");
}

#[test]
fn test_render_multibyte_text() {
    let template: MessageTemplate = "{0}は{1}の書式と一致しません".parse().unwrap();
    assert_eq!(
        template.render(&["生年月日", "YYYY-MM-DD"]),
        "生年月日はYYYY-MM-DDの書式と一致しません"
    );
}

#[test]
fn test_display_shows_source() {
    let template: MessageTemplate = "{{{0}}}".parse().unwrap();
    assert_eq!(template.to_string(), "{{{0}}}");
    assert_eq!(template.render(&["x"]), "{x}");
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_named_placeholder_is_rejected() {
    let err = parse_template("{name} is required").unwrap_err();
    assert_eq!(
        err,
        ParseError::Syntax {
            line: 1,
            column: 1,
            message: "invalid placeholder, expected `{n}` or `{{` for a literal brace".to_string(),
        }
    );
}

#[test]
fn test_unclosed_placeholder_is_rejected() {
    let err = parse_template("{0} and {1").unwrap_err();
    assert_eq!(err.position(), (1, 9));
}

#[test]
fn test_stray_closing_brace_is_rejected() {
    let err = parse_template("名字} here").unwrap_err();
    assert_eq!(err.position(), (1, 3));
    assert_eq!(err.message(), "unmatched `}`, use `}}` for a literal brace");
}
