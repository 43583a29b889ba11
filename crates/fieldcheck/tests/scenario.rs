//! End-to-end tests: derive, validate and render in one locale.

use fieldcheck::{DisplayNames, Localizer, Translator, Validate, Validator};
use insta::assert_snapshot;

#[derive(Validate)]
struct User {
    #[validate("required", rename = "FamilyName")]
    family_name: String,
    #[validate("min=10", rename = "FirstName")]
    first_name: String,
    #[validate("iscolor", rename = "Color")]
    color: String,
    #[validate("datetime=2006-01-02", rename = "Birthdate")]
    birthdate: Option<String>,
}

impl User {
    fn sample() -> Self {
        Self {
            family_name: String::new(),
            first_name: "John".to_string(),
            color: "red".to_string(),
            birthdate: Some("1990-04-01".to_string()),
        }
    }
}

fn japanese_names() -> DisplayNames {
    DisplayNames::load_str(
        r#"
FamilyName = "名字";
FirstName = "名前";
Color = "色";
Birthdate = "生年月日";
"#,
    )
    .unwrap()
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_derived_declarations() {
    assert_eq!(
        User::DECLARATIONS,
        &[
            ("FamilyName", "required"),
            ("FirstName", "min=10"),
            ("Color", "iscolor"),
            ("Birthdate", "datetime=2006-01-02"),
        ]
    );
}

#[test]
fn test_sample_user_violations() {
    let violations = Validator::new().validate_declared(&User::sample()).unwrap();

    let pairs: Vec<_> = violations.iter().map(|v| (v.field(), v.rule())).collect();
    assert_eq!(pairs, [("FamilyName", "required"), ("FirstName", "min")]);
    assert_eq!(violations.for_field("Color").count(), 0);
}

#[test]
fn test_missing_optional_field_fails_datetime() {
    let user = User {
        birthdate: None,
        ..User::sample()
    };
    let violations = Validator::new().validate_declared(&user).unwrap();
    assert_eq!(violations.for_field("Birthdate").count(), 1);
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn test_japanese_messages_use_display_names() {
    let localizer = Localizer::builder()
        .translator(Translator::builder("ja").unwrap().build())
        .names(japanese_names())
        .build();

    let messages = localizer.validate_declared(&User::sample()).unwrap();
    assert_snapshot!(messages.join("\n"), @r"
    名字は必須フィールドです
    名前の長さは少なくとも10文字でなければなりません
    ");
}

#[test]
fn test_overridden_required_message() {
    let translator = Translator::builder("ja")
        .unwrap()
        .add("required", "{0}を入力してください", true)
        .unwrap()
        .build();
    let localizer = Localizer::builder()
        .translator(translator)
        .names(japanese_names())
        .build();

    let messages = localizer.validate_declared(&User::sample()).unwrap();
    assert_snapshot!(messages.join("\n"), @r"
    名字を入力してください
    名前の長さは少なくとも10文字でなければなりません
    ");
}

#[test]
fn test_impossible_date_renders_display_pattern() {
    let translator = Translator::builder("ja")
        .unwrap()
        .register_rule("datetime", "{0} は {1} の形式ではありません", None)
        .unwrap()
        .build();
    let localizer = Localizer::builder()
        .translator(translator)
        .names(japanese_names())
        .build();

    let user = User {
        family_name: "山田".to_string(),
        first_name: "Tarou Yamada".to_string(),
        birthdate: Some("2023-02-30".to_string()),
        ..User::sample()
    };
    let messages = localizer.validate_declared(&user).unwrap();
    assert_snapshot!(messages.join("\n"), @"生年月日 は YYYY-MM-DD の形式ではありません");
}

#[test]
fn test_english_fallback_without_display_names() {
    let localizer = Localizer::builder()
        .translator(Translator::builder("en-US").unwrap().build())
        .build();

    let user = User {
        color: "foo".to_string(),
        ..User::sample()
    };
    let messages = localizer.validate_declared(&user).unwrap();
    assert_snapshot!(messages.join("\n"), @r"
    FamilyName is a required field
    FirstName must be at least 10 characters in length
    Color must be a valid color
    ");
}

#[test]
fn test_violations_serialize_for_reports() {
    let violations = Validator::new().validate_declared(&User::sample()).unwrap();
    let json = serde_json::to_string_pretty(&violations).unwrap();
    assert_snapshot!(json, @r#"
    [
      {
        "field": "FamilyName",
        "rule": "required",
        "param": null,
        "value": ""
      },
      {
        "field": "FirstName",
        "rule": "min",
        "param": "10",
        "value": "John"
      }
    ]
    "#);
}
