//! Message template parser using winnow.

use std::fmt;
use std::str::FromStr;

use winnow::ascii::{digit1, space0};
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::take_while;

use super::calculate_position;
use super::error::ParseError;

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// A positional argument: `{0}` is the display name, `{1}` the parameter.
    Placeholder(usize),
}

/// A parsed message template.
///
/// Parsing happens once, when the template is registered; rendering only
/// walks the segments.
///
/// ```
/// use fieldcheck::MessageTemplate;
///
/// let template: MessageTemplate = "{0} must be at least {1} characters".parse().unwrap();
/// assert_eq!(template.render(&["Name", "10"]), "Name must be at least 10 characters");
/// assert_eq!(template.max_placeholder(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse_template(source)
    }

    /// The template text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder indices in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(index) => Some(*index),
            Segment::Literal(_) => None,
        })
    }

    /// The highest placeholder index, or `None` for a template without any.
    pub fn max_placeholder(&self) -> Option<usize> {
        self.placeholders().max()
    }

    /// Substitute `args` into the placeholders.
    ///
    /// A placeholder with no matching argument is written back as `{n}`.
    pub fn render(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(index) => match args.get(*index) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('{');
                        out.push_str(&index.to_string());
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

impl FromStr for MessageTemplate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_template(s)
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse a template string.
pub fn parse_template(input: &str) -> Result<MessageTemplate, ParseError> {
    let mut remaining = input;
    let segments = match repeat(0.., segment).parse_next(&mut remaining) {
        Ok(segments) => merge_literals(segments),
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            return Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            });
        }
    };

    if remaining.is_empty() {
        return Ok(MessageTemplate {
            source: input.to_string(),
            segments,
        });
    }

    let (line, column) = calculate_position(input, remaining);
    let message = if remaining.starts_with('{') {
        "invalid placeholder, expected `{n}` or `{{` for a literal brace".to_string()
    } else if remaining.starts_with('}') {
        "unmatched `}`, use `}}` for a literal brace".to_string()
    } else {
        format!(
            "unexpected character: '{}'",
            remaining.chars().next().unwrap_or('?')
        )
    };
    Err(ParseError::Syntax {
        line,
        column,
        message,
    })
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escape_sequence, placeholder, literal)).parse_next(input)
}

/// Parse escape sequences: {{ -> {, }} -> }
fn escape_sequence(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "{{".value(Segment::Literal("{".to_string())),
        "}}".value(Segment::Literal("}".to_string())),
    ))
    .parse_next(input)
}

/// Parse `{n}`, allowing spaces inside the braces.
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(
        ('{', space0),
        digit1.try_map(str::parse::<usize>),
        (space0, '}'),
    )
    .map(Segment::Placeholder)
    .parse_next(input)
}

fn literal(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '{' && c != '}')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other @ Segment::Placeholder(_) => result.push(other),
        }
    }
    result
}
