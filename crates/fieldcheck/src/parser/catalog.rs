//! Catalog file (`.fcat`) parser.
//!
//! ```text
//! // Japanese overrides
//! required = "{0}を入力してください";
//! FamilyName = "名字";
//! ```
//!
//! Names are ASCII letters, digits, underscores and dots. Values are double-quoted
//! on one line; `\"`, `\\`, `\n` and `\t` are the only escapes.

use winnow::combinator::{alt, cut_err, delimited, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{none_of, take_while};

use super::calculate_position;
use super::error::ParseError;

/// One `name = "value";` entry with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub value: String,
    /// 1-based line of the entry name.
    pub line: usize,
    /// 1-based column of the entry name.
    pub column: usize,
    /// Byte offset of the entry name.
    pub offset: usize,
    /// Byte length of the whole entry, through the `;`.
    pub len: usize,
}

/// Parse an entire catalog file into entries, in file order.
///
/// Duplicate names are returned as written; callers decide whether a repeat
/// is an error.
pub fn parse_catalog(input: &str) -> Result<Vec<CatalogEntry>, ParseError> {
    let mut remaining = input;
    let mut entries = Vec::new();
    loop {
        if let Err(e) = skip_ws_and_comments(&mut remaining) {
            return Err(syntax_error(input, remaining, &e));
        }
        if remaining.is_empty() {
            return Ok(entries);
        }

        let offset = input.len() - remaining.len();
        let (line, column) = calculate_position(input, remaining);
        match entry(&mut remaining) {
            Ok((name, value)) => entries.push(CatalogEntry {
                name,
                value,
                line,
                column,
                offset,
                len: input.len() - remaining.len() - offset,
            }),
            Err(e) => return Err(syntax_error(input, remaining, &e)),
        }
    }
}

fn syntax_error(original: &str, remaining: &str, error: &ErrMode<ContextError>) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    if remaining.is_empty() {
        return ParseError::UnexpectedEof { line, column };
    }
    let context = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.to_string(),
        ErrMode::Incomplete(_) => String::new(),
    };
    let message = if context.is_empty() {
        format!(
            "unexpected character: '{}'",
            remaining.chars().next().unwrap_or('?')
        )
    } else {
        context
    };
    ParseError::Syntax {
        line,
        column,
        message,
    }
}

/// Skip whitespace and line comments.
fn skip_ws_and_comments(input: &mut &str) -> ModalResult<()> {
    let _: Vec<()> = repeat(0.., alt((ws_only.void(), line_comment.void()))).parse_next(input)?;
    Ok(())
}

fn ws_only<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., char::is_whitespace).parse_next(input)
}

/// Parse a line comment: // ... newline
fn line_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded("//", take_while(0.., |c| c != '\n')).parse_next(input)
}

/// Parse `name = "value";`.
fn entry(input: &mut &str) -> ModalResult<(String, String)> {
    let name = identifier
        .context(StrContext::Expected(StrContextValue::Description(
            "entry name",
        )))
        .parse_next(input)?;
    skip_ws_and_comments(input)?;
    cut_err('=')
        .context(StrContext::Expected(StrContextValue::CharLiteral('=')))
        .parse_next(input)?;
    skip_ws_and_comments(input)?;
    let value = cut_err(quoted)
        .context(StrContext::Expected(StrContextValue::Description(
            "double-quoted string",
        )))
        .parse_next(input)?;
    skip_ws_and_comments(input)?;
    cut_err(';')
        .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
        .parse_next(input)?;
    Ok((name, value))
}

fn identifier(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited('"', repeat(0.., string_char), '"').parse_next(input)
}

fn string_char(input: &mut &str) -> ModalResult<char> {
    alt((
        preceded(
            '\\',
            alt((
                '"'.value('"'),
                '\\'.value('\\'),
                'n'.value('\n'),
                't'.value('\t'),
            )),
        ),
        none_of(['"', '\\', '\n']),
    ))
    .parse_next(input)
}
