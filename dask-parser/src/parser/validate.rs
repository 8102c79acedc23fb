//! Validation of `name=expression` binding lines, as typed at the prompt or read from a file.
//!
//! These checks run on the raw text before any tree is built. They catch the mistakes users
//! commonly make (a missing `=`, a name with digits in it, a negative literal) and report them
//! with a span into the original line, so the tree builder only ever sees plausible input.

use super::error::{kind, Error};
use std::ops::Range;

/// A syntactically valid binding line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<'line> {
    /// The variable name, left of the `=`.
    pub name: &'line str,

    /// The expression source, right of the `=`, trimmed of surrounding whitespace.
    pub source: &'line str,

    /// The region of the line that `source` occupies.
    pub span: Range<usize>,
}

/// Returns true if the character may appear in an expression.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | ' ' | '\t' | '(' | ')' | '+' | '-' | '*' | '/')
}

/// Returns true if the character is one of the operator characters.
fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

/// Trims the given slice of `line`, starting at byte `offset`, returning the trimmed slice and
/// its span in `line`.
fn trim_at(raw: &str, offset: usize) -> (&str, Range<usize>) {
    let start = offset + (raw.len() - raw.trim_start().len());
    let trimmed = raw.trim();
    (trimmed, start..start + trimmed.len())
}

/// Splits the line into its name and expression, and validates both.
pub fn parse_binding(line: &str) -> Result<Binding<'_>, Error> {
    let Some(eq) = line.find('=') else {
        return Err(Error::new(vec![0..line.len()], kind::MissingAssignment));
    };

    let (name, name_span) = trim_at(&line[..eq], 0);
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        let span = if name.is_empty() { eq..eq + 1 } else { name_span };
        return Err(Error::new(vec![span], kind::InvalidName { name: name.to_string() }));
    }

    let (source, span) = trim_at(&line[eq + 1..], eq + 1);
    validate_source(source, span.start)?;

    Ok(Binding { name, source, span })
}

/// Validates the characters and parenthesis balance of an expression. Reported spans are
/// shifted by `offset`.
pub fn validate_source(source: &str, offset: usize) -> Result<(), Error> {
    let mut open = Vec::new();
    let mut prev: Option<char> = None;
    for (i, c) in source.char_indices() {
        let span = offset + i..offset + i + c.len_utf8();
        if !is_allowed(c) {
            return Err(Error::new(vec![span], kind::DisallowedCharacter { character: c }));
        }

        match c {
            '-' => {
                let starts_operand = prev.map_or(true, |p| p == '(' || is_operator_char(p));
                let next = source[i + 1..].trim_start().chars().next();
                if starts_operand && next.is_some_and(|n| n.is_ascii_digit() || n == '.') {
                    return Err(Error::new(vec![span], kind::NegativeLiteral));
                }
            },
            '(' => open.push(span.clone()),
            ')' => {
                if open.pop().is_none() {
                    return Err(Error::new(vec![span], kind::UnbalancedParentheses { opening: false }));
                }
            },
            _ => (),
        }

        if !c.is_whitespace() {
            prev = Some(c);
        }
    }

    match open.pop() {
        Some(span) => Err(Error::new(vec![span], kind::UnbalancedParentheses { opening: true })),
        None => Ok(()),
    }
}
