//! Compile the string forms accepted by the authoring API.
//!
//! - Conditional expressions are tokenized by the lexer and turned into an
//!   [`Expr`] AST by the parser.
//! - `for` expressions and `{{ var }}` interpolations are simple enough to be
//!   split directly.

mod lex;
mod parse;

use crate::node::Segment;
use crate::types::expr::Expr;
use crate::{Error, Result, Variable};

/// Compile a conditional expression, e.g. `a.b > 3 && !c`.
pub fn expr(source: &str) -> Result<Expr> {
    parse::Parser::new(source).parse_expr()
}

/// Compile a `for` expression of the form `<var>[, <var>...] in <path>`.
///
/// Returns the loop variable names and the variable to iterate over.
pub fn for_expr(source: &str) -> Result<(Vec<String>, Variable)> {
    let err = || Error::syntax(format!("invalid for expression: `{}`", source));

    let (vars, path) = source.rsplit_once(" in ").ok_or_else(err)?;
    if path.is_empty() || !path.chars().all(is_path_char) {
        return Err(err());
    }
    let vars: Vec<String> = split_vars(vars).map(String::from).collect();
    if vars.iter().any(|var| var.is_empty() || var.contains(char::is_whitespace)) {
        return Err(err());
    }
    Ok((vars, Variable::new(path)))
}

/// Loop variables are separated by a comma and at most one space.
fn split_vars(vars: &str) -> impl Iterator<Item = &str> {
    vars.split(',')
        .enumerate()
        .map(|(i, var)| if i > 0 { var.strip_prefix(' ').unwrap_or(var) } else { var })
}

/// Returns whether the text contains at least one `{{ var }}` interpolation.
pub fn has_interpolation(text: &str) -> bool {
    find_interpolation(text, 0).is_some()
}

/// Split text into literal and variable segments.
///
/// Variable paths are trimmed, empty literal segments are dropped.
pub fn text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    while let Some((i, j, k)) = find_interpolation(text, cursor) {
        if cursor < i {
            segments.push(Segment::Text(text[cursor..i].to_owned()));
        }
        segments.push(Segment::Var(Variable::new(text[i + 2..j].trim())));
        cursor = k;
    }
    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_owned()));
    }
    segments
}

/// Finds the next `{{ ... }}` at or after `from`, returning the byte offsets of
/// the opening tag, the closing tag and the end of the closing tag. The
/// contents may not span lines.
fn find_interpolation(text: &str, from: usize) -> Option<(usize, usize, usize)> {
    let mut start = from;
    while let Some(offset) = text[start..].find("{{") {
        let i = start + offset;
        if let Some(len) = text[i + 2..].find("}}") {
            let j = i + 2 + len;
            if !text[i + 2..j].contains('\n') {
                return Some((i, j, j + 2));
            }
        }
        start = i + 1;
    }
    None
}

#[cfg(feature = "unicode")]
fn is_path_char(c: char) -> bool {
    c == '.' || unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_path_char(c: char) -> bool {
    c == '.' || c == '_' || c.is_ascii_alphanumeric()
}
