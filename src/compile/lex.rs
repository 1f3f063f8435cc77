use crate::types::span::Span;
use crate::{Error, Result};

/// A lexer that tokenizes a conditional expression.
///
/// Operands are everything between operators: a quoted string, or a run of
/// characters that is later classified as a number or a variable path.
///
/// The lexer is implemented as a fallible iterator. The parser should
/// repeatedly call the [`.next()?`][Lexer::next] method to return the next
/// non-whitespace token until [`None`] is returned.
pub struct Lexer<'source> {
    /// The original expression source.
    pub source: &'source str,

    /// A cursor over the expression source.
    cursor: usize,
}

/// The unit yielded by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `==`
    Eq,
    /// `===`
    StrictEq,
    /// `!=`
    Ne,
    /// `!==`
    StrictNe,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `!`
    Not,
    /// `!!`
    NotNot,
    /// A quoted string, e.g. `"hello"` or `'hello'`.
    String,
    /// An operand that is not a string: a number or a variable path.
    Operand,
    /// Sequence of whitespace characters.
    Whitespace,
}

impl<'source> Lexer<'source> {
    /// Construct a new lexer.
    pub fn new(source: &'source str) -> Self {
        Self { source, cursor: 0 }
    }

    /// Returns the next non-whitespace token and its span.
    pub fn next(&mut self) -> Result<Option<(Token, Span)>> {
        loop {
            match self.lex()? {
                Some((Token::Whitespace, _)) => continue,
                next => return Ok(next),
            }
        }
    }

    /// Returns the next token and span.
    fn lex(&mut self) -> Result<Option<(Token, Span)>> {
        let i = self.cursor;
        let rest = &self.source[i..];

        let c = match rest.chars().next() {
            Some(c) => c,
            None => return Ok(None),
        };

        let (tk, len) = match c {
            '(' => (Token::OpenParen, 1),
            ')' => (Token::CloseParen, 1),
            '&' if rest.starts_with("&&") => (Token::And, 2),
            '|' if rest.starts_with("||") => (Token::Or, 2),
            '=' if rest.starts_with("===") => (Token::StrictEq, 3),
            '=' if rest.starts_with("==") => (Token::Eq, 2),
            '!' if rest.starts_with("!==") => (Token::StrictNe, 3),
            '!' if rest.starts_with("!=") => (Token::Ne, 2),
            '!' if rest.starts_with("!!") => (Token::NotNot, 2),
            '!' => (Token::Not, 1),
            '<' if rest.starts_with("<=") => (Token::Le, 2),
            '<' => (Token::Lt, 1),
            '>' if rest.starts_with(">=") => (Token::Ge, 2),
            '>' => (Token::Gt, 1),
            '"' | '\'' => (Token::String, self.lex_string(c, i)?),
            c if c.is_whitespace() => (Token::Whitespace, len_while(rest, char::is_whitespace)),
            c if is_operand(c) => (Token::Operand, len_while(rest, is_operand)),
            c => {
                return Err(self.err_unexpected_character(i..i + c.len_utf8()));
            }
        };

        self.cursor = i + len;
        Ok(Some((tk, Span::from(i..i + len))))
    }

    /// Returns the length of the string literal starting at `i`, including
    /// both quotes.
    fn lex_string(&self, quote: char, i: usize) -> Result<usize> {
        let mut escaped = false;
        for (j, c) in self.source[i..].char_indices().skip(1) {
            match c {
                '\\' if !escaped => escaped = true,
                c if c == quote && !escaped => return Ok(j + 1),
                _ => escaped = false,
            }
        }
        Err(self.err_undelimited_string(i..self.source.len()))
    }

    fn err_unexpected_character(&self, span: impl Into<Span>) -> Error {
        Error::syntax_span("unexpected character", self.source, span)
    }

    fn err_undelimited_string(&self, span: impl Into<Span>) -> Error {
        Error::syntax_span("undelimited string", self.source, span)
    }
}

impl Token {
    pub fn human(&self) -> &'static str {
        match self {
            Self::OpenParen => "`(`",
            Self::CloseParen => "`)`",
            Self::And => "`&&`",
            Self::Or => "`||`",
            Self::Eq => "`==`",
            Self::StrictEq => "`===`",
            Self::Ne => "`!=`",
            Self::StrictNe => "`!==`",
            Self::Lt => "`<`",
            Self::Le => "`<=`",
            Self::Gt => "`>`",
            Self::Ge => "`>=`",
            Self::Not => "`!`",
            Self::NotNot => "`!!`",
            Self::String => "string",
            Self::Operand => "operand",
            Self::Whitespace => "whitespace",
        }
    }
}

fn len_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(j, _)| j)
        .unwrap_or(s.len())
}

fn is_operand(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '&' | '|' | '=' | '!' | '<' | '>' | '"' | '\'')
}
