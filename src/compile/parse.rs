use crate::compile::lex::{Lexer, Token};
use crate::types::expr::{BinaryOp, Expr, UnaryOp};
use crate::types::span::Span;
use crate::{Error, Result, Value, Variable};

/// The maximum nesting of a conditional expression.
const MAX_DEPTH: usize = 128;

/// A parser that constructs an expression AST from a token stream.
///
/// Binary operators are parsed using precedence climbing, so `a || b && c`
/// groups as `a || (b && c)` and operators of equal precedence associate to
/// the left.
pub struct Parser<'source> {
    /// A lexer that tokenizes the expression source.
    tokens: Lexer<'source>,

    /// Remember a peeked value, even if it was `None`
    peeked: Option<Option<(Token, Span)>>,
}

/// An expression together with the depth of its tree.
struct Parsed {
    expr: Expr,
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Construct a new parser.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: Lexer::new(source),
            peeked: None,
        }
    }

    /// Parses a complete expression, failing on trailing tokens.
    pub fn parse_expr(mut self) -> Result<Expr> {
        let Parsed { expr, .. } = self.parse_binary(0, 0)?;
        match self.next()? {
            None => Ok(expr),
            Some((Token::CloseParen, span)) => Err(self.err(span, "unexpected `)`")),
            Some((tk, span)) => Err(self.err(span, format!("expected operator, found {}", tk.human()))),
        }
    }

    fn parse_binary(&mut self, min_prec: u8, depth: usize) -> Result<Parsed> {
        let mut lhs = self.parse_unary(depth)?;

        while let Some(op) = self.peek_binary_op()? {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let (_, span) = self.next_required()?;
            let rhs = self.parse_binary(prec + 1, depth)?;
            let depth = 1 + lhs.depth.max(rhs.depth);
            if depth > MAX_DEPTH {
                return Err(self.err(span, "expression nested too deeply"));
            }
            lhs = Parsed {
                expr: Expr::Binary(op, Box::new(lhs.expr), Box::new(rhs.expr)),
                depth,
            };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self, depth: usize) -> Result<Parsed> {
        let (tk, span) = self.next_required()?;
        if depth > MAX_DEPTH {
            return Err(self.err(span, "expression nested too deeply"));
        }

        match tk {
            Token::Not | Token::NotNot => {
                let op = match tk {
                    Token::Not => UnaryOp::Not,
                    _ => UnaryOp::NotNot,
                };
                let operand = self.parse_unary(depth + 1)?;
                Ok(Parsed {
                    expr: Expr::Unary(op, Box::new(operand.expr)),
                    depth: operand.depth + 1,
                })
            }

            Token::OpenParen => {
                let inner = self.parse_binary(0, depth + 1)?;
                match self.next()? {
                    Some((Token::CloseParen, _)) => Ok(Parsed {
                        expr: inner.expr,
                        depth: inner.depth + 1,
                    }),
                    Some((tk, sp)) => Err(self.err(sp, format!("expected `)`, found {}", tk.human()))),
                    None => Err(self.err(span, "unclosed parenthesis")),
                }
            }

            Token::String => {
                let raw = &self.source()[span];
                let value = Value::String(unescape(&raw[1..raw.len() - 1]));
                Ok(Parsed {
                    expr: Expr::Literal(value),
                    depth: 1,
                })
            }

            Token::Operand => {
                let raw = &self.source()[span];
                let expr = match parse_number(raw) {
                    Some(value) => Expr::Literal(value),
                    None => Expr::Var(Variable::new(raw)),
                };
                Ok(Parsed { expr, depth: 1 })
            }

            tk => Err(self.err(span, format!("expected expression, found {}", tk.human()))),
        }
    }

    fn peek_binary_op(&mut self) -> Result<Option<BinaryOp>> {
        let op = match self.peek()? {
            Some((tk, _)) => match tk {
                Token::Or => BinaryOp::Or,
                Token::And => BinaryOp::And,
                Token::Eq => BinaryOp::Eq,
                Token::Ne => BinaryOp::Ne,
                Token::StrictEq => BinaryOp::StrictEq,
                Token::StrictNe => BinaryOp::StrictNe,
                Token::Lt => BinaryOp::Lt,
                Token::Le => BinaryOp::Le,
                Token::Gt => BinaryOp::Gt,
                Token::Ge => BinaryOp::Ge,
                _ => return Ok(None),
            },
            None => return Ok(None),
        };
        Ok(Some(op))
    }

    fn source(&self) -> &'source str {
        self.tokens.source
    }

    /// Returns the next token and span, failing at the end of input.
    fn next_required(&mut self) -> Result<(Token, Span)> {
        match self.next()? {
            Some(next) => Ok(next),
            None => {
                let n = self.source().len();
                Err(self.err(n..n, "expected expression, found end of input"))
            }
        }
    }

    /// Returns the next token and span.
    fn next(&mut self) -> Result<Option<(Token, Span)>> {
        match self.peeked.take() {
            Some(next) => Ok(next),
            None => self.tokens.next(),
        }
    }

    /// Peeks the next token.
    fn peek(&mut self) -> Result<Option<&(Token, Span)>> {
        if self.peeked.is_none() {
            let next = self.tokens.next()?;
            self.peeked = Some(next);
        }
        Ok(self.peeked.as_ref().and_then(Option::as_ref))
    }

    fn err(&self, span: impl Into<Span>, msg: impl Into<String>) -> Error {
        if self.source().is_empty() {
            Error::syntax(msg)
        } else {
            Error::syntax_span(msg, self.source(), span)
        }
    }
}

/// Parse a number literal of the form `-?(\d+(\.\d+)?|\d*\.\d+)`.
fn parse_number(raw: &str) -> Option<Value> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let valid = match frac {
        None => !int.is_empty() && all_digits(int),
        Some(frac) => !frac.is_empty() && all_digits(frac) && all_digits(int),
    };
    if !valid {
        return None;
    }
    if frac.is_none() {
        if let Ok(i) = raw.parse::<i64>() {
            return Some(Value::Integer(i));
        }
    }
    raw.parse::<f64>().ok().map(Value::Float)
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(c) => out.push(c),
            None => out.push('\\'),
        }
    }
    out
}
