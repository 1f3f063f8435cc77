//! The AST of a compiled conditional expression.

use crate::{Value, Variable};

/// A conditional expression, e.g. `user.age >= 18 && !user.banned`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A number or string literal.
    Literal(Value),
    /// A variable path, resolved leniently.
    Var(Variable),
    /// A prefix operation, e.g. `!x`.
    Unary(UnaryOp, Box<Expr>),
    /// A binary operation, e.g. `x == y`.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `!!`
    NotNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    StrictEq,
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
}

impl BinaryOp {
    /// Binding power, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::Ne | Self::StrictEq | Self::StrictNe => 3,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 4,
        }
    }
}
