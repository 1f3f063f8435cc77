//! Evaluation of conditional expressions.
//!
//! Operators follow the loose semantics scripting languages use for truth
//! tests: `&&` and `||` return one of their operands, `==` converts between
//! numbers, strings and booleans before comparing, and relational operators
//! compare strings lexicographically and everything else numerically.

use std::cmp::Ordering;

use crate::types::expr::{BinaryOp, Expr, UnaryOp};
use crate::{Context, ErrorKind, Result, Value};

/// Evaluate the expression against the context.
///
/// Variables that cannot be resolved evaluate to [`Value::None`] instead of
/// failing the render.
pub(crate) fn evaluate(ctx: &mut Context<'_>, expr: &Expr) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),

        Expr::Var(var) => match var.resolve(ctx) {
            Err(err) if err.kind() == ErrorKind::VariableNotFound => Ok(Value::None),
            result => result,
        },

        Expr::Unary(op, operand) => {
            let truthy = evaluate(ctx, operand)?.is_truthy();
            Ok(Value::Bool(match op {
                UnaryOp::Not => !truthy,
                UnaryOp::NotNot => truthy,
            }))
        }

        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            let lhs = evaluate(ctx, lhs)?;
            match lhs.is_truthy() {
                true => evaluate(ctx, rhs),
                false => Ok(lhs),
            }
        }

        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            let lhs = evaluate(ctx, lhs)?;
            match lhs.is_truthy() {
                true => Ok(lhs),
                false => evaluate(ctx, rhs),
            }
        }

        Expr::Binary(op, lhs, rhs) => {
            let lhs = evaluate(ctx, lhs)?;
            let rhs = evaluate(ctx, rhs)?;
            Ok(Value::Bool(compare(*op, &lhs, &rhs)))
        }
    }
}

/// Compare two values with a comparison operator.
pub(crate) fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> bool {
    match op {
        BinaryOp::Eq => loose_eq(lhs, rhs),
        BinaryOp::Ne => !loose_eq(lhs, rhs),
        BinaryOp::StrictEq => strict_eq(lhs, rhs),
        BinaryOp::StrictNe => !strict_eq(lhs, rhs),
        BinaryOp::Lt => relational(lhs, rhs).map_or(false, Ordering::is_lt),
        BinaryOp::Le => relational(lhs, rhs).map_or(false, Ordering::is_le),
        BinaryOp::Gt => relational(lhs, rhs).map_or(false, Ordering::is_gt),
        BinaryOp::Ge => relational(lhs, rhs).map_or(false, Ordering::is_ge),
        BinaryOp::And | BinaryOp::Or => unreachable!("logical operators are short circuited"),
    }
}

fn is_object(v: &Value) -> bool {
    matches!(
        v,
        Value::List(_) | Value::Map(_) | Value::Function(_) | Value::Markup(_)
    )
}

fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::None, Value::None) => true,
        (Value::None, _) | (_, Value::None) => false,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (a, b) if is_object(a) && is_object(b) => a == b,
        (Value::Function(_), _) | (_, Value::Function(_)) => false,
        (a, b) if is_object(a) => loose_eq(&to_primitive(a), b),
        (a, b) if is_object(b) => loose_eq(a, &to_primitive(b)),
        (a, b) => to_number(a) == to_number(b),
    }
}

fn strict_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            to_number(lhs) == to_number(rhs)
        }
        (a, b) => a == b,
    }
}

/// Returns the ordering of the two values, or `None` if they are not
/// comparable, e.g. when either side is not a number.
fn relational(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    let lhs = to_primitive(lhs);
    let rhs = to_primitive(rhs);
    match (&lhs, &rhs) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (a, b) => to_number(a).partial_cmp(&to_number(b)),
    }
}

/// Reduce lists, maps and markup to a string, leaving other values alone.
fn to_primitive(v: &Value) -> Value {
    match v {
        Value::List(list) => {
            let parts: Vec<String> = list
                .iter()
                .map(|item| match item {
                    Value::None => String::new(),
                    item => match to_primitive(item) {
                        Value::String(s) => s,
                        other => other.to_text().unwrap_or_default(),
                    },
                })
                .collect();
            Value::String(parts.join(","))
        }
        Value::Map(_) => Value::from("[object Object]"),
        Value::Markup(markup) => Value::String(markup.to_string()),
        v => v.clone(),
    }
}

/// Convert a value to a number, `NaN` if it has no numeric meaning.
fn to_number(v: &Value) -> f64 {
    match v {
        Value::None => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        Value::String(s) => str_to_number(s),
        Value::Function(_) => f64::NAN,
        v => to_number(&to_primitive(v)),
    }
}

fn str_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    let (sign, digits) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if digits == "Infinity" {
        return sign * f64::INFINITY;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    // Rust accepts spellings like `inf` and `nan` that are not numbers here.
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}
