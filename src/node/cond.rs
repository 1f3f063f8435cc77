use std::fmt;
use std::sync::Arc;

use crate::node::split_else;
use crate::render::evaluate;
use crate::types::expr::Expr;
use crate::{compile, Context, Node, Result, Value};

type TestFn = dyn Fn(&mut Context<'_>) -> Result<bool> + Send + Sync + 'static;

/// Renders its contents if a test passes, otherwise the contents of a
/// trailing [`Node::Else`].
#[derive(Debug)]
pub struct IfNode {
    test: Test,
    contents: Vec<Node>,
    else_contents: Vec<Node>,
}

enum Test {
    Expr(Expr),
    Fn(Arc<TestFn>),
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

impl IfNode {
    /// Construct a conditional from an expression like `a && b.c > 3`.
    ///
    /// Variables in the expression that cannot be resolved are treated as
    /// `None` rather than failing the render.
    pub fn new(expr: &str, contents: Vec<Node>) -> Result<Self> {
        let expr = compile::expr(expr)?;
        Ok(Self::with_test(Test::Expr(expr), contents))
    }

    /// Construct a conditional with a test function.
    pub fn with_fn<F>(f: F, contents: Vec<Node>) -> Self
    where
        F: Fn(&mut Context<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        Self::with_test(Test::Fn(Arc::new(f)), contents)
    }

    fn with_test(test: Test, mut contents: Vec<Node>) -> Self {
        let else_contents = split_else(&mut contents);
        Self {
            test,
            contents,
            else_contents,
        }
    }

    pub fn contents(&self) -> &[Node] {
        &self.contents
    }

    /// The contents rendered when the test fails.
    pub fn else_contents(&self) -> &[Node] {
        &self.else_contents
    }

    /// Evaluate the test against the context.
    pub fn test(&self, ctx: &mut Context<'_>) -> Result<bool> {
        match &self.test {
            Test::Expr(expr) => Ok(evaluate(ctx, expr)?.is_truthy()),
            Test::Fn(f) => f(ctx),
        }
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        let contents = match self.test(ctx)? {
            true => &self.contents,
            false => &self.else_contents,
        };
        ctx.render(contents).map(Value::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, Engine, ErrorKind};

    fn test(expr: &str, globals: Value) -> bool {
        let engine = Engine::new();
        let mut ctx = crate::Context::from_value(&engine, globals).unwrap();
        IfNode::new(expr, vec![]).unwrap().test(&mut ctx).unwrap()
    }

    #[test]
    fn if_loose_and_strict_equality() {
        assert!(test("c == d", value!({ c: 43, d: "43" })));
        assert!(!test("c === d", value!({ c: 43, d: "43" })));
        assert!(test("c !== d", value!({ c: 43, d: "43" })));
    }

    #[test]
    fn if_missing_variable_is_falsy() {
        assert!(!test("missing", value!({})));
        assert!(!test("missing.deeper", value!({})));
        assert!(test("!missing", value!({})));
        assert!(test("missing == none", value!({})));
    }

    #[test]
    fn if_logical_operators() {
        let globals = value!({ a: 1, b: 0, s: "x" });
        assert!(test("a && s", globals.clone()));
        assert!(!test("a && b", globals.clone()));
        assert!(test("b || s", globals.clone()));
        assert!(test("(b || a) && !!s", globals.clone()));
        assert!(test("a > b && s == 'x'", globals));
    }

    #[test]
    fn if_else_contents() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("flag", false);
        let node = IfNode::new(
            "flag",
            vec![Node::from("yes"), Node::Else(vec![Node::from("no")])],
        )
        .unwrap();
        assert_eq!(node.render(&mut ctx).unwrap(), value!(["no"]));
        ctx.set("flag", true);
        assert_eq!(node.render(&mut ctx).unwrap(), value!(["yes"]));
    }

    #[test]
    fn if_test_fn() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("n", 5);
        let node = IfNode::with_fn(
            |ctx| Ok(ctx.get("n") == Some(&Value::from(5))),
            vec![Node::from("five")],
        );
        assert_eq!(node.render(&mut ctx).unwrap(), value!(["five"]));
    }

    #[test]
    fn if_err_syntax() {
        let err = IfNode::new("a && (b", vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateSyntax);
    }
}
