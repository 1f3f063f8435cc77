//! Builder functions for authoring templates.
//!
//! Every function returns a [`Node`] ready to be placed in a content list,
//! strings convert to nodes with `.into()`, becoming a
//! [`TextNode`][crate::TextNode] when they contain `{{ var }}` interpolations.
//!
//! ```
//! use canopy::build::*;
//! use canopy::Engine;
//!
//! let mut engine = Engine::new();
//! engine.add_template(template("list", vec![
//!     el("ul", vec![
//!         for_("item in items", vec![
//!             el("li", vec!["{{ forloop.counter }}. {{ item }}".into()]),
//!             empty(vec![el("li", vec!["Nothing here".into()])]),
//!         ])?,
//!     ]),
//! ])?);
//!
//! let html = engine.template("list")?.render(canopy::value! { items: ["a", "b"] })?;
//! assert_eq!(html, "<ul><li>1. a</li><li>2. b</li></ul>");
//! # Ok::<(), canopy::Error>(())
//! ```

use crate::node::{
    BlockNode, CycleNode, DoctypeNode, ElementNode, ForNode, IfNode, IncludeNode, IncludeTarget,
    RenderFn, TextNode,
};
use crate::{Context, Node, Result, Template, Value, Variable};

/// A root template.
pub fn template(name: impl Into<String>, contents: Vec<Node>) -> Result<Template> {
    Template::new(name, contents)
}

/// A template extending `parent`.
pub fn extends(
    name: impl Into<String>,
    parent: impl Into<String>,
    contents: Vec<Node>,
) -> Result<Template> {
    Template::extends(name, parent, contents)
}

pub fn block(name: impl Into<String>, contents: Vec<Node>) -> Node {
    BlockNode::new(name, contents).into()
}

/// Include a template, sharing the current context.
pub fn include(target: impl Into<IncludeTarget>) -> Node {
    IncludeNode::new(target).into()
}

/// Include a template with extra context pushed on the current context.
pub fn include_with<I, K, V>(target: impl Into<IncludeTarget>, extra: I) -> Node
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Node>,
{
    IncludeNode::new(target).with(extra).into()
}

/// Include a template rendered with nothing but the extra context.
pub fn include_only<I, K, V>(target: impl Into<IncludeTarget>, extra: I) -> Node
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Node>,
{
    IncludeNode::new(target).with(extra).only().into()
}

/// A variable that calls functions on its path.
pub fn var(path: impl Into<String>) -> Node {
    Variable::new(path).into()
}

/// A variable that returns functions without calling them.
pub fn func(path: impl Into<String>) -> Node {
    Variable::uncalled(path).into()
}

pub fn text(text: &str) -> Node {
    TextNode::new(text).into()
}

/// A loop, e.g. `for_("item in items", ...)`.
pub fn for_(expr: &str, contents: Vec<Node>) -> Result<Node> {
    ForNode::new(expr, contents).map(Node::from)
}

/// A loop declared as a variable and a list path, e.g.
/// `for_in("key, value", "pairs", ...)`.
pub fn for_in(vars: &str, list: &str, contents: Vec<Node>) -> Result<Node> {
    ForNode::new(&format!("{} in {}", vars, list), contents).map(Node::from)
}

/// Contents for an empty loop, must be the last item of the loop body.
pub fn empty(contents: Vec<Node>) -> Node {
    Node::Empty(contents)
}

/// A conditional, e.g. `if_("user && user.active", ...)`.
pub fn if_(expr: &str, contents: Vec<Node>) -> Result<Node> {
    IfNode::new(expr, contents).map(Node::from)
}

pub fn if_fn<F>(test: F, contents: Vec<Node>) -> Node
where
    F: Fn(&mut Context<'_>) -> Result<bool> + Send + Sync + 'static,
{
    IfNode::with_fn(test, contents).into()
}

/// Contents for a failed test, must be the last item of the conditional body.
pub fn else_(contents: Vec<Node>) -> Node {
    Node::Else(contents)
}

pub fn cycle<I, V>(values: I) -> Node
where
    I: IntoIterator<Item = V>,
    V: Into<Node>,
{
    CycleNode::new(values).into()
}

/// A cycle that binds its current value to `name`, producing no output when
/// `silent` is set.
pub fn cycle_as<I, V>(values: I, name: impl Into<String>, silent: bool) -> Node
where
    I: IntoIterator<Item = V>,
    V: Into<Node>,
{
    let node = CycleNode::new(values).with_name(name);
    match silent {
        true => node.silent().into(),
        false => node.into(),
    }
}

/// An element without attributes.
pub fn el(tag: impl Into<String>, contents: Vec<Node>) -> Node {
    ElementNode::new(tag, Vec::<(String, Node)>::new(), contents).into()
}

/// An element with attributes.
pub fn el_with<I, K, V>(tag: impl Into<String>, attributes: I, contents: Vec<Node>) -> Node
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Node>,
{
    ElementNode::new(tag, attributes, contents).into()
}

pub fn doctype(version: u8) -> Node {
    DoctypeNode::new(version).into()
}

/// A node rendered by calling `f`.
pub fn render_fn<F>(f: F) -> Node
where
    F: Fn(&mut Context<'_>) -> Result<Value> + Send + Sync + 'static,
{
    RenderFn::new(f).into()
}
