//! The node types that make up a template's contents.

mod block;
mod cond;
mod cycle;
mod doctype;
mod element;
mod include;
mod loops;
mod text;

use std::fmt;
use std::sync::Arc;

pub use crate::node::block::BlockNode;
pub use crate::node::cond::IfNode;
pub use crate::node::cycle::CycleNode;
pub use crate::node::doctype::DoctypeNode;
pub use crate::node::element::ElementNode;
pub use crate::node::include::{IncludeNode, IncludeTarget};
pub use crate::node::loops::ForNode;
pub use crate::node::text::{Segment, TextNode};
use crate::render::flatten;
use crate::{compile, Context, Result, Value, Variable};

type RenderFnInner = dyn Fn(&mut Context<'_>) -> Result<Value> + Send + Sync + 'static;

/// A host supplied callback that renders in place of a node.
#[derive(Clone)]
pub struct RenderFn(Arc<RenderFnInner>);

impl RenderFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, ctx: &mut Context<'_>) -> Result<Value> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFn").finish_non_exhaustive()
    }
}

/// An item in a content list.
///
/// Nodes are not [`Clone`], every [`CycleNode`] must keep a distinct id.
#[derive(Debug)]
pub enum Node {
    /// A value rendered as it is.
    Literal(Value),
    Text(TextNode),
    /// A variable resolved at render time.
    Var(Variable),
    Element(ElementNode),
    For(ForNode),
    If(IfNode),
    Block(Arc<BlockNode>),
    Include(IncludeNode),
    Cycle(CycleNode),
    Doctype(DoctypeNode),
    /// Contents rendered by a [`ForNode`] when the list is empty.
    ///
    /// Only meaningful as the last item of a `for` body, elsewhere it renders
    /// nothing.
    Empty(Vec<Node>),
    /// Contents rendered by an [`IfNode`] when the test fails.
    ///
    /// Only meaningful as the last item of an `if` body, elsewhere it renders
    /// nothing.
    Else(Vec<Node>),
    Func(RenderFn),
}

impl Node {
    /// Render the node.
    ///
    /// The result may be a [`Value::List`] of items that still needs
    /// flattening.
    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        match self {
            Node::Literal(value) => Ok(value.clone()),
            Node::Text(node) => node.render(ctx),
            Node::Var(var) => var.resolve(ctx),
            Node::Element(node) => node.render(ctx),
            Node::For(node) => node.render(ctx),
            Node::If(node) => node.render(ctx),
            Node::Block(node) => node.render(ctx),
            Node::Include(node) => node.render(ctx),
            Node::Cycle(node) => node.render(ctx),
            Node::Doctype(node) => node.render(ctx),
            Node::Empty(_) | Node::Else(_) => Ok(Value::List(Vec::new())),
            Node::Func(f) => f.call(ctx),
        }
    }

    /// Render the node into a single value, joining interpolated text into
    /// one string.
    pub(crate) fn render_value(&self, ctx: &mut Context<'_>) -> Result<Value> {
        match self {
            Node::Text(node) => match node.render(ctx)? {
                Value::List(items) => Ok(Value::from(Value::List(flatten(items)).to_text()?)),
                value => Ok(value),
            },
            node => node.render(ctx),
        }
    }

    /// Visit every block declared in this node, including blocks nested in
    /// other blocks.
    pub(crate) fn visit_blocks<'a>(
        &'a self,
        f: &mut dyn FnMut(&'a Arc<BlockNode>) -> Result<()>,
    ) -> Result<()> {
        let children: &[Node] = match self {
            Node::Block(block) => {
                f(block)?;
                block.contents()
            }
            Node::Element(node) => node.contents(),
            Node::For(node) => {
                visit_blocks(node.contents(), f)?;
                node.empty()
            }
            Node::If(node) => {
                visit_blocks(node.contents(), f)?;
                node.else_contents()
            }
            Node::Empty(contents) | Node::Else(contents) => contents,
            _ => return Ok(()),
        };
        visit_blocks(children, f)
    }
}

pub(crate) fn visit_blocks<'a>(
    nodes: &'a [Node],
    f: &mut dyn FnMut(&'a Arc<BlockNode>) -> Result<()>,
) -> Result<()> {
    for node in nodes {
        node.visit_blocks(f)?;
    }
    Ok(())
}

/// Remove a trailing [`Node::Else`] from `contents`, returning its contents.
pub(crate) fn split_else(contents: &mut Vec<Node>) -> Vec<Node> {
    match contents.last() {
        Some(Node::Else(_)) => match contents.pop() {
            Some(Node::Else(inner)) => inner,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Remove a trailing [`Node::Empty`] from `contents`, returning its contents.
pub(crate) fn split_empty(contents: &mut Vec<Node>) -> Vec<Node> {
    match contents.last() {
        Some(Node::Empty(_)) => match contents.pop() {
            Some(Node::Empty(inner)) => inner,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        match compile::has_interpolation(s) {
            true => Node::Text(TextNode::new(s)),
            false => Node::Literal(Value::from(s)),
        }
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        match compile::has_interpolation(&s) {
            true => Node::Text(TextNode::new(&s)),
            false => Node::Literal(Value::String(s)),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Literal(value)
    }
}

impl From<Variable> for Node {
    fn from(var: Variable) -> Self {
        Node::Var(var)
    }
}

macro_rules! impl_from_node {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$variant(node)
                }
            }
        )+
    };
}

impl_from_node! {
    TextNode => Text,
    ElementNode => Element,
    ForNode => For,
    IfNode => If,
    IncludeNode => Include,
    CycleNode => Cycle,
    DoctypeNode => Doctype,
    RenderFn => Func,
}

impl From<BlockNode> for Node {
    fn from(node: BlockNode) -> Self {
        Node::Block(Arc::new(node))
    }
}

impl From<Arc<BlockNode>> for Node {
    fn from(node: Arc<BlockNode>) -> Self {
        Node::Block(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_from_str() {
        assert!(matches!(Node::from("plain"), Node::Literal(Value::String(_))));
        assert!(matches!(Node::from("{{ x }}"), Node::Text(_)));
        assert!(matches!(Node::from(String::from("a {{ x }}")), Node::Text(_)));
    }

    #[test]
    fn node_split_trailing() {
        let mut contents = vec![Node::from("a"), Node::Else(vec![Node::from("b")])];
        let inner = split_else(&mut contents);
        assert_eq!(contents.len(), 1);
        assert_eq!(inner.len(), 1);

        let mut contents = vec![Node::Empty(vec![]), Node::from("a")];
        assert!(split_empty(&mut contents).is_empty());
        assert_eq!(contents.len(), 2);
    }
}
