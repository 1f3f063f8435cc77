//! Render elements to an inspectable tree.

use std::fmt;

use crate::mode::html::{escape_into, is_void};
use crate::mode::Mode;
use crate::value::Map;
use crate::{Markup, Result, Value};

/// The tree mode.
///
/// Elements render to [`Element`]s and templates to [`Fragment`]s, both
/// wrapped in [`Markup`]. Fragments are inlined into the element or
/// fragment they are added to. Displaying a node produces the same HTML as
/// the [`Html`][crate::mode::html::Html] mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tree;

/// A child of an element or fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Element(Element),
    /// Text, escaped when displayed.
    Text(String),
    /// Markup displayed as it is.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Map<String, String>,
    children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    children: Vec<TreeNode>,
}

impl Element {
    /// The lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Map<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }
}

impl Fragment {
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }
}

/// Convert rendered values into tree nodes, inlining fragments.
fn to_nodes(values: Vec<Value>) -> Result<Vec<TreeNode>> {
    let mut nodes = Vec::new();
    for value in values {
        push_value(&mut nodes, value)?;
    }
    Ok(nodes)
}

fn push_value(nodes: &mut Vec<TreeNode>, value: Value) -> Result<()> {
    match value {
        Value::None => {}
        Value::Markup(markup) => match markup.downcast_ref::<Fragment>() {
            Some(fragment) => nodes.extend(fragment.children.iter().cloned()),
            None => nodes.push(from_markup(&markup)),
        },
        Value::List(items) => {
            for item in items {
                push_value(nodes, item)?;
            }
        }
        value => nodes.push(TreeNode::Text(value.to_text()?)),
    }
    Ok(())
}

fn from_markup(markup: &Markup) -> TreeNode {
    if let Some(node) = markup.downcast_ref::<TreeNode>() {
        node.clone()
    } else if let Some(element) = markup.downcast_ref::<Element>() {
        TreeNode::Element(element.clone())
    } else {
        TreeNode::Raw(markup.to_string())
    }
}

impl Mode for Tree {
    fn create_element(
        &self,
        tag: &str,
        attributes: Map<String, Value>,
        children: Vec<Value>,
    ) -> Result<Value> {
        let attributes: Map<String, String> = attributes
            .into_iter()
            .map(|(name, value)| Ok((name.to_lowercase(), value.to_text()?)))
            .collect::<Result<_>>()?;
        let mut children = to_nodes(children)?;
        let tag = tag.to_lowercase();
        if is_void(&tag) {
            children.clear();
        }
        Ok(Value::Markup(Markup::new(Element {
            tag,
            attributes,
            children,
        })))
    }

    fn fragment(&self, children: Vec<Value>) -> Result<Value> {
        let children = to_nodes(children)?;
        Ok(Value::Markup(Markup::new(Fragment { children })))
    }

    fn markup(&self, raw: &str) -> Result<Value> {
        Ok(Value::Markup(Markup::new(TreeNode::Raw(raw.to_owned()))))
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::Element(element) => fmt::Display::fmt(element, f),
            TreeNode::Text(text) => {
                let mut buf = String::with_capacity(text.len());
                escape_into(&mut buf, text);
                f.write_str(&buf)
            }
            TreeNode::Raw(raw) => f.write_str(raw),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        buf.push('<');
        escape_into(&mut buf, &self.tag);
        for (name, value) in &self.attributes {
            buf.push(' ');
            escape_into(&mut buf, name);
            buf.push_str("=\"");
            escape_into(&mut buf, value);
            buf.push('"');
        }
        buf.push('>');
        f.write_str(&buf)?;
        if is_void(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        Ok(())
    }
}
