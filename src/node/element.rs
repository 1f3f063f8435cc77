use crate::render::flatten;
use crate::value::Map;
use crate::{Context, Node, Result, Value};

/// An element created through the engine's output [`Mode`][crate::Mode].
#[derive(Debug)]
pub struct ElementNode {
    tag: String,
    attributes: Map<String, Node>,
    dynamic: bool,
    contents: Vec<Node>,
}

impl ElementNode {
    /// Construct a new element.
    ///
    /// String attribute values containing `{{ var }}` interpolations become
    /// [`TextNode`][crate::TextNode]s and [`Variable`][crate::Variable]s are
    /// resolved when rendering.
    pub fn new<I, K, V>(tag: impl Into<String>, attributes: I, contents: Vec<Node>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Node>,
    {
        let attributes: Map<String, Node> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let dynamic = attributes
            .values()
            .any(|node| !matches!(node, Node::Literal(_)));
        Self {
            tag: tag.into(),
            attributes,
            dynamic,
            contents,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn contents(&self) -> &[Node] {
        &self.contents
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        let attributes = match self.dynamic {
            true => self.render_attributes(ctx)?,
            false => self
                .attributes
                .iter()
                .filter_map(|(name, node)| match node {
                    Node::Literal(value) => Some((name.clone(), value.clone())),
                    _ => None,
                })
                .collect(),
        };
        let children = flatten(ctx.render(&self.contents)?);
        ctx.engine()
            .mode()
            .create_element(&self.tag, attributes, children)
    }

    fn render_attributes(&self, ctx: &mut Context<'_>) -> Result<Map<String, Value>> {
        let mut attributes = Map::new();
        for (name, node) in &self.attributes {
            let value = match node {
                Node::Literal(value) => value.clone(),
                Node::Var(var) => var.resolve(ctx)?,
                node => match node.render(ctx)? {
                    Value::List(items) => Value::from(Value::List(flatten(items)).to_text()?),
                    value => value,
                },
            };
            attributes.insert(name.clone(), value);
        }
        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, Variable};

    #[test]
    fn element_dynamic_attributes() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("id", 42);
        ctx.set("cls", "big");
        let node = ElementNode::new(
            "p",
            [
                ("id", Node::from("item{{ id }}")),
                ("class", Node::from(Variable::new("cls"))),
                ("title", Node::from("static")),
            ],
            vec![Node::from("Content")],
        );
        let html = node.render(&mut ctx).unwrap().to_text().unwrap();
        assert_eq!(html, r#"<p class="big" id="item42" title="static">Content</p>"#);
    }

    #[test]
    fn element_static_attributes() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        let node = ElementNode::new("br", [("class", "x")], vec![]);
        assert!(!node.dynamic);
        let html = node.render(&mut ctx).unwrap().to_text().unwrap();
        assert_eq!(html, r#"<br class="x">"#);
    }
}
