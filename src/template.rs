use std::collections::BTreeMap;
use std::sync::Arc;

use crate::node::{visit_blocks, BlockNode};
use crate::render::flatten;
use crate::{Context, Error, Node, Result, Value};

/// A named template, optionally extending a parent template.
///
/// The root of an inheritance chain renders its contents. Every other
/// template only contributes its blocks, which override the blocks of the
/// same name in its ancestors.
#[derive(Debug)]
pub struct Template {
    name: String,
    parent: Option<String>,
    contents: Vec<Node>,
    blocks: BTreeMap<String, Arc<BlockNode>>,
}

impl Template {
    /// Construct a new template.
    ///
    /// Fails if two blocks anywhere in the contents share a name.
    pub fn new(name: impl Into<String>, contents: Vec<Node>) -> Result<Self> {
        let mut blocks = BTreeMap::new();
        visit_blocks(&contents, &mut |block| {
            match blocks.insert(block.name().to_owned(), Arc::clone(block)) {
                Some(_) => Err(Error::syntax(format!(
                    "Block with name '{}' appears more than once.",
                    block.name()
                ))),
                None => Ok(()),
            }
        })?;
        Ok(Self {
            name: name.into(),
            parent: None,
            contents,
            blocks,
        })
    }

    /// Construct a template that extends `parent`.
    pub fn extends(
        name: impl Into<String>,
        parent: impl Into<String>,
        contents: Vec<Node>,
    ) -> Result<Self> {
        let mut template = Self::new(name, contents)?;
        template.parent = Some(parent.into());
        Ok(template)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn contents(&self) -> &[Node] {
        &self.contents
    }

    /// The blocks declared in this template, by name.
    pub fn blocks(&self) -> &BTreeMap<String, Arc<BlockNode>> {
        &self.blocks
    }

    /// Render the template in a fresh render context frame.
    ///
    /// Parents are looked up in the context's engine. The frame is popped
    /// whether rendering succeeds or fails.
    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        tracing::debug!(template = %self.name, "rendering template");
        ctx.render_context_mut().push();
        let result = self.render_chain(ctx);
        ctx.render_context_mut().pop()?;
        result
    }

    /// Register the blocks of each template up the inheritance chain and
    /// render the root.
    fn render_chain(&self, ctx: &mut Context<'_>) -> Result<Value> {
        let engine = ctx.engine();
        let mut visited: Vec<&str> = Vec::new();
        let mut template = self;
        loop {
            if visited.contains(&template.name()) {
                return Err(Error::cyclic(format!(
                    "template `{}` extends itself through `{}`",
                    template.name,
                    visited.join("` -> `")
                ))
                .with_template_name(&self.name));
            }
            visited.push(template.name());

            ctx.render_context_mut()
                .blocks_or_default()
                .add_blocks(&template.blocks);

            let parent = match &template.parent {
                Some(parent) => parent,
                None => break,
            };
            tracing::debug!(template = %template.name, parent = %parent, "delegating to parent");
            template = engine
                .lookup(parent)
                .map_err(|err| err.with_template_name(&template.name))?;
        }

        ctx.render(&template.contents)
            .and_then(|items| engine.mode().fragment(flatten(items)))
            .map_err(|err| err.with_template_name(&template.name))
    }
}
