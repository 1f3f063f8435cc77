use std::sync::Arc;

use crate::value::Map;
use crate::{Context, Function, Node, Result, Value};

/// A named section of a template which child templates may override.
///
/// While rendering, the variable `block` is bound to a map holding the
/// block's `name` and a `super` function that renders the definition this
/// one overrides. `super` renders nothing when there is no such definition.
#[derive(Debug)]
pub struct BlockNode {
    name: String,
    contents: Vec<Node>,
}

impl BlockNode {
    pub fn new(name: impl Into<String>, contents: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[Node] {
        &self.contents
    }

    /// Render the most specific definition of this block.
    pub fn render(self: &Arc<Self>, ctx: &mut Context<'_>) -> Result<Value> {
        ctx.push(Map::new());
        let result = self.render_operative(ctx);
        ctx.pop()?;
        result.map(Value::List)
    }

    fn render_operative(self: &Arc<Self>, ctx: &mut Context<'_>) -> Result<Vec<Value>> {
        let popped = match ctx.render_context_mut().blocks_mut() {
            Some(blocks) => blocks.pop(&self.name),
            None => {
                ctx.set("block", self.binding());
                return ctx.render(&self.contents);
            }
        };

        let operative = match &popped {
            Some(block) => {
                tracing::trace!(name = %self.name, "rendering block override");
                Arc::clone(block)
            }
            None => Arc::clone(self),
        };
        ctx.set("block", operative.binding());
        let result = ctx.render(&operative.contents);

        if let Some(block) = popped {
            if let Some(blocks) = ctx.render_context_mut().blocks_mut() {
                blocks.push(&self.name, block);
            }
        }
        result
    }

    /// The value bound to `block` while this definition renders.
    fn binding(self: &Arc<Self>) -> Value {
        let this = Arc::clone(self);
        let parent = Function::new(move |ctx, _| {
            let queued = ctx
                .render_context()
                .blocks()
                .map_or(false, |blocks| blocks.get_block(&this.name).is_some());
            match queued {
                true => this.render(ctx),
                false => Ok(Value::List(Vec::new())),
            }
        });
        Value::from([
            ("name", Value::from(self.name.as_str())),
            ("super", Value::Function(parent)),
        ])
    }
}
