use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Context, Node, Result, Value};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Produces the next of its values each time it is rendered, wrapping around
/// at the end.
///
/// The position is kept in the [`RenderContext`][crate::RenderContext] under
/// an id unique to each constructed node, so two cycles over the same values
/// advance independently.
#[derive(Debug)]
pub struct CycleNode {
    id: usize,
    values: Vec<Node>,
    name: Option<String>,
    silent: bool,
}

impl CycleNode {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Node>,
    {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            values: values.into_iter().map(Into::into).collect(),
            name: None,
            silent: false,
        }
    }

    /// Also bind the current value to a variable.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Advance without producing any output.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        if self.values.is_empty() {
            return Ok(Value::List(Vec::new()));
        }
        let index = ctx.render_context().cycle(self.id) % self.values.len();
        let value = self.values[index].render(ctx)?;
        let next = (index + 1) % self.values.len();
        tracing::trace!(id = self.id, index, next, "advancing cycle");
        ctx.render_context_mut().set_cycle(self.id, next);

        if let Some(name) = &self.name {
            ctx.set(name.as_str(), value.clone());
        }
        match self.silent {
            true => Ok(Value::List(Vec::new())),
            false => Ok(value),
        }
    }
}
