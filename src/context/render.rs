use std::collections::HashMap;
use std::mem;

use crate::context::BlockContext;
use crate::{Error, Result};

/// Engine internal state for one template render.
///
/// Unlike [`Context`][crate::Context] lookups never fall through to lower
/// frames: only the top frame is visible. Each call to
/// [`Template::render`][crate::Template::render] pushes a frame, so included
/// templates start with their own block context and cycle counters.
#[derive(Debug, Default)]
pub struct RenderContext {
    top: RenderFrame,
    saved: Vec<RenderFrame>,
}

#[derive(Debug, Default)]
struct RenderFrame {
    blocks: Option<BlockContext>,
    cycles: HashMap<usize, usize>,
}

impl RenderContext {
    /// Construct a render context with a single empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh frame.
    pub fn push(&mut self) {
        let frame = mem::take(&mut self.top);
        self.saved.push(frame);
    }

    /// Discard the top frame.
    pub fn pop(&mut self) -> Result<()> {
        self.top = self.saved.pop().ok_or_else(Error::context_pop)?;
        Ok(())
    }

    /// Returns whether a block context is installed in the top frame.
    pub fn has_blocks(&self) -> bool {
        self.top.blocks.is_some()
    }

    /// Returns the block context of the top frame.
    pub fn blocks(&self) -> Option<&BlockContext> {
        self.top.blocks.as_ref()
    }

    /// Returns the block context of the top frame.
    pub fn blocks_mut(&mut self) -> Option<&mut BlockContext> {
        self.top.blocks.as_mut()
    }

    /// Install a block context in the top frame.
    pub fn set_blocks(&mut self, blocks: BlockContext) {
        self.top.blocks = Some(blocks);
    }

    pub(crate) fn blocks_or_default(&mut self) -> &mut BlockContext {
        self.top.blocks.get_or_insert_with(BlockContext::new)
    }

    /// Returns the next index of the cycle with the given id.
    pub fn cycle(&self, id: usize) -> usize {
        self.top.cycles.get(&id).copied().unwrap_or(0)
    }

    /// Store the next index of the cycle with the given id.
    pub fn set_cycle(&mut self, id: usize, index: usize) {
        self.top.cycles.insert(id, index);
    }
}
