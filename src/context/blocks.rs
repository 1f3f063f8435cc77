use std::collections::BTreeMap;
use std::sync::Arc;

use crate::node::BlockNode;

/// Block definitions collected across one inheritance chain.
///
/// Each block name maps to a queue of definitions. Templates register their
/// blocks child first, and each new level is inserted at the front of the
/// queue, so once the root template is reached the most specific override is
/// at the back, where [`pop`][BlockContext::pop] takes it from.
#[derive(Debug, Default, Clone)]
pub struct BlockContext {
    blocks: BTreeMap<String, Vec<Arc<BlockNode>>>,
}

impl BlockContext {
    /// Construct an empty block context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the blocks of one template in the inheritance chain.
    pub fn add_blocks<'a, I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = (&'a String, &'a Arc<BlockNode>)>,
    {
        for (name, block) in blocks {
            self.blocks
                .entry(name.clone())
                .or_default()
                .insert(0, Arc::clone(block));
        }
    }

    /// Put a definition back on top of its queue.
    pub fn push(&mut self, name: &str, block: Arc<BlockNode>) {
        self.blocks.entry(name.to_owned()).or_default().push(block);
    }

    /// Take the most specific definition for `name`.
    ///
    /// Returns `None` when no definition is queued, in which case the block
    /// being rendered is its own definition.
    pub fn pop(&mut self, name: &str) -> Option<Arc<BlockNode>> {
        self.blocks.get_mut(name).and_then(Vec::pop)
    }

    /// Returns the most specific definition for `name` without removing it.
    pub fn get_block(&self, name: &str) -> Option<&Arc<BlockNode>> {
        self.blocks.get(name).and_then(|queue| queue.last())
    }
}
