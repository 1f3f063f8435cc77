//! Variable scopes and engine state threaded through a render.

mod blocks;
mod render;

use std::iter;

pub use crate::context::blocks::BlockContext;
pub use crate::context::render::RenderContext;
use crate::node::Node;
use crate::value::Map;
use crate::{Engine, Error, Result, Value};

/// A stack of variable frames plus the engine state for one render.
///
/// Lookups search the frames from the most recently pushed down to the
/// initial frame, and the first frame that *contains* the name wins, so a
/// variable explicitly set to [`Value::None`] still shadows lower frames.
/// Writes always go to the top frame.
///
/// # Examples
///
/// ```
/// use canopy::{Engine, Value};
///
/// let engine = Engine::new();
/// let mut ctx = engine.context();
/// ctx.set("name", "outer");
/// ctx.push(canopy::Map::new());
/// ctx.set("name", "inner");
/// assert_eq!(ctx.get("name"), Some(&Value::from("inner")));
/// ctx.pop()?;
/// assert_eq!(ctx.get("name"), Some(&Value::from("outer")));
/// # Ok::<(), canopy::Error>(())
/// ```
pub struct Context<'render> {
    engine: &'render Engine,
    globals: Map<String, Value>,
    stack: Vec<Map<String, Value>>,
    render: RenderContext,
    depth: usize,
}

impl<'render> Context<'render> {
    /// Construct a context with an empty initial frame.
    pub fn new(engine: &'render Engine) -> Self {
        Self::with_globals(engine, Map::new())
    }

    /// Construct a context using the given map as the initial frame.
    pub fn with_globals(engine: &'render Engine, globals: Map<String, Value>) -> Self {
        Self {
            engine,
            globals,
            stack: Vec::new(),
            render: RenderContext::new(),
            depth: 0,
        }
    }

    /// Construct a context from a value, which must be a map or `None`.
    pub fn from_value(engine: &'render Engine, value: impl Into<Value>) -> Result<Self> {
        match value.into() {
            Value::Map(globals) => Ok(Self::with_globals(engine, globals)),
            Value::None => Ok(Self::new(engine)),
            value => Err(Error::render(format!(
                "expected map for context, but found {}",
                value.human()
            ))),
        }
    }

    /// Construct a context from any serializable value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_serde<S>(engine: &'render Engine, s: S) -> Result<Self>
    where
        S: serde::Serialize,
    {
        Self::from_value(engine, crate::to_value(s)?)
    }

    /// A context for rendering an isolated template, sharing nothing with
    /// this one except the engine and the include depth.
    pub(crate) fn isolated(&self, globals: Map<String, Value>) -> Self {
        Self {
            depth: self.depth + 1,
            ..Self::with_globals(self.engine, globals)
        }
    }

    /// Returns the engine this context renders with.
    pub fn engine(&self) -> &'render Engine {
        self.engine
    }

    /// Returns the engine state for the current render.
    pub fn render_context(&self) -> &RenderContext {
        &self.render
    }

    /// Returns the engine state for the current render.
    pub fn render_context_mut(&mut self) -> &mut RenderContext {
        &mut self.render
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Push a new frame on top of the stack.
    pub fn push(&mut self, frame: Map<String, Value>) {
        self.stack.push(frame);
    }

    /// Remove and return the top frame.
    ///
    /// Fails with [`ErrorKind::ContextPop`][crate::ErrorKind::ContextPop]
    /// if only the initial frame is left.
    pub fn pop(&mut self) -> Result<Map<String, Value>> {
        self.stack.pop().ok_or_else(Error::context_pop)
    }

    fn top_mut(&mut self) -> &mut Map<String, Value> {
        match self.stack.last_mut() {
            Some(top) => top,
            None => &mut self.globals,
        }
    }

    fn frames(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.stack.iter().rev().chain(iter::once(&self.globals))
    }

    /// Set a variable in the top frame.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.top_mut().insert(name.into(), value.into());
    }

    /// Set pairs of names and values in the top frame, stopping at the end of
    /// the shorter list.
    pub fn zip<S: AsRef<str>>(&mut self, names: &[S], values: &[Value]) {
        let top = self.top_mut();
        for (name, value) in names.iter().zip(values) {
            top.insert(name.as_ref().to_owned(), value.clone());
        }
    }

    /// Lookup a variable, searching from the top frame down.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames().find_map(|frame| frame.get(name))
    }

    /// Lookup a variable, returning `default` if no frame contains it.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.get(name).unwrap_or(default)
    }

    /// Returns whether any frame contains the variable.
    pub fn has_key(&self, name: &str) -> bool {
        self.frames().any(|frame| frame.contains_key(name))
    }

    /// Render each node, collecting one item per node.
    ///
    /// Nested sequences returned by nodes are kept as they are, they are
    /// flattened where the items are handed to the output mode.
    pub fn render(&mut self, contents: &[Node]) -> Result<Vec<Value>> {
        crate::render::contents(self, contents)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("globals", &self.globals)
            .field("stack", &self.stack)
            .field("render", &self.render)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn context_get_missing() {
        let engine = Engine::new();
        let ctx = engine.context();
        assert_eq!(ctx.get("missing"), None);
        assert_eq!(ctx.get_or("missing", &Value::from(42)), &Value::from(42));
    }

    #[test]
    fn context_has_key_none_value() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("a", Value::None);
        assert!(ctx.has_key("a"));
        assert!(!ctx.has_key("b"));
        assert_eq!(ctx.get("a"), Some(&Value::None));
    }

    #[test]
    fn context_none_shadows_lower_frames() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("a", 1);
        ctx.push(Map::from([("a".to_owned(), Value::None)]));
        assert_eq!(ctx.get("a"), Some(&Value::None));
    }

    #[test]
    fn context_push_pop_restores() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("a", 1);
        for i in 0..3 {
            ctx.push(Map::new());
            ctx.set("a", i + 10);
        }
        assert_eq!(ctx.get("a"), Some(&Value::from(12)));
        for _ in 0..3 {
            ctx.pop().unwrap();
        }
        assert_eq!(ctx.get("a"), Some(&Value::from(1)));
        let err = ctx.pop().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContextPop);
        assert_eq!(err.to_string(), "pop() was called more times than push()");
    }

    #[test]
    fn context_zip_shorter() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.zip(&["a", "b", "c"], &[Value::from(1), Value::from(2)]);
        assert_eq!(ctx.get("a"), Some(&Value::from(1)));
        assert_eq!(ctx.get("b"), Some(&Value::from(2)));
        assert!(!ctx.has_key("c"));
    }

    #[test]
    fn context_from_value_not_map() {
        let engine = Engine::new();
        let err = Context::from_value(&engine, vec![1, 2]).unwrap_err();
        assert_eq!(err.to_string(), "expected map for context, but found list");
    }
}
