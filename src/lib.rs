//! A template engine for building markup trees.
//!
//! # Features
//!
//! ### Templates
//!
//! - Variables: `{{ user.name }}` in text and attributes
//! - Conditionals: `if_("user && user.age >= 18", ...)` with an `else_`
//! - Loops: `for_("key, value in pairs", ...)` with an `empty` fallback and
//!   a `forloop` variable
//! - Template inheritance with overridable blocks and `block.super`
//! - Included templates, with extra or isolated context
//! - Cycles, doctypes and host supplied functions
//!
//! ### Engine
//!
//! - Templates are plain Rust values, built with the functions in [`build`]
//! - Pluggable output [`Mode`]s: escaped HTML strings (the default) or an
//!   inspectable element tree
//! - Render using any [`serde`] serializable values
//! - Convenient macro for building contexts:
//!   `canopy::value!{ name: "John", age: 42 }`
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the output
//! mode and the registered templates. Generally, you only need to construct
//! one engine during the lifetime of a program.
//!
//! ```
//! let engine = canopy::Engine::new();
//! ```
//!
//! Next, templates are built and stored in the engine using
//! [`.add_template`][Engine::add_template].
//!
//! ```
//! use canopy::build::{el, template};
//!
//! # let mut engine = canopy::Engine::new();
//! engine.add_template(template("hello", vec![
//!     el("p", vec!["Hello {{ user.name }}!".into()]),
//! ])?);
//! # Ok::<(), canopy::Error>(())
//! ```
//!
//! Finally, the template is rendered by fetching it using
//! [`.template`][Engine::template] and calling
//! [`.render`][TemplateRef::render].
//!
//! ```
//! # use canopy::build::{el, template};
//! # let mut engine = canopy::Engine::new();
//! # engine.add_template(template("hello", vec![
//! #     el("p", vec!["Hello {{ user.name }}!".into()]),
//! # ])?);
//! let template = engine.template("hello")?;
//! let result = template.render(canopy::value!{ user: { name: "John Smith" }})?;
//! assert_eq!(result, "<p>Hello John Smith!</p>");
//! # Ok::<(), canopy::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Template inheritance
//!
//! A child template overrides the blocks of its parent. The overriding block
//! can render the parent's version through `block.super`.
//!
//! ```
//! use canopy::build::{block, el, extends, template, var};
//!
//! let mut engine = canopy::Engine::new();
//! engine.add_template(template("base", vec![
//!     el("title", vec![block("title", vec!["Site".into()])]),
//! ])?);
//! engine.add_template(extends("page", "base", vec![
//!     block("title", vec!["{{ page }} | ".into(), var("block.super")]),
//! ])?);
//!
//! let result = engine.render_template("page", canopy::value!{ page: "About" })?;
//! assert_eq!(result, "<title>About | Site</title>");
//! # Ok::<(), canopy::Error>(())
//! ```
//!
//! ### Render using structured data
//!
//! ```
//! use canopy::build::{el, template};
//!
//! #[derive(serde::Serialize)]
//! struct Context { user: User }
//!
//! #[derive(serde::Serialize)]
//! struct User { name: String }
//!
//! let ctx = Context { user: User { name: "John Smith".into() } };
//!
//! let mut engine = canopy::Engine::new();
//! engine.add_template(template("hello", vec!["Hello {{ user.name }}".into()])?);
//! let result = engine.template("hello")?.render(&ctx)?;
//!
//! assert_eq!(result, "Hello John Smith");
//! # Ok::<(), canopy::Error>(())
//! ```
//!
//! ### Build an element tree
//!
//! ```
//! use canopy::build::{el, template};
//! use canopy::mode::tree::{Fragment, Tree, TreeNode};
//!
//! let mut engine = canopy::Engine::with_mode(Tree);
//! engine.add_template(template("t", vec![el("p", vec!["hi".into()])])?);
//!
//! let value = engine.template("t")?.render_value(canopy::Value::None)?;
//! let canopy::Value::Markup(markup) = value else { unreachable!() };
//! let fragment = markup.downcast_ref::<Fragment>().unwrap();
//! assert!(matches!(&fragment.children()[0], TreeNode::Element(e) if e.tag() == "p"));
//! # Ok::<(), canopy::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod build;
mod compile;
mod context;
mod error;
mod macros;
pub mod mode;
mod node;
mod render;
mod template;
mod types;
mod value;
mod variable;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use crate::context::{BlockContext, Context, RenderContext};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::mode::Mode;
pub use crate::node::{
    BlockNode, CycleNode, DoctypeNode, ElementNode, ForNode, IfNode, IncludeNode, IncludeTarget,
    Node, RenderFn, Segment, TextNode,
};
pub use crate::template::Template;
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{Function, List, Map, Markup, Value};
pub use crate::variable::Variable;

/// The default maximum depth of nested includes.
const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// The template registry and rendering engine.
pub struct Engine {
    mode: Box<dyn Mode>,
    templates: BTreeMap<String, Arc<Template>>,
    max_include_depth: usize,
}

/// A reference to a template registered in an [`Engine`].
#[derive(Clone, Copy)]
pub struct TemplateRef<'engine> {
    engine: &'engine Engine,
    template: &'engine Template,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new engine rendering HTML strings.
    #[inline]
    pub fn new() -> Self {
        Self::with_mode(mode::html::Html)
    }

    /// Construct a new engine with a custom output mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy::Engine;
    /// use canopy::mode::tree::Tree;
    ///
    /// let engine = Engine::with_mode(Tree);
    /// ```
    #[inline]
    pub fn with_mode<M>(mode: M) -> Self
    where
        M: Mode + 'static,
    {
        Self {
            mode: Box::new(mode),
            templates: BTreeMap::new(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Set the maximum depth of nested includes.
    ///
    /// Exceeding it fails the render with
    /// [`ErrorKind::CyclicTemplate`], which catches templates that include
    /// themselves. Defaults to 64.
    #[inline]
    pub fn set_max_include_depth(&mut self, depth: usize) {
        self.max_include_depth = depth;
    }

    #[inline]
    pub fn max_include_depth(&self) -> usize {
        self.max_include_depth
    }

    /// Returns the output mode.
    #[inline]
    pub fn mode(&self) -> &dyn Mode {
        &*self.mode
    }

    /// Add a template to the engine, replacing any template with the same
    /// name.
    #[inline]
    pub fn add_template(&mut self, template: Template) {
        self.templates
            .insert(template.name().to_owned(), Arc::new(template));
    }

    /// Lookup a template by name.
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<TemplateRef<'_>> {
        self.templates.get(name).map(|template| TemplateRef {
            engine: self,
            template,
        })
    }

    /// Lookup a template by name, failing if it is not registered.
    #[inline]
    pub fn template(&self, name: &str) -> Result<TemplateRef<'_>> {
        self.lookup(name).map(|template| TemplateRef {
            engine: self,
            template,
        })
    }

    /// Returns the first of the named templates that is registered.
    ///
    /// Fails with [`ErrorKind::TemplateNotFound`] listing every name if none
    /// are.
    #[inline]
    pub fn select_template<S: AsRef<str>>(&self, names: &[S]) -> Result<TemplateRef<'_>> {
        self.lookup_any(names).map(|template| TemplateRef {
            engine: self,
            template,
        })
    }

    /// Render the named template to a string.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_template<S>(&self, name: &str, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.template(name)?.render(ctx)
    }

    /// Render the first of the named templates that is registered.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_any<S, N>(&self, names: &[N], ctx: S) -> Result<String>
    where
        S: serde::Serialize,
        N: AsRef<str>,
    {
        self.select_template(names)?.render(ctx)
    }

    /// Construct an empty context bound to this engine.
    #[inline]
    pub fn context(&self) -> Context<'_> {
        Context::new(self)
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .map(|template| &**template)
            .ok_or_else(|| Error::template_not_found(&[name]))
    }

    pub(crate) fn lookup_any<S: AsRef<str>>(&self, names: &[S]) -> Result<&Template> {
        names
            .iter()
            .find_map(|name| self.templates.get(name.as_ref()))
            .map(|template| &**template)
            .ok_or_else(|| Error::template_not_found(names))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("templates", &self.templates.keys())
            .field("max_include_depth", &self.max_include_depth)
            .finish_non_exhaustive()
    }
}

impl<'engine> TemplateRef<'engine> {
    /// Render the template to a string using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render<S>(&self, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        let mut ctx = Context::from_serde(self.engine, ctx)?;
        self.render_with(&mut ctx)?.to_text()
    }

    /// Render the template to a string using the provided value, which must
    /// be a map or `None`.
    #[inline]
    pub fn render_from(&self, ctx: impl Into<Value>) -> Result<String> {
        self.render_value(ctx)?.to_text()
    }

    /// Render the template, returning the value produced by the output mode.
    #[inline]
    pub fn render_value(&self, ctx: impl Into<Value>) -> Result<Value> {
        let mut ctx = Context::from_value(self.engine, ctx)?;
        self.render_with(&mut ctx)
    }

    /// Render the template with an existing context.
    #[inline]
    pub fn render_with(&self, ctx: &mut Context<'_>) -> Result<Value> {
        self.template.render(ctx)
    }

    #[inline]
    pub fn name(&self) -> &'engine str {
        self.template.name()
    }

    /// Returns the underlying template.
    #[inline]
    pub fn template(&self) -> &'engine Template {
        self.template
    }
}

impl fmt::Debug for TemplateRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRef")
            .field("name", &self.template.name())
            .finish_non_exhaustive()
    }
}
