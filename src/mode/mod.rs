//! Output modes turn rendered elements and fragments into values.
//!
//! The template engine never inspects what a mode produces, it only hands the
//! results to the parent element or fragment. Two modes are provided:
//!
//! - [`Html`][html::Html] renders straight to escaped HTML strings. This is
//!   the default.
//! - [`Tree`][tree::Tree] builds an inspectable tree of elements.

pub mod html;
pub mod tree;

use crate::value::Map;
use crate::{Result, Value};

/// The backend that creates elements and fragments during a render.
///
/// # Examples
///
/// A mode that renders elements as S-expressions.
///
/// ```
/// use canopy::{Engine, Map, Mode, Result, Value};
/// use canopy::build::{el, template};
///
/// struct Sexp;
///
/// impl Mode for Sexp {
///     fn create_element(
///         &self,
///         tag: &str,
///         _attributes: Map<String, Value>,
///         children: Vec<Value>,
///     ) -> Result<Value> {
///         let inner = Value::List(children).to_text()?;
///         Ok(Value::from(format!("({} {})", tag, inner)))
///     }
///
///     fn fragment(&self, children: Vec<Value>) -> Result<Value> {
///         Ok(Value::List(children))
///     }
/// }
///
/// let mut engine = Engine::with_mode(Sexp);
/// engine.add_template(template("t", vec![el("p", vec!["hi".into()])])?);
/// let out = engine.template("t")?.render_value(Value::None)?;
/// assert_eq!(out.to_text()?, "(p hi)");
/// # Ok::<(), canopy::Error>(())
/// ```
pub trait Mode: Send + Sync {
    /// Create an element from its tag, the resolved attributes and the
    /// flattened children.
    fn create_element(
        &self,
        tag: &str,
        attributes: Map<String, Value>,
        children: Vec<Value>,
    ) -> Result<Value>;

    /// Create a fragment holding the flattened children.
    fn fragment(&self, children: Vec<Value>) -> Result<Value>;

    /// Create raw markup that must not be escaped, e.g. a doctype.
    fn markup(&self, raw: &str) -> Result<Value> {
        Ok(Value::from(raw))
    }
}
