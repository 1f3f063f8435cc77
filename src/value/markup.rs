use std::any::Any;
use std::fmt;
use std::sync::Arc;

trait Opaque: Any + fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> Opaque for T
where
    T: Any + fmt::Debug + fmt::Display + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An opaque node produced by an output [`Mode`][crate::Mode].
///
/// The template engine never looks inside markup, it only threads it through
/// to the parent element or fragment. Modes recover their own nodes with
/// [`downcast_ref`][Markup::downcast_ref].
#[derive(Clone)]
pub struct Markup(Arc<dyn Opaque>);

impl Markup {
    /// Wrap a mode specific node.
    pub fn new<T>(node: T) -> Self
    where
        T: Any + fmt::Debug + fmt::Display + Send + Sync,
    {
        Self(Arc::new(node))
    }

    /// Returns the wrapped node if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        // Deref first, `Arc<dyn Opaque>` is itself `Opaque`.
        (*self.0).as_any().downcast_ref()
    }

    /// Returns true if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Markup").field(&self.0).finish()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
