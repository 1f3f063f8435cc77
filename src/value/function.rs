use std::fmt;
use std::sync::Arc;

use crate::{Context, Result, Value};

type FunctionFn = dyn Fn(&mut Context<'_>, &Value) -> Result<Value> + Send + Sync + 'static;

/// A callable value.
///
/// Functions are invoked when a [`Variable`][crate::Variable] path passes
/// through them. The function receives the render context and the receiver,
/// which is the value the function was read from (or [`Value::None`] when
/// the function is bound directly in the context). The returned value is used
/// in place of the function for the rest of the lookup.
#[derive(Clone)]
pub struct Function {
    f: Arc<FunctionFn>,
}

impl Function {
    /// Construct a function with access to the context and the receiver.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Construct a function that takes no arguments.
    pub fn thunk<F, V>(f: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(move |_, _| Ok(f().into()))
    }

    /// Construct a function that only needs the receiver, like a method.
    pub fn method<F, V>(f: F) -> Self
    where
        F: Fn(&Value) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(move |_, this| Ok(f(this).into()))
    }

    /// Invoke the function.
    pub fn call(&self, ctx: &mut Context<'_>, receiver: &Value) -> Result<Value> {
        (self.f)(ctx, receiver)
    }

    /// Returns true if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").finish_non_exhaustive()
    }
}
