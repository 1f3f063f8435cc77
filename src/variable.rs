use crate::{Context, Error, Result, Value};

/// A dotted path resolved against a [`Context`] at render time.
///
/// The first segment is looked up in the context frames, every following
/// segment is read as a [property][Value::property] of the current value.
/// When calling is enabled any [`Function`][crate::Function] met along the
/// way is invoked, with the value it was read from as the receiver, and the
/// result takes its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    path: String,
    call_functions: bool,
}

impl Variable {
    /// A variable that calls any functions met along its path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            call_functions: true,
        }
    }

    /// A variable that returns functions without calling them.
    pub fn uncalled(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            call_functions: false,
        }
    }

    /// Returns the path this variable resolves.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns whether functions on the path are called.
    pub fn calls_functions(&self) -> bool {
        self.call_functions
    }

    /// Resolve the path against the context.
    ///
    /// Fails with [`ErrorKind::VariableNotFound`][crate::ErrorKind] if the
    /// first segment is not set in any frame, or if any later segment is
    /// missing from the current value.
    pub fn resolve(&self, ctx: &mut Context<'_>) -> Result<Value> {
        let mut segments = self.path.split('.');
        let first = segments.next().unwrap_or_default();

        let mut current = match ctx.get(first) {
            Some(value) => value.clone(),
            None => {
                return Err(Error::variable_not_found(format!(
                    "could not find `{}` in the context",
                    first
                )))
            }
        };
        if let Value::Function(f) = &current {
            if self.call_functions {
                current = f.clone().call(ctx, &Value::None)?;
            }
        }

        for segment in segments {
            let next = current.property(segment).ok_or_else(|| {
                Error::variable_not_found(format!(
                    "could not find `{}` in {}",
                    segment,
                    current.human()
                ))
            })?;
            current = match next {
                Value::Function(f) if self.call_functions => f.call(ctx, &current)?,
                next => next,
            };
        }

        Ok(current)
    }
}
