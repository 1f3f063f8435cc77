use crate::value::Map;
use crate::{Context, Error, Node, Result, Template, Value, Variable};

/// The template an [`IncludeNode`] renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeTarget {
    /// A single template name.
    Name(String),
    /// The first of these templates that exists.
    Names(Vec<String>),
    /// A variable resolving to a name or a list of names.
    Var(Variable),
}

impl From<&str> for IncludeTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for IncludeTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl<S: Into<String>> From<Vec<S>> for IncludeTarget {
    fn from(names: Vec<S>) -> Self {
        Self::Names(names.into_iter().map(Into::into).collect())
    }
}

impl From<Variable> for IncludeTarget {
    fn from(var: Variable) -> Self {
        Self::Var(var)
    }
}

/// Renders another template in place.
///
/// The extra context is pushed on top of the current context while the
/// included template renders. With `only` set the included template sees
/// nothing but the extra context.
#[derive(Debug)]
pub struct IncludeNode {
    target: IncludeTarget,
    extra: Map<String, Node>,
    only: bool,
}

impl IncludeNode {
    pub fn new(target: impl Into<IncludeTarget>) -> Self {
        Self {
            target: target.into(),
            extra: Map::new(),
            only: false,
        }
    }

    /// Add extra context, values are rendered against the including context.
    ///
    /// Interpolated text is joined into a single string.
    pub fn with<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Node>,
    {
        self.extra
            .extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Render the included template with only the extra context.
    pub fn only(mut self) -> Self {
        self.only = true;
        self
    }

    pub fn target(&self) -> &IncludeTarget {
        &self.target
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        let engine = ctx.engine();
        let template = self.resolve_target(ctx)?;

        let mut extra = Map::new();
        for (name, node) in &self.extra {
            extra.insert(name.clone(), node.render_value(ctx)?);
        }

        if ctx.depth() >= engine.max_include_depth() {
            return Err(Error::cyclic(format!(
                "reached the maximum include depth ({})",
                engine.max_include_depth()
            )));
        }

        tracing::debug!(template = template.name(), only = self.only, "including template");
        if self.only {
            let mut isolated = ctx.isolated(extra);
            return template.render(&mut isolated);
        }

        ctx.push(extra);
        let depth = ctx.depth();
        ctx.set_depth(depth + 1);
        let result = template.render(ctx);
        ctx.set_depth(depth);
        ctx.pop()?;
        result
    }

    fn resolve_target<'a>(&self, ctx: &mut Context<'a>) -> Result<&'a Template> {
        let engine = ctx.engine();
        match &self.target {
            IncludeTarget::Name(name) => engine.lookup(name),
            IncludeTarget::Names(names) => engine.lookup_any(names),
            IncludeTarget::Var(var) => match var.resolve(ctx)? {
                Value::String(name) => engine.lookup(&name),
                Value::List(names) => {
                    let names = names
                        .into_iter()
                        .map(|name| match name {
                            Value::String(name) => Ok(name),
                            value => Err(expected_name(&value)),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    engine.lookup_any(&names)
                }
                value => Err(expected_name(&value)),
            },
        }
    }
}

fn expected_name(value: &Value) -> Error {
    Error::render(format!(
        "expected template name, but found {}",
        value.human()
    ))
}
