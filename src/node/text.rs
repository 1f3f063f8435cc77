use crate::{compile, Context, Result, Value, Variable};

/// A piece of a [`TextNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Var(Variable),
}

/// Text that may contain `{{ var }}` interpolations.
///
/// Static text renders as a single string. Interpolated text renders as a
/// list of the literal pieces interleaved with the resolved values, joining
/// them is left to the output mode.
#[derive(Debug, Clone)]
pub struct TextNode {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Static(String),
    Dynamic(Vec<Segment>),
}

impl TextNode {
    pub fn new(text: &str) -> Self {
        let inner = match compile::has_interpolation(text) {
            true => Inner::Dynamic(compile::text(text)),
            false => Inner::Static(text.to_owned()),
        };
        Self { inner }
    }

    /// Returns whether the text contains interpolations.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.inner, Inner::Dynamic(_))
    }

    pub fn segments(&self) -> Vec<Segment> {
        match &self.inner {
            Inner::Static(text) => vec![Segment::Text(text.clone())],
            Inner::Dynamic(segments) => segments.clone(),
        }
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        match &self.inner {
            Inner::Static(text) => Ok(Value::from(text.as_str())),
            Inner::Dynamic(segments) => segments
                .iter()
                .map(|segment| match segment {
                    Segment::Text(text) => Ok(Value::from(text.as_str())),
                    Segment::Var(var) => var.resolve(ctx),
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
        }
    }
}
