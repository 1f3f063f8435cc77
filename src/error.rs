use std::cmp::max;
use std::fmt;

#[cfg(feature = "unicode")]
use unicode_width::UnicodeWidthStr;

use crate::types::span::Span;

/// A convenient type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while building or rendering templates.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    template: Option<String>,
    span: Option<(String, Span)>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A variable path could not be resolved against the context.
    VariableNotFound,
    /// [`Context::pop`][crate::Context::pop] was called on the last frame.
    ContextPop,
    /// A malformed expression or template declaration.
    TemplateSyntax,
    /// A parent or included template is not registered with the engine.
    TemplateNotFound,
    /// Template inheritance or inclusion loops back on itself.
    CyclicTemplate,
    /// A value could not be rendered, iterated or converted.
    Render,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            template: None,
            span: None,
        }
    }

    pub(crate) fn syntax_span(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        assert!(!source.is_empty(), "source must be populated");
        Self {
            kind: ErrorKind::TemplateSyntax,
            msg: msg.into(),
            template: None,
            span: Some((source.to_owned(), span.into())),
        }
    }

    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::TemplateSyntax, msg)
    }

    pub(crate) fn variable_not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::VariableNotFound, msg)
    }

    pub(crate) fn context_pop() -> Self {
        Self::new(
            ErrorKind::ContextPop,
            "pop() was called more times than push()",
        )
    }

    pub(crate) fn template_not_found<S: AsRef<str>>(names: &[S]) -> Self {
        let names: Vec<_> = names.iter().map(AsRef::as_ref).collect();
        Self::new(
            ErrorKind::TemplateNotFound,
            format!("template not found: {}", names.join(", ")),
        )
    }

    pub(crate) fn cyclic(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::CyclicTemplate, msg)
    }

    pub(crate) fn render(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, msg)
    }

    /// Attach the name of the template being rendered, unless an inner
    /// template already claimed the error.
    pub(crate) fn with_template_name(mut self, name: &str) -> Self {
        if self.template.is_none() {
            self.template = Some(name.to_owned());
        }
        self
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message without any location information.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the name of the innermost template that was rendering when
    /// the error occurred, if any.
    pub fn template_name(&self) -> Option<&str> {
        self.template.as_deref()
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::render(msg.to_string())
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => fmt_pretty(self, source, *span, f),
            None => f
                .debug_struct("Error")
                .field("kind", &self.kind)
                .field("msg", &self.msg)
                .field("template", &self.template)
                .finish(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) if f.alternate() => return fmt_pretty(self, source, *span, f),
            Some((_, span)) => write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n)?,
            None => write!(f, "{}", self.msg)?,
        }
        if let Some(name) = &self.template {
            write!(f, " in template `{}`", name)?;
        }
        Ok(())
    }
}

fn fmt_pretty(err: &Error, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let w = max(1, width(&source[span]));
    let code = lines.get(line).or_else(|| lines.last()).copied().unwrap_or("");

    let num = (line + 1).to_string();
    let pad = width(&num);
    let pipe = "|";
    let underline = "^".repeat(w);

    if let Some(name) = &err.template {
        write!(f, "\n {0:pad$}--> {name}", "", pad = pad, name = name)?;
    }
    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + w,
        msg = err.msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, width(&line[..offset - n]));
        }
        n += len;
    }
    (lines.len(), lines.last().map(|l| width(l)).unwrap_or(0))
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    s.width()
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}
