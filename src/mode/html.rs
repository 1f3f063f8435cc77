//! Render elements directly to HTML strings.

use std::fmt;

use crate::mode::Mode;
use crate::value::Map;
use crate::{Markup, Result, Value};

/// Elements that have no contents and no closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "frame", "hr", "input", "img", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

/// An attribute whose value is used as the raw contents of the element.
const INNER_HTML: &str = "innerHTML";

/// The HTML string mode.
///
/// Text and attribute values are escaped, markup (including the elements and
/// fragments this mode creates) is written as it is.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html;

/// A string that is already valid HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeString(String);

impl SafeString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mark a string as safe so that it is not escaped when rendered.
///
/// ```
/// use canopy::mode::html::mark_safe;
/// use canopy::build::{el, template};
/// use canopy::{Engine, Node, Value};
///
/// let mut engine = Engine::new();
/// engine.add_template(template("t", vec![
///     el("p", vec![Node::from(mark_safe("<b>bold</b>")), Node::from("<i>")]),
/// ])?);
/// let html = engine.template("t")?.render_from(Value::None)?;
/// assert_eq!(html, "<p><b>bold</b>&lt;i&gt;</p>");
/// # Ok::<(), canopy::Error>(())
/// ```
pub fn mark_safe(s: impl Into<String>) -> Value {
    Value::Markup(Markup::new(SafeString(s.into())))
}

/// Escape the characters that are special in HTML text and attribute values.
pub fn escape(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    escape_into(&mut buf, s);
    buf
}

pub(crate) fn escape_into(buf: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&#39;"),
            c => buf.push(c),
        }
    }
}

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Write a value as HTML, escaping everything except markup.
fn write_value(buf: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Markup(markup) => {
            use fmt::Write;
            // Writing to a string cannot fail.
            let _ = write!(buf, "{}", markup);
        }
        Value::List(items) => {
            for item in items {
                write_value(buf, item)?;
            }
        }
        value => escape_into(buf, &value.to_text()?),
    }
    Ok(())
}

impl Mode for Html {
    fn create_element(
        &self,
        tag: &str,
        attributes: Map<String, Value>,
        children: Vec<Value>,
    ) -> Result<Value> {
        let tag = tag.to_lowercase();
        let mut buf = String::new();
        buf.push('<');
        escape_into(&mut buf, &tag);
        for (name, value) in &attributes {
            if name == INNER_HTML {
                continue;
            }
            buf.push(' ');
            escape_into(&mut buf, &name.to_lowercase());
            buf.push_str("=\"");
            write_value(&mut buf, value)?;
            buf.push('"');
        }
        buf.push('>');

        if is_void(&tag) {
            return Ok(mark_safe(buf));
        }

        match attributes.get(INNER_HTML) {
            Some(inner) => inner.write_text(&mut buf)?,
            None => {
                for child in &children {
                    write_value(&mut buf, child)?;
                }
            }
        }

        buf.push_str("</");
        escape_into(&mut buf, &tag);
        buf.push('>');
        Ok(mark_safe(buf))
    }

    fn fragment(&self, children: Vec<Value>) -> Result<Value> {
        let mut buf = String::new();
        for child in &children {
            write_value(&mut buf, child)?;
        }
        Ok(mark_safe(buf))
    }

    fn markup(&self, raw: &str) -> Result<Value> {
        Ok(mark_safe(raw))
    }
}
