use crate::{Context, Result, Value};

const HTML4: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#;
const HTML5: &str = "<!DOCTYPE html>";

/// A document type declaration, rendered as raw markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoctypeNode {
    version: u8,
}

impl Default for DoctypeNode {
    fn default() -> Self {
        Self { version: 5 }
    }
}

impl DoctypeNode {
    /// HTML versions 4 and 5 are known, any other version renders nothing.
    pub fn new(version: u8) -> Self {
        Self { version }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    fn declaration(&self) -> &'static str {
        match self.version {
            4 => HTML4,
            5 => HTML5,
            _ => "",
        }
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        ctx.engine().mode().markup(self.declaration())
    }
}
