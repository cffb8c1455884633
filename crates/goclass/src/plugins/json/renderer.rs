//! JSON renderer
//!
//! Serializes the package model with serde. Multiplicities appear as their
//! string form (`""` or `"0..*"`).

use anyhow::Result;
use tracing::debug;

use crate::core::{Package, Renderer};

/// Renders a [`Package`] as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, package: &Package) -> Result<String> {
        let mut out = serde_json::to_string_pretty(package)?;
        out.push('\n');
        debug!(output_len = out.len(), "Rendered JSON");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
