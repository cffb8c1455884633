//! Renderer trait
//!
//! Renderers turn an extracted [`Package`] into text.

use anyhow::Result;

use crate::core::Package;

/// Converts a package model into an output document
pub trait Renderer: Send + Sync {
    /// Render the whole package
    fn render(&self, package: &Package) -> Result<String>;

    /// Short name of the output format
    fn name(&self) -> &'static str;

    /// Conventional file extension, without the dot
    fn file_extension(&self) -> &'static str;
}
