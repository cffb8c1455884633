//! Plugin implementations
//!
//! The Go front end, the output renderers, and the orchestrator that wires
//! them into a pipeline.

pub mod golang;
pub mod json;
pub mod orchestrator;
pub mod plantuml;

pub use golang::{GoParser, PackageLocator};
pub use json::JsonRenderer;
pub use orchestrator::*;
pub use plantuml::PlantUmlRenderer;
