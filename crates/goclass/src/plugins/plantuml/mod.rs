//! PlantUML output plugin
//!
//! Renders a package as a PlantUML class diagram.

mod renderer;

pub use renderer::PlantUmlRenderer;
