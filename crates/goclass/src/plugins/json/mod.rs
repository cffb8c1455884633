//! JSON output plugin

mod renderer;

pub use renderer::JsonRenderer;
