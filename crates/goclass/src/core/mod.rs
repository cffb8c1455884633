//! Core abstractions for package extraction
//!
//! The model, the syntax tree it is extracted from, and the traits that the
//! front end and renderers plug into.

pub mod chumsky_utils;
mod config;
mod error;
mod extractor;
pub mod logging;
mod model;
mod renderer;
pub mod signature;
pub mod syntax;

pub use config::*;
pub use error::*;
pub use extractor::*;
pub use logging::*;
pub use model::*;
pub use renderer::*;
pub use syntax::SourceParser;
