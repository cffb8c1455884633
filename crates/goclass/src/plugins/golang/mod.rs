//! Go front end
//!
//! Lexes and parses Go source files into the core syntax tree, and finds
//! package directories on disk.

pub mod lexer;
mod loader;
mod parser;

pub use lexer::{tokenize, Token, TokenStream};
pub use loader::{is_package_file, load_sources, module_directive, PackageLocator, SourceText};
pub use parser::{file_parser, type_parser, GoParser};
