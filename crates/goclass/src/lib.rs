//! goclass - Extract class diagrams from Go packages
//!
//! A library that reads the struct declarations of a Go package and models
//! them as classes with fields and relations, ready to render as PlantUML.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use goclass::parse_package;
//!
//! let package = parse_package("./models", ".").unwrap();
//! for class in package.classes() {
//!     println!("{}: {} members", class.name, class.member_count());
//! }
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use goclass::prelude::*;
//!
//! let source = "package shop\n\ntype Order struct {\n\tItems []*Item\n\tBase\n}\n";
//!
//! // Parse into a syntax tree
//! let file = GoParser::new()
//!     .parse_file(std::path::Path::new("order.go"), source)
//!     .unwrap();
//!
//! // Extract the class model
//! let package = ClassExtractor::new().extract("shop", &[file]);
//! let order = package.get_class("Order").unwrap();
//! assert_eq!(order.relations.len(), 2);
//!
//! // Render as PlantUML
//! let puml = PlantUmlRenderer::new().render(&package).unwrap();
//! assert!(puml.contains("Order --> \"0..*\" Item : Items"));
//! ```

pub mod core;
pub mod plugins;

use std::path::{Path, PathBuf};

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::syntax::SourceFile;
    pub use crate::core::{
        Class, ClassExtractor, ExtractConfig, ExtractError, Field, Multiplicity, Package,
        Relation, RelationKind, Renderer, SourceParser,
    };
    pub use crate::plugins::{
        GoParser, JsonRenderer, Orchestrator, OutputFormat, PackageLocator, PlantUmlRenderer,
    };
}

/// Locate, parse, and extract a Go package
///
/// `import_path` is resolved from `base_dir`: relative paths directly, other
/// paths through the enclosing module, `GOROOT`, and `GOPATH`. Test files
/// are skipped.
///
/// # Returns
/// * `Ok(Package)` - One class per struct type, in file then declaration order
/// * `Err` - An [`ExtractError`] if the package cannot be found, read, or parsed
///
/// # Example
/// ```rust,no_run
/// let package = goclass::parse_package("example.com/shop/orders", "/work/shop").unwrap();
/// println!("{} classes", package.class_count());
/// ```
pub fn parse_package(import_path: &str, base_dir: impl Into<PathBuf>) -> anyhow::Result<Package> {
    parse_package_with_config(import_path, base_dir, ExtractConfig::default())
}

/// Like [`parse_package`], with explicit extraction options
pub fn parse_package_with_config(
    import_path: &str,
    base_dir: impl Into<PathBuf>,
    config: ExtractConfig,
) -> anyhow::Result<Package> {
    plugins::Orchestrator::new(base_dir)
        .with_config(config)
        .extract(import_path)
}

/// Parse and extract in-memory sources as one package
///
/// Each entry is a file path (used in error messages) and its text.
///
/// # Example
/// ```rust
/// let package = goclass::extract_sources(
///     "demo",
///     &[("a.go", "package demo\n\ntype A struct{ N int }\n")],
/// )
/// .unwrap();
/// assert_eq!(package.class_count(), 1);
/// ```
pub fn extract_sources<P: AsRef<Path>>(
    qualified_name: &str,
    sources: &[(P, &str)],
) -> anyhow::Result<Package> {
    let parser = plugins::GoParser::new();
    let files = sources
        .iter()
        .map(|(path, text)| parser.parse_file(path.as_ref(), text))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(ClassExtractor::new().extract(qualified_name, &files))
}

/// Convert a Go package straight to PlantUML text
///
/// # Example
/// ```rust,no_run
/// let puml = goclass::render("./models", ".").unwrap();
/// assert!(puml.starts_with("@startuml"));
/// ```
pub fn render(import_path: &str, base_dir: impl Into<PathBuf>) -> anyhow::Result<String> {
    plugins::Orchestrator::new(base_dir).convert(import_path, plugins::OutputFormat::PlantUml)
}
