//! Pipeline orchestrator for package conversion
//!
//! The orchestrator manages the flow of data through all stages:
//! Locator → Loader → Parser → Extractor → Renderer

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use crate::core::syntax::{SourceFile, SourceParser};
use crate::core::{ClassExtractor, ExtractConfig, Package, Renderer};
use crate::plugins::golang::{load_sources, GoParser, PackageLocator, SourceText};
use crate::plugins::json::JsonRenderer;
use crate::plugins::plantuml::PlantUmlRenderer;

/// Output formats the pipeline can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// PlantUML class diagram
    #[default]
    PlantUml,
    /// Pretty-printed JSON model
    Json,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::PlantUml => "puml",
            OutputFormat::Json => "json",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::PlantUml => "PlantUML class diagram",
            OutputFormat::Json => "JSON package model",
        }
    }

    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::PlantUml, OutputFormat::Json]
    }

    /// Renderer with default options for this format
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::PlantUml => Box::new(PlantUmlRenderer::new()),
            OutputFormat::Json => Box::new(JsonRenderer::new()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "puml" | "plantuml" => Ok(OutputFormat::PlantUml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Pipeline that coordinates locating, parsing, extracting, and rendering
///
/// Each stage is a separate component so callers can swap the locator or
/// parser, or stop after any stage.
pub struct Orchestrator {
    locator: PackageLocator,
    parser: Box<dyn SourceParser>,
    extractor: ClassExtractor,
}

impl Orchestrator {
    /// Orchestrator resolving against `base_dir` with `GOROOT`/`GOPATH` from
    /// the environment
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_locator(PackageLocator::from_env(base_dir))
    }

    pub fn with_locator(locator: PackageLocator) -> Self {
        Self {
            locator,
            parser: Box::new(GoParser::new()),
            extractor: ClassExtractor::new(),
        }
    }

    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.extractor = ClassExtractor::with_config(config);
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn SourceParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        self.extractor.config()
    }

    pub fn locator(&self) -> &PackageLocator {
        &self.locator
    }

    /// Resolve an import path to its package directory
    pub fn locate(&self, import_path: &str) -> Result<PathBuf> {
        let locate_span = span!(Level::DEBUG, "pipeline_locate", import_path);
        let _enter = locate_span.enter();
        Ok(self.locator.locate(import_path)?)
    }

    /// Parse every source file; the first failure aborts
    pub fn parse_sources(&self, sources: &[SourceText]) -> Result<Vec<SourceFile>> {
        let parse_span = span!(
            Level::DEBUG,
            "pipeline_parse",
            parser = self.parser.name(),
            file_count = sources.len()
        );
        let _enter = parse_span.enter();

        let mut files = Vec::with_capacity(sources.len());
        for source in sources {
            trace!(file = %source.path.display(), "Parsing file");
            files.push(self.parser.parse_file(&source.path, &source.text)?);
        }
        debug!(file_count = files.len(), "Parsing completed");
        Ok(files)
    }

    /// Load and parse all package files in `dir`
    pub fn parse_dir(&self, dir: &Path) -> Result<Vec<SourceFile>> {
        let sources = load_sources(dir, self.config())?;
        self.parse_sources(&sources)
    }

    /// Locate, load, and parse a package without extracting it
    pub fn parse_package_files(&self, import_path: &str) -> Result<Vec<SourceFile>> {
        let dir = self.locate(import_path)?;
        self.parse_dir(&dir)
    }

    /// Run locate → load → parse → extract
    pub fn extract(&self, import_path: &str) -> Result<Package> {
        let extract_span = span!(Level::INFO, "process_package", import_path);
        let _enter = extract_span.enter();

        info!("Starting package extraction pipeline");
        let files = self.parse_package_files(import_path)?;
        let package = self.extractor.extract(import_path, &files);
        info!(
            class_count = package.class_count(),
            relation_count = package.relation_count(),
            "Extraction completed"
        );
        Ok(package)
    }

    /// Extract a package and render it with `renderer`
    pub fn convert_with(&self, import_path: &str, renderer: &dyn Renderer) -> Result<String> {
        let package = self.extract(import_path)?;

        let render_span = span!(Level::DEBUG, "pipeline_render", format = renderer.name());
        let _enter = render_span.enter();
        let output = renderer.render(&package)?;
        debug!(output_len = output.len(), "Rendering completed");
        Ok(output)
    }

    /// Extract a package and render it in `format` with default options
    pub fn convert(&self, import_path: &str, format: OutputFormat) -> Result<String> {
        self.convert_with(import_path, format.renderer().as_ref())
    }
}
