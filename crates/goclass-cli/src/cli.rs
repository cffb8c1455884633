//! Command-line interface for the goclass utility
//!
//! Provides a CLI to turn the structs of a Go package into a PlantUML class
//! diagram or a JSON model.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use goclass::core::logging::init_logging;
use goclass::core::{ExtractConfig, ExtractError, Renderer};
use goclass::plugins::{JsonRenderer, Orchestrator, OutputFormat, PlantUmlRenderer};

/// goclass - Render Go package structs as class diagrams
#[derive(Parser)]
#[command(name = "goclass")]
#[command(about = "A Rust utility to render Go package structs as PlantUML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Where to look for a package
#[derive(clap::Args, Debug, Clone)]
pub struct PackageArgs {
    /// Import path or directory of the package (e.g. ./models, example.com/shop/orders)
    pub import_path: String,

    /// Directory to resolve the import path from (defaults to the current directory)
    #[arg(short = 'C', long)]
    pub base_dir: Option<PathBuf>,

    /// Also read _test.go files
    #[arg(long)]
    pub include_tests: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a Go package to a class diagram
    Convert {
        #[command(flatten)]
        package: PackageArgs,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatChoice::Puml)]
        format: FormatChoice,

        /// Treat this type name as a plain field type (repeatable)
        #[arg(long = "scalar", value_name = "NAME")]
        scalars: Vec<String>,

        /// Leave classes outside a `package` block
        #[arg(long)]
        no_package_block: bool,
    },

    /// Check that every file of a package parses
    Validate {
        #[command(flatten)]
        package: PackageArgs,
    },

    /// Print the directory an import path resolves to
    Locate {
        /// Import path or directory of the package
        import_path: String,

        /// Directory to resolve the import path from (defaults to the current directory)
        #[arg(short = 'C', long)]
        base_dir: Option<PathBuf>,
    },

    /// Show supported output formats
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    /// PlantUML class diagram
    #[default]
    Puml,
    /// JSON package model
    Json,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Puml => OutputFormat::PlantUml,
            FormatChoice::Json => OutputFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct FormatInfo {
    name: &'static str,
    description: &'static str,
    extension: &'static str,
}

/// Main CLI application
#[derive(Default)]
pub struct GoclassApp {
    /// Fixed locator base, used instead of the current directory
    default_base_dir: Option<PathBuf>,
}

impl GoclassApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative import paths from `base_dir` when a command gives none
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_base_dir: Some(base_dir.into()),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flag defaults
        let log_level_str = std::env::var("GOCLASS_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("GOCLASS_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("goclass v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                package,
                output,
                format,
                scalars,
                no_package_block,
            } => self.convert_command(
                package,
                output,
                format,
                scalars,
                no_package_block,
                cli.verbose,
            ),
            Commands::Validate { package } => self.validate_command(package, cli.verbose),
            Commands::Locate {
                import_path,
                base_dir,
            } => self.locate_command(&import_path, base_dir),
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
        }
    }

    fn orchestrator(&self, base_dir: Option<PathBuf>, config: ExtractConfig) -> Result<Orchestrator> {
        let base_dir = match base_dir.or_else(|| self.default_base_dir.clone()) {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        Ok(Orchestrator::new(base_dir).with_config(config))
    }

    /// Handle the convert command
    pub fn convert_command(
        &self,
        package: PackageArgs,
        output: Option<PathBuf>,
        format: FormatChoice,
        scalars: Vec<String>,
        no_package_block: bool,
        verbose: bool,
    ) -> Result<()> {
        let config = ExtractConfig::new()
            .with_tests(package.include_tests)
            .with_scalars(scalars);
        let orchestrator = self.orchestrator(package.base_dir, config)?;

        let renderer: Box<dyn Renderer> = match format {
            FormatChoice::Puml => {
                Box::new(PlantUmlRenderer::new().with_package_block(!no_package_block))
            }
            FormatChoice::Json => Box::new(JsonRenderer::new()),
        };
        let rendered = orchestrator.convert_with(&package.import_path, renderer.as_ref())?;
        info!(
            import_path = %package.import_path,
            format = renderer.name(),
            output_len = rendered.len(),
            "Converted package"
        );

        if verbose {
            eprintln!(
                "Converted {} to {}",
                package.import_path,
                OutputFormat::from(format)
            );
        }

        self.write_output(output, &rendered)
    }

    /// Handle the validate command
    pub fn validate_command(&self, package: PackageArgs, verbose: bool) -> Result<()> {
        let config = ExtractConfig::new().with_tests(package.include_tests);
        let orchestrator = self.orchestrator(package.base_dir, config)?;

        let dir = orchestrator.locate(&package.import_path)?;
        debug!(dir = %dir.display(), "Validating package");
        if verbose {
            eprintln!("Package directory: {}", dir.display());
        }

        match orchestrator.parse_dir(&dir) {
            Ok(files) => {
                println!("✓ {} files parsed", files.len());
                Ok(())
            }
            Err(e) => {
                match e.downcast_ref::<ExtractError>() {
                    Some(ExtractError::SyntaxError { .. }) => println!("✗ {}", e),
                    _ => println!("✗ Could not read package: {}", e),
                }
                Err(e)
            }
        }
    }

    /// Handle the locate command
    pub fn locate_command(&self, import_path: &str, base_dir: Option<PathBuf>) -> Result<()> {
        let orchestrator = self.orchestrator(base_dir, ExtractConfig::default())?;
        let dir = orchestrator.locate(import_path)?;
        println!("{}", dir.display());
        Ok(())
    }

    /// Handle the formats command
    pub fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported output formats");
        }

        let formats: Vec<FormatInfo> = OutputFormat::all()
            .iter()
            .map(|format| FormatInfo {
                name: format.name(),
                description: format.description(),
                extension: format.renderer().file_extension(),
            })
            .collect();

        if json {
            let listing = serde_json::json!({
                "formats": formats,
                "total": formats.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported output formats:");
            for format in &formats {
                println!("  {:<6} - {}", format.name, format.description);
            }
            println!();
            println!("Total: {} output formats supported", formats.len());
        }

        Ok(())
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}
