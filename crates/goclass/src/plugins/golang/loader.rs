//! Package location and source loading
//!
//! Resolves an import path (or filesystem path) to a package directory the
//! way the Go toolchain searches: relative paths, the enclosing module and
//! its vendor tree, `GOROOT`, then every `GOPATH` entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::{ExtractConfig, ExtractError};

/// Finds the directory holding a Go package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocator {
    base_dir: PathBuf,
    goroot: Option<PathBuf>,
    gopath: Vec<PathBuf>,
}

impl PackageLocator {
    /// Locator with no toolchain roots; only relative and module lookups apply
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            goroot: None,
            gopath: Vec::new(),
        }
    }

    /// Locator using `GOROOT` and `GOPATH` from the environment
    ///
    /// `GOPATH` defaults to `$HOME/go` when unset.
    pub fn from_env(base_dir: impl Into<PathBuf>) -> Self {
        let goroot = std::env::var_os("GOROOT")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let gopath = match std::env::var_os("GOPATH").filter(|value| !value.is_empty()) {
            Some(value) => std::env::split_paths(&value).collect(),
            None => std::env::var_os("HOME")
                .map(|home| vec![PathBuf::from(home).join("go")])
                .unwrap_or_default(),
        };

        Self {
            base_dir: base_dir.into(),
            goroot,
            gopath,
        }
    }

    pub fn with_goroot(mut self, goroot: impl Into<PathBuf>) -> Self {
        self.goroot = Some(goroot.into());
        self
    }

    pub fn with_gopath(mut self, entry: impl Into<PathBuf>) -> Self {
        self.gopath.push(entry.into());
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `import_path` to an existing directory
    pub fn locate(&self, import_path: &str) -> Result<PathBuf, ExtractError> {
        let found = self
            .candidates(import_path)
            .into_iter()
            .find(|candidate| {
                let exists = candidate.is_dir();
                trace!(candidate = %candidate.display(), exists, "Probing package directory");
                exists
            });

        match found {
            Some(dir) => {
                debug!(import_path, dir = %dir.display(), "Located package");
                Ok(dir)
            }
            None => Err(ExtractError::resolution_error(
                import_path,
                self.base_dir.clone(),
            )),
        }
    }

    /// Directories to probe, in search order
    fn candidates(&self, import_path: &str) -> Vec<PathBuf> {
        if is_local_path(import_path) {
            return vec![self.base_dir.join(import_path)];
        }

        let mut candidates = Vec::new();
        if let Some((module_root, module_path)) = find_module(&self.base_dir) {
            if let Some(rest) = strip_module_prefix(import_path, &module_path) {
                candidates.push(module_root.join(rest));
            }
            candidates.push(module_root.join("vendor").join(import_path));
        }
        if let Some(goroot) = &self.goroot {
            candidates.push(goroot.join("src").join(import_path));
        }
        for entry in &self.gopath {
            candidates.push(entry.join("src").join(import_path));
        }
        candidates
    }
}

fn is_local_path(import_path: &str) -> bool {
    import_path == "."
        || import_path == ".."
        || import_path.starts_with("./")
        || import_path.starts_with("../")
        || Path::new(import_path).is_absolute()
}

/// Remainder of `import_path` inside the module, `""` for the module itself
fn strip_module_prefix<'a>(import_path: &'a str, module_path: &str) -> Option<&'a str> {
    let rest = import_path.strip_prefix(module_path)?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/')
    }
}

/// Walk up from `start` to the nearest `go.mod` and read its module path
fn find_module(start: &Path) -> Option<(PathBuf, String)> {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    start.ancestors().find_map(|dir| {
        let text = fs::read_to_string(dir.join("go.mod")).ok()?;
        let module_path = module_directive(&text)?;
        trace!(root = %dir.display(), module = %module_path, "Found go.mod");
        Some((dir.to_path_buf(), module_path))
    })
}

/// Extract the path from a `module` directive
pub fn module_directive(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// One source file read from a package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

/// Whether a directory entry named `name` belongs to the package
pub fn is_package_file(name: &str, config: &ExtractConfig) -> bool {
    name.ends_with(".go") && (config.include_tests || !name.ends_with("_test.go"))
}

/// Read every package source file in `dir`, sorted by file name
///
/// Subdirectories are separate packages and are not entered. Symlinks are
/// followed.
pub fn load_sources(dir: &Path, config: &ExtractConfig) -> Result<Vec<SourceText>, ExtractError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let selected = entry
            .file_name()
            .to_str()
            .map(|name| is_package_file(name, config))
            .unwrap_or(false);
        if selected {
            paths.push(entry.into_path());
        } else {
            trace!(file = %entry.path().display(), "Skipping non-package file");
        }
    }

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path)?;
        sources.push(SourceText { path, text });
    }

    debug!(dir = %dir.display(), file_count = sources.len(), "Loaded package sources");
    Ok(sources)
}
