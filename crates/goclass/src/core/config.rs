//! Extraction configuration

use std::collections::BTreeSet;

/// Go's predeclared boolean, integer, floating-point and string types, plus
/// the legacy `float` spelling
///
/// Complex numbers are left out and classify as relations unless configured.
pub const SCALAR_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float",
    "float32",
    "float64",
];

/// Options controlling which files are read and how members are classified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Also read `_test.go` files
    pub include_tests: bool,
    /// Names treated as scalars in addition to [`SCALAR_TYPES`]
    pub extra_scalars: BTreeSet<String>,
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    pub fn with_scalar(mut self, name: impl Into<String>) -> Self {
        self.extra_scalars.insert(name.into());
        self
    }

    pub fn with_scalars<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.extra_scalars.extend(names.into_iter().map(Into::into));
        self
    }

    /// True if `name` is a built-in scalar or a configured extra one
    pub fn is_scalar(&self, name: &str) -> bool {
        SCALAR_TYPES.contains(&name) || self.extra_scalars.contains(name)
    }
}
