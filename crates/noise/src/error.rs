//! Error types for the boundary components
//!
//! The engine surface itself never fails: unsupported levels are substituted
//! and out-of-range settings are corrected. Errors only arise when parsing
//! names and when loading plugin libraries.

use std::path::PathBuf;
use thiserror::Error;

/// A selector or level name that does not match any known variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} name: {name:?}")]
pub struct ParseNameError {
    kind: &'static str,
    name: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_owned(),
        }
    }

    /// What was being parsed ("noise type", "SIMD level", ...)
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Errors raised while scanning a plugin directory
#[derive(Error, Debug)]
pub enum PluginError {
    /// The scan root exists but is not a directory (or does not exist)
    #[error("plugin path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Listing the directory failed
    #[error("failed to read plugin directory {path}: {source}")]
    Io {
        /// Directory being scanned
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}
