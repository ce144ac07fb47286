//! Analyzer configuration
//!
//! Settings come from an optional YAML file and from the command line;
//! values given on the command line win.
//!
//! ```yaml
//! uri: mongodb://localhost:27017
//! database: shop
//! collections: [orders, customers]
//! max_depth: 5
//! format: table
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::output::OutputFormat;
use crate::schema::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete analyzer configuration.
///
/// Unset values stay `None` until they are read, so a merge can tell an
/// explicit default apart from a missing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// MongoDB connection string
    #[serde(default)]
    pub uri: Option<String>,

    /// Database to analyze
    #[serde(default)]
    pub database: Option<String>,

    /// Collections to analyze; empty means every user collection
    #[serde(default)]
    pub collections: Vec<String>,

    /// Deepest level whose values are expanded into child fields
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Report format
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// JSON file to analyze instead of a live collection
    #[serde(default)]
    pub input: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).with_context(|| format!("config file {}", path.display()))
    }

    /// Parse a YAML configuration
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Merge two configurations, preferring values set on `self`
    #[must_use]
    pub fn merge(self, fallback: AnalyzerConfig) -> Self {
        Self {
            uri: self.uri.or(fallback.uri),
            database: self.database.or(fallback.database),
            collections: if self.collections.is_empty() {
                fallback.collections
            } else {
                self.collections
            },
            max_depth: self.max_depth.or(fallback.max_depth),
            format: self.format.or(fallback.format),
            input: self.input.or(fallback.input),
        }
    }

    /// Check that a source and a database are known
    pub fn validate(&self) -> Result<()> {
        if self.uri.is_none() && self.input.is_none() {
            return Err(Error::config(
                "either a MongoDB URI or an input file is required",
            ));
        }
        if self.input.is_none() && self.database.is_none() {
            return Err(Error::missing_field("database"));
        }
        if let Some(uri) = &self.uri {
            if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
                return Err(Error::InvalidConfigValue {
                    field: "uri".to_string(),
                    message: format!("expected a mongodb:// or mongodb+srv:// URI, got '{uri}'"),
                });
            }
        }
        Ok(())
    }

    /// Traversal depth, [`DEFAULT_MAX_DEPTH`] when unset
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Report format, a table when unset
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Database name, falling back to `test` for file input
    pub fn database_name(&self) -> &str {
        self.database.as_deref().unwrap_or("test")
    }
}
