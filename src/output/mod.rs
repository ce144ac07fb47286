//! Output module
//!
//! Turns a finished [`CollectionSchema`] into text.
//!
//! # Overview
//!
//! - `table`: bordered fixed-width report (the default)
//! - `json`: nested field tree, pretty printed
//! - `yaml`: the same tree as YAML

pub mod table;

use crate::error::Result;
use crate::schema::CollectionSchema;
use serde::{Deserialize, Serialize};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered table with one row per field
    #[default]
    Table,
    /// Nested field tree as JSON
    Json,
    /// Nested field tree as YAML
    Yaml,
}

/// Render a schema in the requested format
pub fn render_schema(schema: &CollectionSchema, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(schema.to_string()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&schema.export())?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&schema.export())?),
    }
}
