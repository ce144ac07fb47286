// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Mongo Schemist
//!
//! Infers the structural schema of a MongoDB collection from its documents:
//! which fields appear, with which types, how often and how deep.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mongo_schemist::{source::MongoConnection, SchemaAnalyzer, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let connection = MongoConnection::connect("mongodb://localhost:27017").await?;
//!     connection.test_connection().await?;
//!
//!     let analyzer = SchemaAnalyzer::new(connection.client().clone());
//!     let schema = analyzer.extract_collection_schema("shop", "orders", 100).await?;
//!
//!     println!("{schema}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐  documents  ┌────────────────┐  evaluate  ┌────────────┐
//! │ DocumentSource ├────────────▶│ SchemaAnalyzer ├───────────▶│ SchemaNode │
//! │ MongoDB / JSON │             │ single pass    │            │ tree       │
//! └────────────────┘             └───────┬────────┘            └─────┬──────┘
//!                                        │ sort + record count       │
//!                                        ▼                           │
//!                                ┌──────────────────┐                │
//!                                │ CollectionSchema │◀───────────────┘
//!                                │ table/json/yaml  │
//!                                └──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Schema tree, type catalog and collection reports
pub mod schema;

/// Collection scans
pub mod analyzer;

/// MongoDB and file document sources
pub mod source;

/// Report rendering
pub mod output;

/// Analyzer configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use analyzer::SchemaAnalyzer;
pub use error::{Error, Result};
pub use schema::{resolve_type, BsonType, CollectionSchema, SchemaBuilder, SchemaNode};
