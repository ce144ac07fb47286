//! Schema inference module
//!
//! Builds an aggregate schema tree out of the documents of a collection.
//!
//! # Features
//!
//! - **Type Resolution**: Maps every BSON value to one type of a closed catalog
//! - **Occurrence Counting**: Counts each type per field path and depth
//! - **Array Shapes**: Keeps one entry per distinct array element shape
//! - **Reports**: Nested tree export and a flattened, tabular field report

mod collection;
mod node;
mod types;

pub use collection::{
    CollectionSchema, FieldReport, SchemaBuilder, SchemaExport, DEFAULT_MAX_DEPTH,
};
pub use node::{Equality, FieldListing, FieldTree, SchemaNode, TypeObservation, TypeSummary};
pub use types::{resolve_type, BsonType};
