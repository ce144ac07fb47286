//! Collection-level schema and its tabular report

use super::node::{Equality, FieldListing, FieldTree, SchemaNode};
use crate::output::table::{self, Align, Cell};
use mongodb::bson::Document;
use serde::Serialize;
use std::fmt;

/// Default traversal depth; deep enough for any practical document
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Finished schema of one collection, sorted and stamped with its record count
#[derive(Debug, Clone)]
pub struct CollectionSchema {
    db_name: String,
    collection_name: String,
    record_num: u64,
    max_depth: usize,
    root: SchemaNode,
}

/// One row of the field report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// Dotted field path
    pub key: String,
    /// Rendered type list, e.g. `Number(2),String(1)`
    pub types: String,
    /// Sum of the counts of every type of the field
    pub occurrences: u64,
    /// Share of documents, as a percentage
    pub percent: f64,
}

/// Serializable export of a collection schema
#[derive(Debug, Serialize)]
pub struct SchemaExport<'a> {
    pub db: &'a str,
    pub collection: &'a str,
    pub record_num: u64,
    pub fields: FieldTree,
}

/// Mutable state of a running scan.
///
/// Documents are folded in one at a time; [`SchemaBuilder::finish`] sorts
/// the tree, stamps the number of documents seen and hands back the
/// read-only [`CollectionSchema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    db_name: String,
    collection_name: String,
    max_depth: usize,
    record_num: u64,
    root: SchemaNode,
}

impl SchemaBuilder {
    pub fn new(
        db_name: impl Into<String>,
        collection_name: impl Into<String>,
        max_depth: usize,
    ) -> Self {
        Self {
            db_name: db_name.into(),
            collection_name: collection_name.into(),
            max_depth,
            record_num: 0,
            root: SchemaNode::root(),
        }
    }

    /// Fold one document into the schema
    pub fn evaluate_document(&mut self, document: &Document) {
        self.root.evaluate_document(document, self.max_depth);
        self.record_num += 1;
    }

    /// Documents evaluated so far
    pub fn record_num(&self) -> u64 {
        self.record_num
    }

    /// Close the scan
    #[must_use]
    pub fn finish(mut self) -> CollectionSchema {
        self.root.sort_by_count_desc();
        CollectionSchema {
            db_name: self.db_name,
            collection_name: self.collection_name,
            record_num: self.record_num,
            max_depth: self.max_depth,
            root: self.root,
        }
    }
}

impl CollectionSchema {
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn record_num(&self) -> u64 {
        self.record_num
    }

    #[must_use]
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Top-level fields as a nested tree
    pub fn to_tree(&self) -> FieldTree {
        self.root.to_field_tree()
    }

    /// Flattened dotted-path listing
    pub fn fields(&self) -> FieldListing {
        self.root.fields()
    }

    pub fn export(&self) -> SchemaExport<'_> {
        SchemaExport {
            db: &self.db_name,
            collection: &self.collection_name,
            record_num: self.record_num,
            fields: self.to_tree(),
        }
    }

    /// Report rows, most frequent fields first
    pub fn field_reports(&self) -> Vec<FieldReport> {
        let mut rows: Vec<FieldReport> = self
            .fields()
            .into_iter()
            .map(|(key, types)| {
                let polymorphic = types.len() > 1;
                let rendered: Vec<String> = types
                    .iter()
                    .map(|(bson_type, count)| {
                        if polymorphic {
                            format!("{bson_type}({count})")
                        } else {
                            bson_type.to_string()
                        }
                    })
                    .collect();
                let occurrences = types.values().sum();
                FieldReport {
                    key,
                    types: rendered.join(","),
                    occurrences,
                    percent: percent_of(occurrences, self.record_num),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        rows
    }

    /// Render the field report as a bordered table
    pub fn table_string(&self) -> String {
        let mut rows = vec![vec![
            Cell::new("keys", Align::Left),
            Cell::new("types", Align::Left),
            Cell::new("occurences", Align::Right),
            Cell::new("percents", Align::Right),
        ]];
        rows.extend(self.field_reports().into_iter().map(|report| {
            vec![
                Cell::new(report.key, Align::Left),
                Cell::new(report.types, Align::Left),
                Cell::new(report.occurrences.to_string(), Align::Right),
                Cell::new(format!("{:.1}", report.percent), Align::Right),
            ]
        }));
        table::render(&rows)
    }
}

/// Two schemas are equal when their trees are strictly equal
impl PartialEq for CollectionSchema {
    fn eq(&self, other: &Self) -> bool {
        self.root.equals(&other.root, Equality::Strict)
    }
}

impl fmt::Display for CollectionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DB: {}", self.db_name)?;
        writeln!(f, "Collection: {}", self.collection_name)?;
        writeln!(f, "Record number: {}", self.record_num)?;
        f.write_str(&self.table_string())
    }
}

// Rounded to four decimals of the ratio before scaling, zero for an empty
// collection.
pub(super) fn percent_of(occurrences: u64, record_num: u64) -> f64 {
    if record_num == 0 {
        return 0.0;
    }
    let ratio = occurrences as f64 / record_num as f64;
    (ratio * 10_000.0).round() / 10_000.0 * 100.0
}
