//! Schema tree nodes and the merge algorithm

use super::types::{resolve_type, BsonType};
use indexmap::IndexMap;
use mongodb::bson::{Bson, Document};
use serde::Serialize;

/// Exported tree: field name -> type name -> summary
pub type FieldTree = IndexMap<String, IndexMap<String, TypeSummary>>;

/// Flattened listing: dotted path -> type -> count
pub type FieldListing = IndexMap<String, IndexMap<BsonType, u64>>;

/// Occurrence accumulator for one type observed at a node
#[derive(Debug, Clone, Default)]
pub struct TypeObservation {
    /// Number of values resolved to this type at this node
    pub count: u64,
    /// Child nodes, keyed by field name (objects) or shape index (arrays)
    pub children: IndexMap<String, SchemaNode>,
}

/// Exported view of a [`TypeObservation`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    pub count: u64,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: FieldTree,
}

/// How much of two trees has to agree for them to be equal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    /// Names, depths, types, counts and children must all match
    Strict,
    /// Only depths, types and child structure; names and counts are ignored
    Shape,
}

/// One field path at one nesting depth
#[derive(Debug, Clone)]
pub struct SchemaNode {
    name: String,
    depth: usize,
    types: IndexMap<BsonType, TypeObservation>,
}

impl SchemaNode {
    /// Name reserved for the root of every tree
    pub const ROOT_NAME: &'static str = "_root";

    /// Create an empty node
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth,
            types: IndexMap::new(),
        }
    }

    /// Create an empty root node
    pub fn root() -> Self {
        Self::new(Self::ROOT_NAME, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Observed types in their current order
    pub fn types(&self) -> &IndexMap<BsonType, TypeObservation> {
        &self.types
    }

    /// Observation for a single type, if it was ever seen here
    pub fn observation(&self, bson_type: BsonType) -> Option<&TypeObservation> {
        self.types.get(&bson_type)
    }

    /// Count recorded for a type, zero when never observed
    pub fn count(&self, bson_type: BsonType) -> u64 {
        self.observation(bson_type).map_or(0, |o| o.count)
    }

    /// Child reached through a given type
    pub fn child(&self, bson_type: BsonType, key: &str) -> Option<&SchemaNode> {
        self.observation(bson_type)
            .and_then(|o| o.children.get(key))
    }

    /// Evaluate one value and fold it into this node
    pub fn evaluate(&mut self, value: &Bson, max_depth: usize) {
        let bson_type = resolve_type(value);
        let descend = self.depth <= max_depth;
        let depth = self.depth;
        let observation = self.observe(bson_type);

        if !descend {
            return;
        }
        match value {
            Bson::Document(doc) => merge_fields(&mut observation.children, doc, depth, max_depth),
            Bson::Array(items) => merge_shapes(&mut observation.children, items, depth, max_depth),
            _ => {}
        }
    }

    /// Evaluate a top-level document; equivalent to evaluating it as an
    /// embedded document value without cloning it first
    pub fn evaluate_document(&mut self, doc: &Document, max_depth: usize) {
        let descend = self.depth <= max_depth;
        let depth = self.depth;
        let observation = self.observe(BsonType::Object);
        if descend {
            merge_fields(&mut observation.children, doc, depth, max_depth);
        }
    }

    fn observe(&mut self, bson_type: BsonType) -> &mut TypeObservation {
        let observation = self.types.entry(bson_type).or_default();
        observation.count += 1;
        observation
    }

    /// Compare two trees, see [`Equality`]
    pub fn equals(&self, other: &SchemaNode, mode: Equality) -> bool {
        if mode == Equality::Strict && self.name != other.name {
            return false;
        }
        if self.depth != other.depth || self.types.len() != other.types.len() {
            return false;
        }

        self.types.iter().all(|(bson_type, observation)| {
            let Some(theirs) = other.types.get(bson_type) else {
                return false;
            };
            if mode == Equality::Strict && observation.count != theirs.count {
                return false;
            }
            observation.children.len() == theirs.children.len()
                && observation.children.iter().all(|(key, child)| {
                    theirs
                        .children
                        .get(key)
                        .is_some_and(|their_child| child.equals(their_child, mode))
                })
        })
    }

    /// Reorder observed types by descending count, recursively.
    ///
    /// The sort is stable, so ties keep the order in which the types were
    /// first observed.
    pub fn sort_by_count_desc(&mut self) {
        self.types.sort_by(|_, a, _, b| b.count.cmp(&a.count));
        for observation in self.types.values_mut() {
            for child in observation.children.values_mut() {
                child.sort_by_count_desc();
            }
        }
    }

    /// Export the subtree as `{ name: { type: { count, children? } } }`
    pub fn to_tree(&self) -> FieldTree {
        let mut tree = FieldTree::new();
        self.export_into(&mut tree);
        tree
    }

    fn export_into(&self, container: &mut FieldTree) {
        let entry = self
            .types
            .iter()
            .map(|(bson_type, observation)| {
                let mut children = FieldTree::new();
                for child in observation.children.values() {
                    child.export_into(&mut children);
                }
                (
                    bson_type.name().to_string(),
                    TypeSummary {
                        count: observation.count,
                        children,
                    },
                )
            })
            .collect();
        container.insert(self.name.clone(), entry);
    }

    /// Export the top-level fields only, without the root wrapper.
    ///
    /// Empty when this node never observed a document.
    pub fn to_field_tree(&self) -> FieldTree {
        let mut tree = FieldTree::new();
        if let Some(observation) = self.types.get(&BsonType::Object) {
            for child in observation.children.values() {
                child.export_into(&mut tree);
            }
        }
        tree
    }

    /// Flatten the tree into dotted field paths.
    ///
    /// Only object fields extend a path; the shapes recorded under arrays are
    /// left out.
    pub fn fields(&self) -> FieldListing {
        let mut fields = FieldListing::new();
        self.collect_fields(&mut fields, &mut Vec::new());
        fields
    }

    fn collect_fields<'a>(&'a self, fields: &mut FieldListing, path: &mut Vec<&'a str>) {
        if !self.is_root() {
            path.push(&self.name);
            let counts = self
                .types
                .iter()
                .map(|(bson_type, observation)| (*bson_type, observation.count))
                .collect();
            fields.insert(path.join("."), counts);
        }

        for (bson_type, observation) in &self.types {
            if *bson_type == BsonType::Array {
                continue;
            }
            for child in observation.children.values() {
                child.collect_fields(fields, path);
            }
        }

        if !self.is_root() {
            path.pop();
        }
    }

    /// Deepest level present in the subtree
    pub fn max_child_depth(&self) -> usize {
        self.types
            .values()
            .flat_map(|o| o.children.values())
            .map(SchemaNode::max_child_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

fn merge_fields(
    children: &mut IndexMap<String, SchemaNode>,
    doc: &Document,
    depth: usize,
    max_depth: usize,
) {
    for (field, value) in doc {
        children
            .entry(field.clone())
            .or_insert_with(|| SchemaNode::new(field.as_str(), depth + 1))
            .evaluate(value, max_depth);
    }
}

// Array children form a catalog of distinct element shapes. An element whose
// shape is already known is dropped without touching any counter.
fn merge_shapes(
    children: &mut IndexMap<String, SchemaNode>,
    items: &[Bson],
    depth: usize,
    max_depth: usize,
) {
    for item in items {
        let index = children.len().to_string();
        let mut candidate = SchemaNode::new(index.as_str(), depth + 1);
        candidate.evaluate(item, max_depth);

        let known = children
            .values()
            .any(|existing| candidate.equals(existing, Equality::Shape));
        if !known {
            children.insert(index, candidate);
        }
    }
}
