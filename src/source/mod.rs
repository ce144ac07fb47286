//! Document sources
//!
//! A source knows which collections it can offer and how to scan one of
//! them into a [`CollectionSchema`].
//!
//! # Sources
//!
//! - [`MongoSource`]: a live MongoDB deployment
//! - [`JsonFileSource`]: a JSON array of documents on disk, exposed as a
//!   single collection named after the file stem

mod file;
mod mongo;

pub use file::{load_documents, parse_documents};
pub use mongo::{MongoConnection, APP_NAME};

use crate::analyzer::SchemaAnalyzer;
use crate::error::{Error, Result, ResultExt};
use crate::schema::CollectionSchema;
use async_trait::async_trait;
use mongodb::bson::Document;
use std::path::Path;

/// Something collections can be scanned from
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Collections available in a database
    async fn collection_names(&self, db: &str) -> Result<Vec<String>>;

    /// Scan one collection into a finished schema
    async fn analyze(&self, db: &str, collection: &str, max_depth: usize)
        -> Result<CollectionSchema>;
}

/// Collections of a live MongoDB deployment
#[derive(Debug, Clone)]
pub struct MongoSource {
    connection: MongoConnection,
    analyzer: SchemaAnalyzer,
}

impl MongoSource {
    /// Connect and check that the server answers
    pub async fn connect(uri: &str) -> Result<Self> {
        let connection = MongoConnection::connect(uri).await?;
        connection.test_connection().await?;
        let analyzer = SchemaAnalyzer::new(connection.client().clone());
        Ok(Self {
            connection,
            analyzer,
        })
    }
}

#[async_trait]
impl DocumentSource for MongoSource {
    async fn collection_names(&self, db: &str) -> Result<Vec<String>> {
        self.connection.list_collections(db).await
    }

    async fn analyze(
        &self,
        db: &str,
        collection: &str,
        max_depth: usize,
    ) -> Result<CollectionSchema> {
        self.analyzer
            .extract_collection_schema(db, collection, max_depth)
            .await
    }
}

/// Documents loaded from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    collection: String,
    documents: Vec<Document>,
}

impl JsonFileSource {
    /// Load a file; the collection takes the name of the file stem
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let collection = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .ok_or_else(|| Error::config(format!("not a file path: {}", path.display())))?;
        let documents =
            load_documents(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Self::new(collection, documents))
    }

    pub fn new(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            collection: collection.into(),
            documents,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

#[async_trait]
impl DocumentSource for JsonFileSource {
    async fn collection_names(&self, _db: &str) -> Result<Vec<String>> {
        Ok(vec![self.collection.clone()])
    }

    async fn analyze(
        &self,
        db: &str,
        collection: &str,
        max_depth: usize,
    ) -> Result<CollectionSchema> {
        if collection != self.collection {
            return Err(Error::config(format!(
                "collection '{collection}' not found, the input file provides '{}'",
                self.collection
            )));
        }
        SchemaAnalyzer::extract_from_documents(
            db,
            collection,
            self.documents.iter().map(Ok::<_, Error>),
            max_depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_json_file_source_single_collection() {
        let source = JsonFileSource::new("people", vec![doc! { "a": 1 }, doc! { "a": 2 }]);

        assert_eq!(source.collection_names("any").await.unwrap(), vec!["people"]);

        let schema = source.analyze("test", "people", 5).await.unwrap();
        assert_eq!(schema.db_name(), "test");
        assert_eq!(schema.record_num(), 2);

        let err = source.analyze("test", "other", 5).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_json_file_source_open_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"[{"name": "pen"}]"#).unwrap();

        let source = JsonFileSource::open(&path).unwrap();
        assert_eq!(source.collection, "products");
        assert_eq!(source.documents().len(), 1);
    }

    #[test]
    fn test_json_file_source_open_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"name": "pen"}"#).unwrap();

        let err = JsonFileSource::open(&path).unwrap_err().to_string();
        assert!(err.starts_with(&format!("reading {}: ", path.display())));
        assert!(err.contains("expected a JSON array of documents"));
    }
}
