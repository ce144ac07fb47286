//! Collection scans
//!
//! Feeds every document of a cursor into one [`CollectionSchema`], then
//! sorts it and stamps the record count. A failing cursor aborts the scan
//! and nothing of the partial schema is returned.

use crate::error::{Error, Result};
use crate::schema::{CollectionSchema, SchemaBuilder};
use futures::{Stream, StreamExt};
use mongodb::{
    bson::{doc, Document},
    Client, Collection,
};
use std::borrow::Borrow;
use tracing::{info, instrument, trace};

/// Extracts collection schemas from MongoDB or from injected documents
#[derive(Debug, Clone, Default)]
pub struct SchemaAnalyzer {
    client: Option<Client>,
}

impl SchemaAnalyzer {
    /// Analyzer backed by a MongoDB client
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Analyzer that only works on injected collections and documents
    pub fn offline() -> Self {
        Self { client: None }
    }

    /// Scan a collection by name with the analyzer's client
    #[instrument(skip(self))]
    pub async fn extract_collection_schema(
        &self,
        db: &str,
        collection: &str,
        max_depth: usize,
    ) -> Result<CollectionSchema> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::connection("no MongoDB client configured"))?;
        let collection = client.database(db).collection::<Document>(collection);
        self.extract_from_collection(&collection, max_depth).await
    }

    /// Scan an already opened collection
    pub async fn extract_from_collection(
        &self,
        collection: &Collection<Document>,
        max_depth: usize,
    ) -> Result<CollectionSchema> {
        let namespace = collection.namespace();
        let cursor = collection.find(doc! {}).await?;
        Self::extract_from_stream(&namespace.db, &namespace.coll, cursor, max_depth).await
    }

    /// Scan any stream of documents, e.g. a driver cursor
    pub async fn extract_from_stream<S, E>(
        db: &str,
        collection: &str,
        mut documents: S,
        max_depth: usize,
    ) -> Result<CollectionSchema>
    where
        S: Stream<Item = std::result::Result<Document, E>> + Unpin,
        E: Into<Error>,
    {
        let mut scan = Scan::new(db, collection, max_depth);
        while let Some(document) = documents.next().await {
            let document = document.map_err(Into::<Error>::into)?;
            scan.push(&document);
        }
        Ok(scan.finish())
    }

    /// Scan documents from any iterator, owned or borrowed
    pub fn extract_from_documents<I, D, E>(
        db: &str,
        collection: &str,
        documents: I,
        max_depth: usize,
    ) -> Result<CollectionSchema>
    where
        I: IntoIterator<Item = std::result::Result<D, E>>,
        D: Borrow<Document>,
        E: Into<Error>,
    {
        let mut scan = Scan::new(db, collection, max_depth);
        for document in documents {
            let document = document.map_err(Into::<Error>::into)?;
            let document: &Document = document.borrow();
            scan.push(document);
        }
        Ok(scan.finish())
    }
}

struct Scan {
    builder: SchemaBuilder,
}

impl Scan {
    fn new(db: &str, collection: &str, max_depth: usize) -> Self {
        info!(db, collection, max_depth, "scanning collection");
        Self {
            builder: SchemaBuilder::new(db, collection, max_depth),
        }
    }

    fn push(&mut self, document: &Document) {
        self.builder.evaluate_document(document);
        trace!(record = self.builder.record_num(), "document evaluated");
    }

    fn finish(self) -> CollectionSchema {
        let schema = self.builder.finish();
        info!(
            db = schema.db_name(),
            collection = schema.collection_name(),
            records = schema.record_num(),
            fields = schema.fields().len(),
            "schema extracted"
        );
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BsonType;
    use futures::stream;

    fn ok_docs(docs: Vec<Document>) -> Vec<Result<Document>> {
        docs.into_iter().map(Ok).collect()
    }

    #[test]
    fn test_extract_counts_records_and_sorts() {
        let docs = vec![doc! { "a": 1 }, doc! { "a": "x" }, doc! { "a": 1 }];

        let schema =
            SchemaAnalyzer::extract_from_documents("db", "c", ok_docs(docs), 10).unwrap();

        assert_eq!(schema.record_num(), 3);
        let a = schema.root().child(BsonType::Object, "a").unwrap();
        let order: Vec<_> = a.types().keys().copied().collect();
        assert_eq!(order, vec![BsonType::Number, BsonType::String]);
    }

    #[test]
    fn test_extract_from_borrowed_documents() {
        let docs = [doc! { "a": 1 }, doc! { "b": 2 }];

        let schema = SchemaAnalyzer::extract_from_documents(
            "db",
            "c",
            docs.iter().map(Ok::<_, Error>),
            10,
        )
        .unwrap();

        assert_eq!(schema.record_num(), 2);
        assert_eq!(schema.fields().len(), 2);
    }

    #[test]
    fn test_extract_empty_collection() {
        let schema =
            SchemaAnalyzer::extract_from_documents("db", "c", ok_docs(vec![]), 10).unwrap();

        assert_eq!(schema.record_num(), 0);
        assert!(schema.fields().is_empty());
        assert!(schema.to_tree().is_empty());
    }

    #[test]
    fn test_extract_aborts_on_cursor_error() {
        let docs = vec![
            Ok(doc! { "a": 1 }),
            Err(Error::connection("cursor killed")),
            Ok(doc! { "a": 2 }),
        ];

        let err = SchemaAnalyzer::extract_from_documents("db", "c", docs, 10).unwrap_err();
        assert_eq!(err.to_string(), "Connection failed: cursor killed");
    }

    #[tokio::test]
    async fn test_extract_from_stream() {
        let documents = stream::iter(ok_docs(vec![
            doc! { "tags": [1, 2] },
            doc! { "tags": [3] },
        ]));

        let schema = SchemaAnalyzer::extract_from_stream("db", "c", documents, 10)
            .await
            .unwrap();

        assert_eq!(schema.record_num(), 2);
        let tags = schema.root().child(BsonType::Object, "tags").unwrap();
        assert_eq!(tags.count(BsonType::Array), 2);
        assert_eq!(tags.observation(BsonType::Array).unwrap().children.len(), 1);
    }

    #[tokio::test]
    async fn test_offline_analyzer_has_no_client() {
        let err = SchemaAnalyzer::offline()
            .extract_collection_schema("db", "c", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }
}
