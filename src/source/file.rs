//! Documents from MongoDB Extended JSON files

use crate::error::{Error, Result};
use crate::schema::resolve_type;
use mongodb::bson::{Bson, Document};
use serde_json::Value;
use std::path::Path;

/// Load documents from a file holding a JSON array of documents
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_documents(&content)
}

/// Parse a JSON array of documents.
///
/// Both relaxed and canonical Extended JSON are accepted, so `{"$oid": ...}`
/// becomes an ObjectId and `{"$numberLong": ...}` a 64-bit integer.
pub fn parse_documents(json: &str) -> Result<Vec<Document>> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        return Err(Error::malformed("expected a JSON array of documents"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match Bson::try_from(item) {
            Ok(Bson::Document(document)) => Ok(document),
            Ok(other) => Err(Error::malformed(format!(
                "element {index} is a {} and not a document",
                resolve_type(&other)
            ))),
            Err(e) => Err(Error::malformed(format!("element {index}: {e}"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use std::io::Write;

    #[test]
    fn test_parse_extended_json() {
        let docs = parse_documents(
            r#"[
                {"_id": {"$oid": "5f1d7f1e8c1e4a3b2c1d0e0f"}, "n": 1, "big": {"$numberLong": "7"}},
                {"name": "x", "ratio": 0.5}
            ]"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 2);
        assert!(matches!(docs[0].get("_id"), Some(Bson::ObjectId(_))));
        assert_eq!(
            docs[0].get_object_id("_id").unwrap(),
            ObjectId::parse_str("5f1d7f1e8c1e4a3b2c1d0e0f").unwrap()
        );
        assert!(matches!(docs[0].get("n"), Some(Bson::Int32(1))));
        assert!(matches!(docs[0].get("big"), Some(Bson::Int64(7))));
        assert!(matches!(docs[1].get("ratio"), Some(Bson::Double(_))));
    }

    #[test]
    fn test_parse_rejects_non_documents() {
        let err = parse_documents(r#"[{"a": 1}, 42]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed input: element 1 is a Number and not a document"
        );

        let err = parse_documents(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_load_documents_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"a": true}}]"#).unwrap();

        let docs = load_documents(file.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].get_bool("a").unwrap());
    }

    #[test]
    fn test_load_documents_missing_file() {
        let err = load_documents("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
