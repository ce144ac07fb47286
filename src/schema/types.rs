//! BSON type catalog and value resolution

use mongodb::bson::{spec::BinarySubtype, Bson};
use serde::{Serialize, Serializer};
use std::fmt;

/// The closed set of types a field can be observed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BsonType {
    Number,
    String,
    Object,
    Array,
    BinaryGeneric,
    BinaryFunction,
    BinaryOld,
    BinaryOldUuid,
    BinaryUuid,
    BinaryMd5,
    BinaryEncrypted,
    BinaryUserDefined,
    Undefined,
    ObjectId,
    Boolean,
    Date,
    Null,
    Regex,
    DbPointer,
    JavaScript,
    Timestamp,
    Long,
    Decimal,
    Unknown,
}

impl BsonType {
    /// Every type in the catalog, in declaration order
    pub const ALL: [BsonType; 24] = [
        BsonType::Number,
        BsonType::String,
        BsonType::Object,
        BsonType::Array,
        BsonType::BinaryGeneric,
        BsonType::BinaryFunction,
        BsonType::BinaryOld,
        BsonType::BinaryOldUuid,
        BsonType::BinaryUuid,
        BsonType::BinaryMd5,
        BsonType::BinaryEncrypted,
        BsonType::BinaryUserDefined,
        BsonType::Undefined,
        BsonType::ObjectId,
        BsonType::Boolean,
        BsonType::Date,
        BsonType::Null,
        BsonType::Regex,
        BsonType::DbPointer,
        BsonType::JavaScript,
        BsonType::Timestamp,
        BsonType::Long,
        BsonType::Decimal,
        BsonType::Unknown,
    ];

    /// Human-readable name used in reports and exports
    pub fn name(self) -> &'static str {
        match self {
            BsonType::Number => "Number",
            BsonType::String => "String",
            BsonType::Object => "Object",
            BsonType::Array => "Array",
            BsonType::BinaryGeneric => "Binary Data-Generic",
            BsonType::BinaryFunction => "Binary Data-Function",
            BsonType::BinaryOld => "Binary Data-Old Binary",
            BsonType::BinaryOldUuid => "Binary Data-Old UUID",
            BsonType::BinaryUuid => "Binary Data-UUID",
            BsonType::BinaryMd5 => "Binary Data-MD5",
            BsonType::BinaryEncrypted => "Binary Data-Encrypted",
            BsonType::BinaryUserDefined => "Binary Data-User Defined",
            BsonType::Undefined => "Undefined",
            BsonType::ObjectId => "Object Id",
            BsonType::Boolean => "Boolean",
            BsonType::Date => "Date",
            BsonType::Null => "Null",
            BsonType::Regex => "Regex",
            BsonType::DbPointer => "DB Pointer",
            BsonType::JavaScript => "JavaScript",
            BsonType::Timestamp => "Timestamp",
            BsonType::Long => "Long",
            BsonType::Decimal => "Decimal",
            BsonType::Unknown => "Unknown",
        }
    }

    /// Whether values of this type can carry child fields
    pub fn is_container(self) -> bool {
        matches!(self, BsonType::Object | BsonType::Array)
    }
}

impl fmt::Display for BsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BsonType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Resolve a BSON value to its type.
///
/// Total over the value space: anything without a dedicated entry in the
/// catalog (symbols, min/max keys) is `Unknown`.
pub fn resolve_type(value: &Bson) -> BsonType {
    match value {
        Bson::Null => BsonType::Null,
        Bson::ObjectId(_) => BsonType::ObjectId,
        Bson::Document(_) => BsonType::Object,
        Bson::Array(_) => BsonType::Array,
        Bson::Binary(binary) => resolve_binary_subtype(binary.subtype),
        Bson::DateTime(_) => BsonType::Date,
        Bson::Timestamp(_) => BsonType::Timestamp,
        Bson::RegularExpression(_) => BsonType::Regex,
        Bson::DbPointer(_) => BsonType::DbPointer,
        Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_) => BsonType::JavaScript,
        Bson::Int64(_) => BsonType::Long,
        Bson::Decimal128(_) => BsonType::Decimal,
        Bson::Undefined => BsonType::Undefined,
        Bson::Boolean(_) => BsonType::Boolean,
        Bson::String(_) => BsonType::String,
        Bson::Double(_) | Bson::Int32(_) => BsonType::Number,
        _ => BsonType::Unknown,
    }
}

fn resolve_binary_subtype(subtype: BinarySubtype) -> BsonType {
    match subtype {
        BinarySubtype::Generic => BsonType::BinaryGeneric,
        BinarySubtype::Function => BsonType::BinaryFunction,
        BinarySubtype::BinaryOld => BsonType::BinaryOld,
        BinarySubtype::UuidOld => BsonType::BinaryOldUuid,
        BinarySubtype::Uuid => BsonType::BinaryUuid,
        BinarySubtype::Md5 => BsonType::BinaryMd5,
        BinarySubtype::Encrypted => BsonType::BinaryEncrypted,
        _ => BsonType::BinaryUserDefined,
    }
}
