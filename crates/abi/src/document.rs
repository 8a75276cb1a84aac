//! On-disk ABI document model.
//!
//! An ABI file is a JSON document with a `methods` list and a `types`
//! table. Method argument and return types are references into the type
//! table; the type table is self-describing (fields may reference other
//! entries). The document is only a loading format: registration resolves
//! it into owned [`crate::MessageSchema`] trees and never walks it again.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{AbiError, Result};

/// A contract interface description as supplied by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiDocument {
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub types: IndexMap<String, TypeDef>,
}

/// One callable method of the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    /// Argument type reference; absent means the method takes nothing.
    #[serde(default)]
    pub input: Option<String>,
    /// Return type reference; absent or `"void"` means nothing comes back.
    #[serde(default)]
    pub output: Option<String>,
    /// Entry-point identifier, rendered as a `0x`-prefixed hex string.
    pub entry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "readonly")]
    pub read_only: bool,
}

/// A named structured-message type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
    pub fields: Vec<FieldDef>,
}

/// One field of a message type. `type` is either a primitive name
/// (`bool`, `int`, `uint`, `string`, `bytes`, `hex`, `id`, `address`) or
/// the name of another entry in the document's type table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl AbiDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AbiError::Parse(e.to_string()))
    }
}

impl MethodDef {
    /// Parses the `0x`-prefixed entry-point identifier.
    pub fn entry_point(&self) -> Result<u32> {
        let digits = self.entry.strip_prefix("0x").unwrap_or(&self.entry);
        u32::from_str_radix(digits, 16)
            .map_err(|_| AbiError::InvalidEntryPoint(self.entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_document() {
        let doc = AbiDocument::from_json(
            r#"{
                "methods": [
                    {"name": "ping", "entry": "0x01", "readonly": true}
                ],
                "types": {}
            }"#,
        )
        .unwrap();
        assert_eq!(doc.methods.len(), 1);
        assert_eq!(doc.methods[0].entry_point().unwrap(), 1);
        assert!(doc.methods[0].read_only);
        assert!(doc.methods[0].input.is_none());
    }

    #[test]
    fn entry_point_rejects_garbage() {
        let doc = AbiDocument::from_json(
            r#"{"methods": [{"name": "x", "entry": "0xzz"}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.methods[0].entry_point(),
            Err(AbiError::InvalidEntryPoint("0xzz".into()))
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            AbiDocument::from_json("{"),
            Err(AbiError::Parse(_))
        ));
    }
}
