//! Owned message schemas.
//!
//! Registration resolves ABI type references into these trees once; the
//! flattening and binding passes walk the owned tree and have no dependency
//! on the original document afterwards.

use crate::document::AbiDocument;
use crate::{AbiError, Result};

/// Primitive field kinds understood by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    UInt,
    String,
    /// Raw bytes, entered and shown as hex.
    Bytes,
    /// Bytes tagged hex-like or id-like in the ABI.
    BytesHex,
    /// Bytes tagged address-like, entered and shown as base58.
    BytesAddress,
}

/// The type of one field: a primitive or a nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Primitive(FieldKind),
    Message(MessageSchema),
}

/// A named, typed field of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
}

/// An ordered list of fields describing one structured message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageSchema {
    pub fields: Vec<FieldSpec>,
}

impl MessageSchema {
    /// Resolves `type_name` from the document's type table into an owned
    /// schema tree. Fields naming a type that is neither primitive nor in
    /// the table fail with `unsupported field type`; a missing top-level
    /// type fails with `unknown type`. Self-referential types cannot be
    /// represented as an owned tree and are rejected.
    pub fn resolve(doc: &AbiDocument, type_name: &str) -> Result<Self> {
        let mut in_progress = Vec::new();
        resolve_message(doc, type_name, &mut in_progress)
    }
}

fn resolve_message(
    doc: &AbiDocument,
    name: &str,
    in_progress: &mut Vec<String>,
) -> Result<MessageSchema> {
    let def = doc
        .types
        .get(name)
        .ok_or_else(|| AbiError::UnknownType(name.to_string()))?;
    if in_progress.iter().any(|n| n == name) {
        return Err(AbiError::UnknownType(format!("{name} (recursive reference)")));
    }
    in_progress.push(name.to_string());

    let mut fields = Vec::with_capacity(def.fields.len());
    for field in &def.fields {
        let ty = match primitive_kind(&field.type_name) {
            Some(kind) => FieldType::Primitive(kind),
            None if doc.types.contains_key(&field.type_name) => {
                FieldType::Message(resolve_message(doc, &field.type_name, in_progress)?)
            }
            None => return Err(AbiError::UnsupportedFieldType(field.type_name.clone())),
        };
        fields.push(FieldSpec {
            name: field.name.clone(),
            ty,
        });
    }

    in_progress.pop();
    Ok(MessageSchema { fields })
}

fn primitive_kind(name: &str) -> Option<FieldKind> {
    Some(match name {
        "bool" => FieldKind::Bool,
        "int" | "int32" | "int64" => FieldKind::Int,
        "uint" | "uint32" | "uint64" => FieldKind::UInt,
        "string" => FieldKind::String,
        "bytes" => FieldKind::Bytes,
        "hex" | "id" => FieldKind::BytesHex,
        "address" => FieldKind::BytesAddress,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AbiDocument;

    fn doc(types: &str) -> AbiDocument {
        AbiDocument::from_json(&format!(r#"{{"methods": [], "types": {types}}}"#)).unwrap()
    }

    #[test]
    fn resolves_nested_types() {
        let doc = doc(
            r#"{
                "Outer": {"fields": [
                    {"name": "tag", "type": "string"},
                    {"name": "inner", "type": "Inner"}
                ]},
                "Inner": {"fields": [{"name": "count", "type": "uint"}]}
            }"#,
        );
        let schema = MessageSchema::resolve(&doc, "Outer").unwrap();
        assert_eq!(schema.fields.len(), 2);
        match &schema.fields[1].ty {
            FieldType::Message(inner) => {
                assert_eq!(inner.fields[0].name, "count");
                assert_eq!(inner.fields[0].ty, FieldType::Primitive(FieldKind::UInt));
            }
            other => panic!("expected nested message, got {other:?}"),
        }
    }

    #[test]
    fn missing_type_is_unknown() {
        let doc = doc("{}");
        assert_eq!(
            MessageSchema::resolve(&doc, "Nope"),
            Err(AbiError::UnknownType("Nope".into()))
        );
    }

    #[test]
    fn unknown_field_type_is_unsupported() {
        let doc = doc(r#"{"T": {"fields": [{"name": "x", "type": "float"}]}}"#);
        assert_eq!(
            MessageSchema::resolve(&doc, "T"),
            Err(AbiError::UnsupportedFieldType("float".into()))
        );
    }

    #[test]
    fn recursive_types_are_rejected() {
        let doc = doc(r#"{"T": {"fields": [{"name": "next", "type": "T"}]}}"#);
        assert!(MessageSchema::resolve(&doc, "T").is_err());
    }
}
