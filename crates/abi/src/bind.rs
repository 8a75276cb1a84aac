//! Rebuilding structured messages from flat parsed arguments.

use std::collections::HashMap;

use crate::schema::{FieldKind, FieldType, MessageSchema};
use crate::value::StructuredValue;
use crate::{AbiError, Result};

/// Walks `schema` depth-first, pulling each primitive field's textual
/// value out of `args` by bare field name and converting it to its typed
/// form; nested fields recurse into sub-messages.
///
/// Lookups are unqualified: a field name that occurs in two different
/// branches of the schema resolves to the same textual argument in both
/// places. Registered ABIs rely on the collapsed namespace, so this stays
/// as is.
pub fn bind(schema: &MessageSchema, args: &HashMap<String, String>) -> Result<StructuredValue> {
    let mut fields = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let value = match &field.ty {
            FieldType::Message(nested) => bind(nested, args)?,
            FieldType::Primitive(kind) => {
                let raw = args
                    .get(&field.name)
                    .ok_or_else(|| AbiError::MissingField(field.name.clone()))?;
                convert(*kind, &field.name, raw)?
            }
        };
        fields.push((field.name.clone(), value));
    }
    Ok(StructuredValue::Message(fields))
}

fn convert(kind: FieldKind, name: &str, raw: &str) -> Result<StructuredValue> {
    let invalid = || AbiError::InvalidValue(name.to_string());
    Ok(match kind {
        // The literal `true` is true; anything else is false.
        FieldKind::Bool => StructuredValue::Bool(raw == "true"),
        FieldKind::Int => StructuredValue::Int(raw.parse().map_err(|_| invalid())?),
        FieldKind::UInt => StructuredValue::UInt(raw.parse().map_err(|_| invalid())?),
        FieldKind::String => StructuredValue::String(raw.to_string()),
        FieldKind::Bytes | FieldKind::BytesHex => {
            StructuredValue::Bytes(hex::decode(raw).map_err(|_| invalid())?)
        }
        FieldKind::BytesAddress => {
            StructuredValue::Bytes(bs58::decode(raw).into_vec().map_err(|_| invalid())?)
        }
    })
}
