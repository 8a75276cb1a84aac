//! Structured message values.
//!
//! A [`StructuredValue`] mirrors a [`MessageSchema`]: a tree of typed field
//! values produced by binding parsed arguments or by decoding a call
//! result. Values marshal to JSON for the remote invoker's opaque payload
//! and decode back from JSON guided by the return schema.

use serde_json::Value;

use crate::schema::{FieldKind, FieldType, MessageSchema};
use crate::{AbiError, Result};

/// A recursive field-name to value tree mirroring a message schema.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    String(String),
    Bytes(Vec<u8>),
    /// Sub-message fields in schema order.
    Message(Vec<(String, StructuredValue)>),
}

impl StructuredValue {
    /// Marshals the value into the JSON form carried as the invoker
    /// payload. Byte fields travel as lowercase hex strings.
    pub fn to_json(&self) -> Value {
        match self {
            StructuredValue::Bool(b) => Value::Bool(*b),
            StructuredValue::Int(i) => Value::from(*i),
            StructuredValue::UInt(u) => Value::from(*u),
            StructuredValue::String(s) => Value::String(s.clone()),
            StructuredValue::Bytes(bytes) => Value::String(hex::encode(bytes)),
            StructuredValue::Message(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Rebuilds a value tree from response JSON, walking `schema` exactly
    /// as the binder does for arguments.
    pub fn decode(schema: &MessageSchema, json: &Value) -> Result<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| AbiError::Decode("expected an object".to_string()))?;
        let mut fields = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let raw = object
                .get(&field.name)
                .ok_or_else(|| AbiError::MissingField(field.name.clone()))?;
            let value = match &field.ty {
                FieldType::Message(nested) => Self::decode(nested, raw)?,
                FieldType::Primitive(kind) => decode_primitive(*kind, &field.name, raw)?,
            };
            fields.push((field.name.clone(), value));
        }
        Ok(StructuredValue::Message(fields))
    }
}

fn decode_primitive(kind: FieldKind, name: &str, raw: &Value) -> Result<StructuredValue> {
    let invalid = || AbiError::InvalidValue(name.to_string());
    Ok(match kind {
        FieldKind::Bool => StructuredValue::Bool(raw.as_bool().ok_or_else(|| invalid())?),
        FieldKind::Int => StructuredValue::Int(raw.as_i64().ok_or_else(|| invalid())?),
        FieldKind::UInt => StructuredValue::UInt(raw.as_u64().ok_or_else(|| invalid())?),
        FieldKind::String => {
            StructuredValue::String(raw.as_str().ok_or_else(|| invalid())?.to_string())
        }
        FieldKind::Bytes | FieldKind::BytesHex | FieldKind::BytesAddress => {
            let text = raw.as_str().ok_or_else(|| invalid())?;
            StructuredValue::Bytes(hex::decode(text).map_err(|_| invalid())?)
        }
    })
}

/// Renders a decoded value as indented `name: value` lines, using the
/// schema to pick the byte encoding (base58 for address-like fields, hex
/// otherwise).
pub fn render(schema: &MessageSchema, value: &StructuredValue) -> Vec<String> {
    let mut out = Vec::new();
    render_into(schema, value, 0, &mut out);
    out
}

fn render_into(schema: &MessageSchema, value: &StructuredValue, depth: usize, out: &mut Vec<String>) {
    let StructuredValue::Message(pairs) = value else {
        out.push(format!("{}{}", "  ".repeat(depth), render_leaf(None, value)));
        return;
    };
    for field in &schema.fields {
        let Some((_, field_value)) = pairs.iter().find(|(name, _)| *name == field.name) else {
            continue;
        };
        let indent = "  ".repeat(depth);
        match &field.ty {
            FieldType::Message(nested) => {
                out.push(format!("{indent}{}:", field.name));
                render_into(nested, field_value, depth + 1, out);
            }
            FieldType::Primitive(kind) => {
                out.push(format!(
                    "{indent}{}: {}",
                    field.name,
                    render_leaf(Some(*kind), field_value)
                ));
            }
        }
    }
}

fn render_leaf(kind: Option<FieldKind>, value: &StructuredValue) -> String {
    match value {
        StructuredValue::Bool(b) => b.to_string(),
        StructuredValue::Int(i) => i.to_string(),
        StructuredValue::UInt(u) => u.to_string(),
        StructuredValue::String(s) => s.clone(),
        StructuredValue::Bytes(bytes) => match kind {
            Some(FieldKind::BytesAddress) => bs58::encode(bytes).into_string(),
            _ => hex::encode(bytes),
        },
        StructuredValue::Message(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType};

    fn schema(fields: Vec<(&str, FieldKind)>) -> MessageSchema {
        MessageSchema {
            fields: fields
                .into_iter()
                .map(|(name, kind)| FieldSpec {
                    name: name.to_string(),
                    ty: FieldType::Primitive(kind),
                })
                .collect(),
        }
    }

    #[test]
    fn json_round_trip() {
        let schema = schema(vec![
            ("ok", FieldKind::Bool),
            ("count", FieldKind::UInt),
            ("data", FieldKind::Bytes),
        ]);
        let value = StructuredValue::Message(vec![
            ("ok".into(), StructuredValue::Bool(true)),
            ("count".into(), StructuredValue::UInt(7)),
            ("data".into(), StructuredValue::Bytes(vec![0xde, 0xad])),
        ]);
        let decoded = StructuredValue::decode(&schema, &value.to_json()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn decode_reports_the_missing_field() {
        let schema = schema(vec![("count", FieldKind::UInt)]);
        let err = StructuredValue::decode(&schema, &serde_json::json!({})).unwrap_err();
        assert_eq!(err, AbiError::MissingField("count".into()));
    }

    #[test]
    fn renders_addresses_as_base58() {
        let schema = schema(vec![("who", FieldKind::BytesAddress)]);
        let value = StructuredValue::Message(vec![(
            "who".into(),
            StructuredValue::Bytes(vec![0, 1, 2]),
        )]);
        let lines = render(&schema, &value);
        assert_eq!(lines, vec![format!("who: {}", bs58::encode([0u8, 1, 2]).into_string())]);
    }
}
