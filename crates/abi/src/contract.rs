//! Registered contract records.

use indexmap::IndexMap;
use tracing::debug;

use crate::document::AbiDocument;
use crate::schema::MessageSchema;
use crate::{AbiError, Result};

/// One resolved method of a registered contract.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub description: String,
    pub entry_point: u32,
    pub read_only: bool,
    pub params: MessageSchema,
    pub returns: Option<MessageSchema>,
}

/// A contract registered with the console: its name, destination address
/// bytes, and the resolved method table keyed by method name. Built whole
/// at registration time and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ContractInfo {
    pub name: String,
    pub address: Vec<u8>,
    pub methods: IndexMap<String, MethodInfo>,
}

impl ContractInfo {
    /// Resolves every method of `doc` into owned schemas. Any failure
    /// aborts with no partial record, so a bad ABI registers nothing.
    pub fn from_document(name: &str, address: Vec<u8>, doc: &AbiDocument) -> Result<Self> {
        let mut methods = IndexMap::with_capacity(doc.methods.len());
        for def in &doc.methods {
            let params = match &def.input {
                Some(type_name) => MessageSchema::resolve(doc, type_name)?,
                None => MessageSchema::default(),
            };
            let returns = match def.output.as_deref() {
                Some("void") | None => None,
                Some(type_name) => Some(MessageSchema::resolve(doc, type_name)?),
            };
            let info = MethodInfo {
                name: def.name.clone(),
                description: def.description.clone(),
                entry_point: def.entry_point()?,
                read_only: def.read_only,
                params,
                returns,
            };
            if methods.insert(def.name.clone(), info).is_some() {
                return Err(AbiError::DuplicateMethod(def.name.clone()));
            }
        }
        debug!(contract = name, methods = methods.len(), "resolved contract interface");
        Ok(Self {
            name: name.to_string(),
            address,
            methods,
        })
    }

    /// The compound command name a method is registered under.
    pub fn qualified(&self, method: &str) -> String {
        format!("{}.{}", self.name, method)
    }
}
