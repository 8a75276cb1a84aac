//! Dynamic command generation for registered contracts.

use std::sync::Arc;

use anyhow::{bail, Result};
use mica_abi::{ContractInfo, FieldKind, FieldType, MessageSchema};
use tracing::info;

use crate::console_service::{
    ArgKind, CommandArgSpec, CommandDeclaration, CommandRegistry, CommandSpec, ContractMethod,
};

/// Flattens a message schema into the ordered positional parameter list
/// of a generated command. Nested messages are spliced in place without
/// name qualification, so a field name repeated across nesting levels
/// collapses to a single command-line parameter; registered ABIs depend
/// on the collapsed namespace.
pub fn flatten(schema: &MessageSchema) -> Vec<CommandArgSpec> {
    let mut params = Vec::new();
    flatten_into(schema, &mut params);
    params
}

fn flatten_into(schema: &MessageSchema, params: &mut Vec<CommandArgSpec>) {
    for field in &schema.fields {
        match &field.ty {
            FieldType::Message(nested) => flatten_into(nested, params),
            FieldType::Primitive(kind) => {
                params.push(CommandArgSpec::required(&field.name, arg_kind(*kind)))
            }
        }
    }
}

fn arg_kind(kind: FieldKind) -> ArgKind {
    match kind {
        FieldKind::Bool | FieldKind::String => ArgKind::FreeString,
        FieldKind::Int | FieldKind::UInt => ArgKind::DecimalAmount,
        FieldKind::Bytes | FieldKind::BytesHex => ArgKind::HexBytes,
        FieldKind::BytesAddress => ArgKind::Base58Bytes,
    }
}

/// Builds and registers the command set for a contract. Declarations are
/// inserted only after every method has flattened and cleared the
/// name-collision check, so a failing contract leaves the registry
/// untouched.
pub fn register_contract(
    registry: &mut CommandRegistry,
    contract: &Arc<ContractInfo>,
) -> Result<()> {
    let mut declarations = Vec::with_capacity(contract.methods.len());
    for method_info in contract.methods.values() {
        let name = contract.qualified(&method_info.name);
        if registry.contains(&name) {
            bail!("command already registered: {name}");
        }
        let method = Arc::new(ContractMethod {
            contract: contract.name.clone(),
            method: method_info.name.clone(),
            address: contract.address.clone(),
            entry_point: method_info.entry_point,
            read_only: method_info.read_only,
            params: method_info.params.clone(),
            returns: method_info.returns.clone(),
        });
        declarations.push(CommandDeclaration {
            name,
            description: method_info.description.clone(),
            hidden: false,
            args: flatten(&method_info.params),
            spec: CommandSpec::ContractCall(method),
        });
    }

    let count = declarations.len();
    for declaration in declarations {
        registry.add_command(declaration);
    }
    info!(contract = %contract.name, commands = count, "registered contract commands");
    Ok(())
}
