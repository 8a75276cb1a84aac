//! Contract registration and invocation built-ins.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use mica_abi::value::render;
use mica_abi::{bind, AbiDocument, ContractInfo, StructuredValue};

use crate::console_service::ContractMethod;
use crate::contracts::register_contract;
use crate::env::ExecutionContext;

pub fn set_contract(
    ctx: &mut ExecutionContext,
    name: &str,
    address: &str,
    path: &str,
) -> Result<Vec<String>> {
    if ctx.contracts.contains_key(name) {
        bail!("contract already registered: {name}");
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read abi file: {path}"))?;
    let document = AbiDocument::from_json(&json)?;
    let address_bytes = bs58::decode(address)
        .into_vec()
        .map_err(|_| anyhow!("invalid contract address: {address}"))?;
    let contract = Arc::new(ContractInfo::from_document(name, address_bytes, &document)?);
    register_contract(&mut ctx.registry, &contract)?;
    ctx.contracts.insert(name.to_string(), Arc::clone(&contract));
    Ok(vec![format!(
        "registered contract {name} ({} methods)",
        contract.methods.len()
    )])
}

pub fn list_contracts(ctx: &ExecutionContext) -> Result<Vec<String>> {
    if ctx.contracts.is_empty() {
        return Ok(vec!["no contracts registered".to_string()]);
    }
    let mut lines = Vec::new();
    for contract in ctx.contracts.values() {
        lines.push(format!(
            "{} @ {}",
            contract.name,
            bs58::encode(&contract.address).into_string()
        ));
        for method in contract.methods.values() {
            lines.push(format!(
                "  {}: {}",
                contract.qualified(&method.name),
                method.description
            ));
        }
    }
    Ok(lines)
}

/// Invokes a registered contract method: bind the flat arguments into a
/// structured message, marshal it, call the remote entry point, and
/// decode the reply through the return schema.
pub fn call(
    ctx: &ExecutionContext,
    method: &ContractMethod,
    args: &HashMap<String, String>,
) -> Result<Vec<String>> {
    let message = bind(&method.params, args)?;
    let payload = serde_json::to_vec(&message.to_json())?;
    let response = ctx.remote()?.invoke(
        &method.address,
        method.entry_point,
        method.read_only,
        &payload,
    )?;
    let Some(returns) = &method.returns else {
        return Ok(vec!["ok".to_string()]);
    };
    let json: serde_json::Value =
        serde_json::from_slice(&response).map_err(|_| anyhow!("malformed response payload"))?;
    let value = StructuredValue::decode(returns, &json)?;
    Ok(render(returns, &value))
}
