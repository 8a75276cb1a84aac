//! Wallet and account built-ins: thin consumers of the custodian and
//! remote-node collaborators.

use std::path::Path;

use anyhow::{anyhow, Result};
use sha2::{Digest, Sha256};

use crate::console_service::ConsoleHelper;
use crate::env::ExecutionContext;
use crate::wallet::WalletSession;

pub fn balance(ctx: &ExecutionContext, address: &str) -> Result<Vec<String>> {
    let amount = ctx.remote()?.balance(address)?;
    Ok(vec![format!("{address}: {amount}")])
}

pub fn transfer(ctx: &ExecutionContext, to: &str, amount: &str, memo: &str) -> Result<Vec<String>> {
    let custodian = ctx.custodian()?;
    let from = custodian
        .identity()
        .ok_or_else(|| anyhow!("no identity loaded"))?;
    let body = serde_json::json!({
        "from": from,
        "to": to,
        "amount": amount,
        "memo": memo,
    });
    let digest: [u8; 32] = Sha256::digest(body.to_string().as_bytes()).into();
    let signature = custodian.sign(&digest)?;
    let transaction = serde_json::json!({
        "body": body,
        "signature": hex::encode(signature),
    });
    let txid = ctx.remote()?.submit_transfer(&transaction)?;
    Ok(vec![format!("transfer submitted: {txid}")])
}

pub fn create(ctx: &mut ExecutionContext, path: &str) -> Result<Vec<String>> {
    let passphrase = prompt_passphrase()?;
    let session = WalletSession::create(Path::new(path), &passphrase)?;
    let address = session.address().to_string();
    ctx.custodian = Some(Box::new(session));
    Ok(vec![
        format!("created wallet {path}"),
        format!("address: {address}"),
    ])
}

pub fn open(ctx: &mut ExecutionContext, path: &str) -> Result<Vec<String>> {
    let passphrase = prompt_passphrase()?;
    let session = WalletSession::open(Path::new(path), &passphrase)?;
    let address = session.address().to_string();
    ctx.custodian = Some(Box::new(session));
    Ok(vec![
        format!("opened wallet {path}"),
        format!("address: {address}"),
    ])
}

pub fn close(ctx: &mut ExecutionContext) -> Result<Vec<String>> {
    if ctx.custodian.take().is_none() {
        return Err(anyhow!("no wallet is open"));
    }
    Ok(vec!["wallet closed".to_string()])
}

pub fn show_address(ctx: &ExecutionContext) -> Result<Vec<String>> {
    let identity = ctx
        .custodian()?
        .identity()
        .ok_or_else(|| anyhow!("no identity loaded"))?;
    Ok(vec![format!("address: {identity}")])
}

fn prompt_passphrase() -> Result<String> {
    ConsoleHelper::read_user_input("passphrase", true)?
        .ok_or_else(|| anyhow!("passphrase entry aborted"))
}
