//! JSON-RPC node client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::debug;

use crate::env::RemoteNode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking JSON-RPC client for a Mica node endpoint.
pub struct HttpNode {
    endpoint: String,
    http: reqwest::blocking::Client,
    next_id: AtomicU64,
}

impl HttpNode {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "rpc request");
        let response: Value = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .with_context(|| format!("request to {} failed", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("request to {} failed", self.endpoint))?
            .json()
            .context("node returned a non-json response")?;
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            bail!("node error: {message}");
        }
        response
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("malformed node response"))
    }
}

impl RemoteNode for HttpNode {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn invoke(
        &self,
        destination: &[u8],
        entry_point: u32,
        read_only: bool,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let result = self.call(
            "contract_invoke",
            json!({
                "destination": bs58::encode(destination).into_string(),
                "entry": format!("{entry_point:#010x}"),
                "readonly": read_only,
                "payload": BASE64.encode(payload),
            }),
        )?;
        let data = result
            .get("data")
            .and_then(Value::as_str)
            .unwrap_or_default();
        BASE64
            .decode(data)
            .context("invalid payload encoding in node response")
    }

    fn balance(&self, address: &str) -> Result<String> {
        let result = self.call("account_balance", json!({ "address": address }))?;
        match result.get("balance") {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Number(number)) => Ok(number.to_string()),
            _ => Err(anyhow!("malformed balance response")),
        }
    }

    fn submit_transfer(&self, transaction: &Value) -> Result<String> {
        let result = self.call("tx_submit", json!({ "tx": transaction }))?;
        result
            .get("txid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("malformed submit response"))
    }
}
