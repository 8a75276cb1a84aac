//! Node connection built-ins.

use anyhow::{anyhow, Result};

use crate::env::ExecutionContext;
use crate::rpc::HttpNode;

pub fn connect(ctx: &mut ExecutionContext, endpoint: &str) -> Result<Vec<String>> {
    let node = HttpNode::new(endpoint)?;
    ctx.remote = Some(Box::new(node));
    Ok(vec![format!("connected to {endpoint}")])
}

pub fn disconnect(ctx: &mut ExecutionContext) -> Result<Vec<String>> {
    if ctx.remote.take().is_none() {
        return Err(anyhow!("not connected to a node"));
    }
    Ok(vec!["disconnected".to_string()])
}
