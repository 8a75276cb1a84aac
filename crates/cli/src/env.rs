//! Shared execution environment.
//!
//! Everything a command may touch is threaded through one context object:
//! the command registry, the wallet session, the remote node and the
//! registered contracts. Collaborators sit behind traits so the console
//! core never depends on a concrete transport or key store.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use mica_abi::ContractInfo;

use crate::console_service::CommandRegistry;

/// Signing identity collaborator. Supplies the current identity, if any,
/// and signs opaque digests.
pub trait Custodian {
    fn identity(&self) -> Option<String>;
    fn sign(&self, digest: &[u8; 32]) -> Result<Vec<u8>>;
}

/// Remote node collaborator. `invoke` is the opaque contract entry point
/// used by generated commands; the named queries back the built-ins.
pub trait RemoteNode {
    fn endpoint(&self) -> &str;

    /// Synchronously invokes a contract entry point with an opaque
    /// payload and returns the opaque response payload.
    fn invoke(
        &self,
        destination: &[u8],
        entry_point: u32,
        read_only: bool,
        payload: &[u8],
    ) -> Result<Vec<u8>>;

    fn balance(&self, address: &str) -> Result<String>;

    fn submit_transfer(&self, transaction: &serde_json::Value) -> Result<String>;
}

/// Passphrase sealing collaborator for wallet files.
pub trait SecureStore {
    fn seal(&self, passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn open(&self, passphrase: &str, sealed: &[u8]) -> Result<Vec<u8>>;
}

/// The shared mutable state commands execute against. Created once at
/// startup and mutated only through command execution.
pub struct ExecutionContext {
    pub registry: CommandRegistry,
    pub remote: Option<Box<dyn RemoteNode>>,
    pub custodian: Option<Box<dyn Custodian>>,
    pub contracts: IndexMap<String, Arc<ContractInfo>>,
    pub exit_requested: bool,
}

impl ExecutionContext {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            remote: None,
            custodian: None,
            contracts: IndexMap::new(),
            exit_requested: false,
        }
    }

    pub fn remote(&self) -> Result<&dyn RemoteNode> {
        self.remote
            .as_deref()
            .ok_or_else(|| anyhow!("not connected to a node"))
    }

    pub fn custodian(&self) -> Result<&dyn Custodian> {
        self.custodian
            .as_deref()
            .ok_or_else(|| anyhow!("no wallet is open"))
    }
}
