//! Interactive shell service.

use anyhow::{Context, Result};
use tracing::warn;

use crate::args::CliArgs;
use crate::commands::{builtin_registry, run_line};
use crate::config::Config;
use crate::console_service::ConsoleHelper;
use crate::env::ExecutionContext;
use crate::rpc::HttpNode;
use crate::wallet::WalletSession;

const PROMPT: &str = "mica";

/// Owns the execution context and drives the read-parse-execute loop.
pub struct MainService {
    ctx: ExecutionContext,
}

impl MainService {
    pub fn new(config: &Config, args: &CliArgs) -> Result<Self> {
        let mut ctx = ExecutionContext::new(builtin_registry());

        let endpoint = args
            .endpoint
            .clone()
            .or_else(|| config.node.endpoint.clone());
        if let Some(endpoint) = endpoint {
            match HttpNode::new(&endpoint) {
                Ok(node) => ctx.remote = Some(Box::new(node)),
                Err(err) => warn!("cannot reach {endpoint}: {err}"),
            }
        }

        let wallet_path = args
            .wallet
            .clone()
            .or_else(|| config.wallet.path.clone().map(Into::into));
        if let Some(path) = wallet_path {
            let passphrase = ConsoleHelper::read_user_input("passphrase", true)?
                .context("passphrase entry aborted")?;
            let session = WalletSession::open(&path, &passphrase)?;
            ConsoleHelper::info(format!("opened wallet, address {}", session.address()));
            ctx.custodian = Some(Box::new(session));
        }

        Ok(Self { ctx })
    }

    /// Runs one command line and prints its output, for `-x` batch use.
    pub fn execute_line(&mut self, line: &str) -> Result<()> {
        for output in run_line(&mut self.ctx, line) {
            println!("{output}");
        }
        Ok(())
    }

    /// The interactive loop: read a line, run it, print what came back,
    /// until a command asks to exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        ConsoleHelper::info(format!(
            "mica-cli {} (type 'list' to see available commands)",
            crate::VERSION
        ));
        while !self.ctx.exit_requested {
            let Some(line) = ConsoleHelper::read_user_input(PROMPT, false)? else {
                break;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            for output in run_line(&mut self.ctx, trimmed) {
                println!("{output}");
            }
        }
        Ok(())
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.ctx
    }
}
