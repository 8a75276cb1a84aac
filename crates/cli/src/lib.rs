//! Mica console client.
//!
//! An interactive line-oriented interpreter: each input line holds one or
//! more `;`-separated commands which are parsed against a registry of
//! typed command declarations and executed against a shared context
//! holding the wallet session, the remote node and the registered
//! contracts. Contracts registered from ABI documents contribute
//! dynamically generated `<contract>.<method>` commands.

/// Client version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod args;
pub mod commands;
pub mod config;
pub mod console_service;
pub mod contracts;
pub mod env;
pub mod rpc;
pub mod service;
pub mod wallet;

pub use args::CliArgs;
pub use service::MainService;
