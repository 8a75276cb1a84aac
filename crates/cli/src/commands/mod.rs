//! Built-in commands and the dispatcher.

pub mod command_line;
mod contract;
mod node;
mod wallet;

pub use command_line::{execute, instantiate, run_line, Command};

use crate::console_service::{
    ArgKind, CommandArgSpec, CommandDeclaration, CommandRegistry, CommandSpec,
};

/// Builds the registry of built-in commands. Contract registration adds
/// to this table at runtime; nothing is ever removed.
pub fn builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    let mut add = |name: &str,
                   description: &str,
                   hidden: bool,
                   args: Vec<CommandArgSpec>,
                   spec: CommandSpec| {
        registry.add_command(CommandDeclaration {
            name: name.to_string(),
            description: description.to_string(),
            hidden,
            args,
            spec,
        });
    };

    add(
        "help",
        "show usage for one command, or general help",
        false,
        vec![CommandArgSpec::optional("command", ArgKind::CommandName)],
        CommandSpec::Help,
    );
    add("list", "list available commands", false, Vec::new(), CommandSpec::List);
    add("version", "show client version", false, Vec::new(), CommandSpec::Version);
    add("exit", "leave the console", false, Vec::new(), CommandSpec::Exit);
    add("quit", "leave the console", true, Vec::new(), CommandSpec::Exit);
    add(
        "balance",
        "show the balance of an account",
        false,
        vec![CommandArgSpec::required("address", ArgKind::Address)],
        CommandSpec::Balance,
    );
    add(
        "transfer",
        "send tokens from the open wallet",
        false,
        vec![
            CommandArgSpec::required("to", ArgKind::Address),
            CommandArgSpec::required("amount", ArgKind::DecimalAmount),
            CommandArgSpec::optional("memo", ArgKind::FreeString),
        ],
        CommandSpec::Transfer,
    );
    add(
        "create",
        "create a new wallet file",
        false,
        vec![CommandArgSpec::required("path", ArgKind::FreeString)],
        CommandSpec::CreateWallet,
    );
    add(
        "open",
        "open a wallet file",
        false,
        vec![CommandArgSpec::required("path", ArgKind::FreeString)],
        CommandSpec::OpenWallet,
    );
    add("close", "close the open wallet", false, Vec::new(), CommandSpec::CloseWallet);
    add(
        "address",
        "show the current wallet address",
        false,
        Vec::new(),
        CommandSpec::ShowAddress,
    );
    add(
        "connect",
        "connect to a node endpoint",
        false,
        vec![CommandArgSpec::required("endpoint", ArgKind::FreeString)],
        CommandSpec::Connect,
    );
    add("disconnect", "drop the node connection", false, Vec::new(), CommandSpec::Disconnect);
    add(
        "setcontract",
        "register a contract from an ABI file",
        false,
        vec![
            CommandArgSpec::required("name", ArgKind::CommandName),
            CommandArgSpec::required("address", ArgKind::Base58Bytes),
            CommandArgSpec::required("path", ArgKind::FreeString),
        ],
        CommandSpec::SetContract,
    );
    add(
        "contracts",
        "list registered contracts and their methods",
        false,
        Vec::new(),
        CommandSpec::Contracts,
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_a_hidden_alias() {
        let registry = builtin_registry();
        assert!(registry.get("quit").unwrap().hidden);
        assert!(!registry.list().contains(&"quit".to_string()));
        assert!(registry.list().contains(&"exit".to_string()));
    }

    #[test]
    fn listing_is_sorted() {
        let registry = builtin_registry();
        let list = registry.list();
        let mut sorted = list.clone();
        sorted.sort();
        assert_eq!(list, sorted);
    }
}
