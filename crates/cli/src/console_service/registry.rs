//! Command declarations and the name-indexed registry.

use std::sync::Arc;

use indexmap::IndexMap;
use mica_abi::MessageSchema;

/// How one positional token is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Base58 account address.
    Address,
    /// Quoted or bare text.
    FreeString,
    /// A command-style word (used by `help` and contract names).
    CommandName,
    /// Unsigned decimal, fractional part allowed.
    DecimalAmount,
    /// Hex-encoded byte string.
    HexBytes,
    /// Base58-encoded byte string.
    Base58Bytes,
}

/// Declares one positional parameter of a command.
#[derive(Debug, Clone)]
pub struct CommandArgSpec {
    pub name: String,
    pub kind: ArgKind,
    pub optional: bool,
}

impl CommandArgSpec {
    pub fn required(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    /// Only safe on the last declared parameter: an optional miss is
    /// detected at the terminator, so anything after it would never be
    /// reached.
    pub fn optional(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: true,
        }
    }
}

/// A contract method captured at registration time. One of these backs
/// every dynamically generated `<contract>.<method>` command.
#[derive(Debug, Clone)]
pub struct ContractMethod {
    pub contract: String,
    pub method: String,
    pub address: Vec<u8>,
    pub entry_point: u32,
    pub read_only: bool,
    pub params: MessageSchema,
    pub returns: Option<MessageSchema>,
}

/// What a declaration executes. Built-ins are a closed set; every
/// registered contract method shares the one dynamic variant, so the
/// dispatcher stays exhaustive without any function-pointer indirection.
#[derive(Debug, Clone)]
pub enum CommandSpec {
    Help,
    List,
    Version,
    Exit,
    Balance,
    Transfer,
    CreateWallet,
    OpenWallet,
    CloseWallet,
    ShowAddress,
    Connect,
    Disconnect,
    SetContract,
    Contracts,
    ContractCall(Arc<ContractMethod>),
}

/// A named, described, typed command template.
#[derive(Debug, Clone)]
pub struct CommandDeclaration {
    pub name: String,
    pub description: String,
    pub hidden: bool,
    pub args: Vec<CommandArgSpec>,
    pub spec: CommandSpec,
}

/// Name-indexed declaration table. Insertion order is kept so that
/// registration order stays observable; listings sort alphabetically.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Arc<CommandDeclaration>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unconditionally. Name uniqueness is the caller's contract;
    /// the contract-registration path checks before adding.
    pub fn add_command(&mut self, declaration: CommandDeclaration) {
        self.commands
            .insert(declaration.name.clone(), Arc::new(declaration));
    }

    pub fn get(&self, name: &str) -> Option<Arc<CommandDeclaration>> {
        self.commands.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CommandDeclaration>> {
        self.commands.values()
    }

    /// Visible command names in alphabetical order.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .values()
            .filter(|d| !d.hidden)
            .map(|d| d.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Two-column listing: name left-justified to the longest visible
    /// name, then the description.
    pub fn list_pretty(&self) -> Vec<String> {
        let width = self
            .commands
            .values()
            .filter(|d| !d.hidden)
            .map(|d| d.name.len())
            .max()
            .unwrap_or(0);
        self.list()
            .into_iter()
            .map(|name| {
                let description = self
                    .commands
                    .get(&name)
                    .map(|d| d.description.as_str())
                    .unwrap_or("");
                format!("{name:<width$}  {description}")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(name: &str, hidden: bool) -> CommandDeclaration {
        CommandDeclaration {
            name: name.to_string(),
            description: format!("{name} description"),
            hidden,
            args: Vec::new(),
            spec: CommandSpec::List,
        }
    }

    #[test]
    fn list_is_alphabetical_and_skips_hidden() {
        let mut registry = CommandRegistry::new();
        registry.add_command(declaration("zeta", false));
        registry.add_command(declaration("alpha", false));
        registry.add_command(declaration("ghost", true));
        assert_eq!(registry.list(), vec!["alpha", "zeta"]);
        let pretty = registry.list_pretty();
        assert_eq!(pretty.len(), 2);
        assert!(pretty.iter().all(|line| !line.contains("ghost")));
    }

    #[test]
    fn pretty_listing_pads_to_longest_visible_name() {
        let mut registry = CommandRegistry::new();
        registry.add_command(declaration("ab", false));
        registry.add_command(declaration("longer", false));
        let pretty = registry.list_pretty();
        assert_eq!(pretty[0], "ab      ab description");
        assert_eq!(pretty[1], "longer  longer description");
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = CommandRegistry::new();
        registry.add_command(declaration("one", false));
        assert!(registry.get("one").is_some());
        assert!(registry.get("two").is_none());
        assert!(registry.contains("one"));
    }
}
