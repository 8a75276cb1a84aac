//! TOML configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    /// JSON-RPC endpoint to connect to at startup.
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Wallet file to open at startup.
    pub path: Option<String>,
}

impl Config {
    /// Loads the file when present; a missing file means defaults, but a
    /// present-and-broken file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = Config::load(None).unwrap();
        assert!(config.node.endpoint.is_none());
        assert!(config.wallet.path.is_none());
    }

    #[test]
    fn parses_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mica.toml");
        std::fs::write(
            &path,
            "[node]\nendpoint = \"http://localhost:9335\"\n[wallet]\npath = \"w.json\"\n",
        )
        .unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.node.endpoint.as_deref(), Some("http://localhost:9335"));
        assert_eq!(config.wallet.path.as_deref(), Some("w.json"));
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mica.toml");
        std::fs::write(&path, "not toml [").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
