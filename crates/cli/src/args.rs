//! Process command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mica-cli",
    version,
    about = "Interactive console client for a Mica chain node"
)]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Wallet file to open at startup (passphrase is prompted)
    #[arg(short = 'w', long = "wallet", value_name = "FILE")]
    pub wallet: Option<PathBuf>,

    /// Node JSON-RPC endpoint, overrides the config file
    #[arg(short = 'e', long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Execute one command line and exit instead of starting the shell
    #[arg(short = 'x', long = "execute", value_name = "LINE")]
    pub execute: Option<String>,

    /// Log verbosity
    #[arg(long = "verbose", value_enum, default_value = "warn")]
    pub verbose: LogLevel,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::parse_from(["mica-cli"]);
        assert_eq!(args.verbose, LogLevel::Warn);
        assert!(args.config.is_none());
        assert!(args.execute.is_none());
    }

    #[test]
    fn endpoint_and_execute() {
        let args = CliArgs::parse_from([
            "mica-cli",
            "--endpoint",
            "http://localhost:9335",
            "-x",
            "version",
        ]);
        assert_eq!(args.endpoint.as_deref(), Some("http://localhost:9335"));
        assert_eq!(args.execute.as_deref(), Some("version"));
    }
}
