//! Command instantiation and line-level dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use crate::console_service::{
    cursor_parameter, parse_line, CommandDeclaration, CommandSpec, ContractMethod, ParseResult,
};
use crate::env::ExecutionContext;

use super::{contract, node, wallet};

/// An executable command instance: a closed set of built-ins plus the
/// dynamic contract-call variant.
#[derive(Debug)]
pub enum Command {
    Help { topic: String },
    List,
    Version,
    Exit,
    Balance { address: String },
    Transfer { to: String, amount: String, memo: String },
    CreateWallet { path: String },
    OpenWallet { path: String },
    CloseWallet,
    ShowAddress,
    Connect { endpoint: String },
    Disconnect,
    SetContract { name: String, address: String, path: String },
    Contracts,
    ContractCall {
        method: Arc<ContractMethod>,
        args: HashMap<String, String>,
    },
}

/// The declaration's factory step: builds the executable command object
/// from the parsed argument values.
pub fn instantiate(declaration: &CommandDeclaration, result: &ParseResult) -> Result<Command> {
    let arg = |name: &str| -> Result<String> {
        result
            .args
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("missing parameter: {name}"))
    };
    Ok(match &declaration.spec {
        CommandSpec::Help => Command::Help {
            topic: arg("command")?,
        },
        CommandSpec::List => Command::List,
        CommandSpec::Version => Command::Version,
        CommandSpec::Exit => Command::Exit,
        CommandSpec::Balance => Command::Balance {
            address: arg("address")?,
        },
        CommandSpec::Transfer => Command::Transfer {
            to: arg("to")?,
            amount: arg("amount")?,
            memo: arg("memo")?,
        },
        CommandSpec::CreateWallet => Command::CreateWallet { path: arg("path")? },
        CommandSpec::OpenWallet => Command::OpenWallet { path: arg("path")? },
        CommandSpec::CloseWallet => Command::CloseWallet,
        CommandSpec::ShowAddress => Command::ShowAddress,
        CommandSpec::Connect => Command::Connect {
            endpoint: arg("endpoint")?,
        },
        CommandSpec::Disconnect => Command::Disconnect,
        CommandSpec::SetContract => Command::SetContract {
            name: arg("name")?,
            address: arg("address")?,
            path: arg("path")?,
        },
        CommandSpec::Contracts => Command::Contracts,
        CommandSpec::ContractCall(method) => Command::ContractCall {
            method: Arc::clone(method),
            args: result.args.clone(),
        },
    })
}

impl Command {
    /// Runs the command against the shared context, collecting its output
    /// lines.
    pub fn run(self, ctx: &mut ExecutionContext) -> Result<Vec<String>> {
        match self {
            Command::Help { topic } => help(ctx, &topic),
            Command::List => Ok(ctx.registry.list_pretty()),
            Command::Version => Ok(vec![format!("mica-cli {}", crate::VERSION)]),
            Command::Exit => {
                ctx.exit_requested = true;
                Ok(Vec::new())
            }
            Command::Balance { address } => wallet::balance(ctx, &address),
            Command::Transfer { to, amount, memo } => wallet::transfer(ctx, &to, &amount, &memo),
            Command::CreateWallet { path } => wallet::create(ctx, &path),
            Command::OpenWallet { path } => wallet::open(ctx, &path),
            Command::CloseWallet => wallet::close(ctx),
            Command::ShowAddress => wallet::show_address(ctx),
            Command::Connect { endpoint } => node::connect(ctx, &endpoint),
            Command::Disconnect => node::disconnect(ctx),
            Command::SetContract {
                name,
                address,
                path,
            } => contract::set_contract(ctx, &name, &address, &path),
            Command::Contracts => contract::list_contracts(ctx),
            Command::ContractCall { method, args } => contract::call(ctx, &method, &args),
        }
    }
}

/// Executes one parsed command: factory, then run. Results without a
/// declaration are failed parses and must not reach this point.
pub fn execute(ctx: &mut ExecutionContext, result: &ParseResult) -> Result<Vec<String>> {
    let Some(declaration) = result.declaration.clone() else {
        bail!("cannot execute unparsed command: {}", result.command_name);
    };
    instantiate(&declaration, result)?.run(ctx)
}

/// Runs every command a line produced, in order. A failing command
/// contributes its error as a single output line and does not stop its
/// siblings. A parse failure appends its error after the output of the
/// commands that did parse, plus an interactive hint when the failing
/// command's argument cursor sits on a declared parameter.
pub fn run_line(ctx: &mut ExecutionContext, line: &str) -> Vec<String> {
    let outcome = parse_line(line, &ctx.registry);
    let mut output = Vec::new();
    for result in &outcome.results {
        match execute(ctx, result) {
            Ok(lines) => output.extend(lines),
            Err(err) => output.push(err.to_string()),
        }
    }
    if let Some(failure) = &outcome.failure {
        output.push(failure.error.to_string());
        if let Some(parameter) = failure.partial.as_ref().and_then(cursor_parameter) {
            output.push(format!("expecting parameter: {}", parameter.name));
        }
    }
    output
}

fn help(ctx: &ExecutionContext, topic: &str) -> Result<Vec<String>> {
    if topic.is_empty() {
        let mut lines = vec!["commands:".to_string()];
        lines.extend(ctx.registry.list_pretty());
        lines.push("separate multiple commands with ';'".to_string());
        return Ok(lines);
    }
    let declaration = ctx
        .registry
        .get(topic)
        .ok_or_else(|| anyhow!("unknown command: {topic}"))?;
    let mut usage = format!("usage: {}", declaration.name);
    for arg in &declaration.args {
        if arg.optional {
            usage.push_str(&format!(" [{}]", arg.name));
        } else {
            usage.push_str(&format!(" <{}>", arg.name));
        }
    }
    let mut lines = vec![usage];
    if !declaration.description.is_empty() {
        lines.push(declaration.description.clone());
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin_registry;

    fn context() -> ExecutionContext {
        ExecutionContext::new(builtin_registry())
    }

    #[test]
    fn exit_sets_the_flag_without_output() {
        let mut ctx = context();
        let output = run_line(&mut ctx, "exit");
        assert!(output.is_empty());
        assert!(ctx.exit_requested);
    }

    #[test]
    fn a_failing_command_does_not_stop_its_siblings() {
        let mut ctx = context();
        // `close` fails (no wallet), `version` still runs.
        let output = run_line(&mut ctx, "close; version");
        assert_eq!(output.len(), 2);
        assert_eq!(output[0], "no wallet is open");
        assert!(output[1].starts_with("mica-cli "));
    }

    #[test]
    fn parse_errors_come_after_the_completed_prefix() {
        let mut ctx = context();
        let output = run_line(&mut ctx, "version; fooo");
        assert_eq!(output.len(), 2);
        assert!(output[0].starts_with("mica-cli "));
        assert_eq!(output[1], "unknown command: fooo");
    }

    #[test]
    fn missing_parameter_hints_at_the_expected_argument() {
        let mut ctx = context();
        let output = run_line(&mut ctx, "balance ");
        assert_eq!(
            output,
            vec![
                "missing parameter: address".to_string(),
                "expecting parameter: address".to_string()
            ]
        );
    }

    #[test]
    fn help_renders_usage_with_optional_brackets() {
        let mut ctx = context();
        let output = run_line(&mut ctx, "help transfer");
        assert_eq!(output[0], "usage: transfer <to> <amount> [memo]");
    }

    #[test]
    fn help_without_topic_lists_commands() {
        let mut ctx = context();
        let output = run_line(&mut ctx, "help");
        assert_eq!(output[0], "commands:");
        assert!(output.iter().any(|l| l.starts_with("balance")));
    }
}
