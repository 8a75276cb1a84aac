//! Line parser.
//!
//! Consumes one full input line and yields the sequence of command
//! invocations it contains. Parsing never throws away work: commands that
//! parsed completely before a failure are always handed back, and the
//! failing command's partial state rides along for diagnostics.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::registry::{ArgKind, CommandArgSpec, CommandDeclaration, CommandRegistry};
use super::scanner::{Scanner, Termination};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command name")]
    EmptyCommandName,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("invalid parameter: {name}")]
    InvalidParameter { name: String, kind: ArgKind },

    #[error("unterminated string")]
    UnterminatedString,
}

/// One parsed command invocation.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub command_name: String,
    /// Matched argument text keyed by parameter name.
    pub args: HashMap<String, String>,
    pub declaration: Option<Arc<CommandDeclaration>>,
    /// Argument-position cursor for interactive help. Starts at -1 and is
    /// bumped once per whitespace run actually consumed while scanning
    /// arguments, so input with no space after the command name still
    /// reports the previous position.
    pub current_arg_index: i32,
    pub termination: Termination,
}

impl ParseResult {
    fn new(command_name: &str) -> Self {
        Self {
            command_name: command_name.to_string(),
            args: HashMap::new(),
            declaration: None,
            current_arg_index: -1,
            termination: Termination::None,
        }
    }
}

/// The failing command's state, kept for diagnostics only. The partial
/// result is never executed.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub error: ParseError,
    pub partial: Option<ParseResult>,
}

/// Everything one line produced: the commands that parsed completely
/// plus, on failure, the error and however much of the failing command
/// existed when it struck.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub results: Vec<ParseResult>,
    pub failure: Option<ParseFailure>,
}

/// Parses a full line. Commands are separated by `;`; a command whose
/// terminator is not a separator is the last one on the line and any
/// remaining bytes are discarded.
pub fn parse_line(input: &str, registry: &CommandRegistry) -> ParseOutcome {
    let mut scanner = Scanner::new(input);
    let mut results = Vec::new();

    scanner.skip_whitespace();
    while !scanner.at_end() {
        match parse_command(&mut scanner, registry) {
            Ok(result) => {
                let keep_going = result.termination == Termination::Separator;
                results.push(result);
                if !keep_going {
                    break;
                }
                scanner.skip_whitespace();
            }
            Err(failure) => {
                return ParseOutcome {
                    results,
                    failure: Some(failure),
                }
            }
        }
    }

    ParseOutcome {
        results,
        failure: None,
    }
}

fn parse_command(
    scanner: &mut Scanner<'_>,
    registry: &CommandRegistry,
) -> Result<ParseResult, ParseFailure> {
    let name = scanner.command_name();
    if name.is_empty() {
        return Err(ParseFailure {
            error: ParseError::EmptyCommandName,
            partial: None,
        });
    }

    let mut result = ParseResult::new(name);

    let Some(declaration) = registry.get(name) else {
        if scanner.skip_whitespace() {
            result.current_arg_index += 1;
        }
        let error = ParseError::UnknownCommand(name.to_string());
        return Err(ParseFailure {
            error,
            partial: Some(result),
        });
    };
    result.declaration = Some(Arc::clone(&declaration));

    for arg in &declaration.args {
        if scanner.skip_whitespace() {
            result.current_arg_index += 1;
        }

        // A terminator where an argument belongs satisfies an optional
        // parameter with the empty string and fails a required one.
        if scanner.peek_terminator().is_some() {
            if arg.optional {
                result.args.insert(arg.name.clone(), String::new());
                continue;
            }
            return Err(fail(
                result,
                ParseError::MissingParameter {
                    name: arg.name.clone(),
                },
            ));
        }

        let quoted = arg.kind == ArgKind::FreeString && scanner.at_quote();
        let value = if quoted {
            match scanner.quoted_string() {
                Some(text) => text,
                None => return Err(fail(result, ParseError::UnterminatedString)),
            }
        } else {
            let matched = match arg.kind {
                ArgKind::FreeString => scanner.simple_string(),
                ArgKind::Address | ArgKind::Base58Bytes => scanner.base58_token(),
                ArgKind::CommandName => scanner.command_name(),
                ArgKind::DecimalAmount => scanner.amount_token(),
                ArgKind::HexBytes => scanner.hex_token(),
            };
            matched.to_string()
        };

        if !quoted && value.is_empty() {
            return Err(fail(
                result,
                ParseError::InvalidParameter {
                    name: arg.name.clone(),
                    kind: arg.kind,
                },
            ));
        }
        result.args.insert(arg.name.clone(), value);
    }

    if scanner.skip_whitespace() {
        result.current_arg_index += 1;
    }
    result.termination = scanner.take_terminator();
    Ok(result)
}

fn fail(partial: ParseResult, error: ParseError) -> ParseFailure {
    ParseFailure {
        error,
        partial: Some(partial),
    }
}

/// The declared parameter the argument cursor sits on, for interactive
/// "which argument are you expecting" help. Indexing follows the
/// whitespace-skip counter, so it answers `None` until the first skip
/// after the command name has happened.
pub fn cursor_parameter(result: &ParseResult) -> Option<&CommandArgSpec> {
    let declaration = result.declaration.as_ref()?;
    usize::try_from(result.current_arg_index)
        .ok()
        .and_then(|index| declaration.args.get(index))
}
