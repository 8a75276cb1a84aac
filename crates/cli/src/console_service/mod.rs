//! Console machinery: grammar recognizers, command declarations and the
//! line parser.

pub mod console_helper;
pub mod parser;
pub mod registry;
pub mod scanner;

pub use console_helper::ConsoleHelper;
pub use parser::{cursor_parameter, parse_line, ParseError, ParseFailure, ParseOutcome, ParseResult};
pub use registry::{
    ArgKind, CommandArgSpec, CommandDeclaration, CommandRegistry, CommandSpec, ContractMethod,
};
pub use scanner::{Scanner, Termination};
