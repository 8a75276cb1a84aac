use thiserror::Error;

/// ABI and message-binding errors.
///
/// Every variant renders as a single `cause: context` line, which is the
/// form the console prints to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("abi parse error: {0}")]
    Parse(String),

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),

    #[error("invalid entry point: {0}")]
    InvalidEntryPoint(String),

    #[error("duplicate method: {0}")]
    DuplicateMethod(String),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid value for field: {0}")]
    InvalidValue(String),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type for ABI operations.
pub type Result<T> = std::result::Result<T, AbiError>;
