//! Contract interface handling for the Mica console.
//!
//! A registered contract is described by an externally supplied ABI
//! document: a list of methods, each pointing at a structured message type
//! defined in the document's own type table. This crate owns everything
//! between that document and the console's flat command-line arguments:
//! resolving type references into owned [`MessageSchema`] trees, rebuilding
//! structured messages from parsed argument strings, and decoding call
//! results back into printable form.

pub mod bind;
pub mod contract;
pub mod document;
pub mod error;
pub mod schema;
pub mod value;

pub use bind::bind;
pub use contract::{ContractInfo, MethodInfo};
pub use document::{AbiDocument, FieldDef, MethodDef, TypeDef};
pub use error::{AbiError, Result};
pub use schema::{FieldKind, FieldSpec, FieldType, MessageSchema};
pub use value::StructuredValue;
