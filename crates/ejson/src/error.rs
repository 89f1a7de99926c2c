//! Error taxonomy for the EJSON codec.

use thiserror::Error;

/// Errors produced by EJSON operations.
///
/// Every failure is synchronous and leaves no partial result. Callers
/// branch on the variant, not on the message text.
#[derive(Debug, Error)]
pub enum EjsonError {
    /// A recognized tag shape carried a payload of the wrong type, or an
    /// entry point received an argument it cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying JSON text failed to parse.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Decode met a `$type` tag with no registered adapter for the name.
    #[error("custom EJSON type {0} is not defined")]
    UnknownType(String),

    /// Encode, clone, or stringify met a value with no classifiable kind.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Encode descended past the recursion budget, which only happens
    /// when a custom type expands into itself transitively.
    #[error("converting circular structure to EJSON")]
    CircularStructure,

    /// `add_type` tried to rebind a name already taken by a different
    /// adapter, or to claim a reserved tag name.
    #[error("type {0} already present")]
    DuplicateType(String),
}
