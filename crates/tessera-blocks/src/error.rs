//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur while registering block types.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A type with this name is already registered.
    #[error("block type already registered: {0}")]
    AlreadyRegistered(String),

    /// Names must be `namespace/name`, lowercase.
    #[error("invalid block type name: {0:?}")]
    InvalidName(String),

    /// No type registered under this name.
    #[error("block type not registered: {0}")]
    NotRegistered(String),
}
