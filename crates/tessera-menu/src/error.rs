//! Error types for menu operations.

use thiserror::Error;

use tessera_store::StoreError;

/// Errors surfaced by menu dispatch.
#[derive(Error, Debug)]
pub enum MenuError {
    /// The store rejected a write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A fill command named a slot key nobody registered.
    #[error("no fill registered under '{0}'")]
    UnknownFill(String),

    /// A raw chord string could not be parsed.
    #[error("invalid key chord: '{0}'")]
    InvalidChord(String),
}
