//! Error types for store operations.

use thiserror::Error;

use tessera_types::{BlockId, ReusableId, TemplateLock};

/// Errors that can occur during store writes.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Block not found in the document.
    #[error("block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Container forbids the structural change.
    #[error("container {container:?} is locked ({lock})")]
    Locked {
        container: Option<BlockId>,
        lock: TemplateLock,
    },

    /// Insert position out of bounds.
    #[error("insert index {index} out of bounds for container with {len} blocks")]
    InvalidIndex { index: usize, len: usize },

    /// Block ID already present.
    #[error("block already exists: {0:?}")]
    DuplicateBlock(BlockId),

    /// Reusable block definition not found.
    #[error("reusable block not found: {0:?}")]
    ReusableNotFound(ReusableId),

    /// Block is not a reusable block instance.
    #[error("block {0:?} is not a reusable block instance")]
    NotReusable(BlockId),

    /// Blocks in one operation must share a container.
    #[error("blocks span more than one container")]
    MixedContainers,
}
