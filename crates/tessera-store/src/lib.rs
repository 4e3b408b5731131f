//! Editor block-state store for Tessera.
//!
//! [`EditorStore`] is the read + write interface UI components are given.
//! Components never reach into a store directly; everything goes through
//! the trait so hosts can plug in their own state container.
//!
//! [`MemoryStore`] is the in-process implementation: ordered children per
//! container, per-container template locks, the current block selection,
//! per-block editing modes, and reusable block definitions.
//!
//! # Lock enforcement
//!
//! Structural writes (`insert_blocks`, `remove_blocks`, `replace_blocks`,
//! reusable conversions, and `delete_reusable_block` detaching instances)
//! fail with [`StoreError::Locked`] when the target container carries a
//! template lock. Callers may pre-check, but the store is the authority.

mod error;
mod memory;
mod shared;
mod store;

pub use error::StoreError;
pub use memory::{MemoryStore, SelectionState};
pub use shared::SharedStore;
pub use store::EditorStore;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Title given to reusable blocks created from a block.
pub const UNTITLED_REUSABLE_TITLE: &str = "Untitled Reusable Block";
