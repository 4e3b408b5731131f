//! Block type registry and block factory for Tessera.
//!
//! The registry answers "what does this block type support?" and the factory
//! produces new block instances from existing ones. Neither knows anything
//! about documents or selection; that is the store's job.
//!
//! # Supports
//!
//! Each [`BlockType`] declares optional feature flags. Lookups go through
//! [`BlockRegistry::has_block_support`] with a caller-chosen default, so an
//! unregistered type (or an unset flag) falls back to whatever the call site
//! considers safe.

mod error;
mod factory;
mod raw;
mod registry;

pub use error::RegistryError;
pub use factory::clone_block;
pub use raw::raw_handler;
pub use registry::{BlockRegistry, BlockType, Support, Supports};

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Well-known core block type names.
pub mod names {
    pub const PARAGRAPH: &str = "core/paragraph";
    pub const HEADING: &str = "core/heading";
    pub const HTML: &str = "core/html";
    pub const FREEFORM: &str = "core/freeform";
    pub const MORE: &str = "core/more";
    pub const GROUP: &str = "core/group";
    pub use tessera_types::block::REUSABLE_BLOCK_NAME as REUSABLE;
}
