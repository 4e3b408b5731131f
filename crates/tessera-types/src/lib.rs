//! Shared identity, block, and selection types for Tessera.
//!
//! This crate is the leaf of the workspace: typed IDs, block records,
//! container template locks, per-block edit modes, and the selection value
//! the block settings menu is rendered for. It has **no internal tessera
//! dependencies**.
//!
//! # Relationships
//!
//! ```text
//! Container (Option<BlockId>, None = document root)
//!     └── template lock (TemplateLock)
//!     └── ordered children (BlockRecord)
//!             └── inner_blocks (nested containers)
//!
//! Selection
//!     └── ordered BlockIds (non-empty)
//!     └── root: the container scoping the index space
//! ```
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`BlockId`]       | Opaque block instance identifier             |
//! | [`ReusableId`]    | Shared reusable-block definition identifier  |
//! | [`BlockRecord`]   | Block instance (name + attributes + inner)   |
//! | [`TemplateLock`]  | Container-level structural edit lock         |
//! | [`BlockMode`]     | Visual or raw-markup editing mode            |
//! | [`Selection`]     | Ordered selected ids + container scope       |
//! |-------------------|----------------------------------------------|

pub mod block;
pub mod ids;
pub mod lock;
pub mod selection;

// Re-export primary types at crate root for convenience.
pub use block::{BlockMode, BlockRecord, ReusableBlock};
pub use ids::{BlockId, ReusableId};
pub use lock::TemplateLock;
pub use selection::{Selection, SelectionError};
