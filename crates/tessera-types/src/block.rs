//! Block records, editing modes, and reusable block definitions.
//!
//! A [`BlockRecord`] is one block instance: an identity, a type name such as
//! `core/paragraph`, a free-form attribute map, and nested children. Type
//! behavior (what a block *supports*) lives in the block registry, not here.
//!
//! Reusable blocks are shared definitions stored apart from the document. A
//! document refers to one through an instance block named
//! [`REUSABLE_BLOCK_NAME`] whose `ref` attribute holds the [`ReusableId`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::ids::{BlockId, ReusableId};

/// Type name of a reusable block instance.
pub const REUSABLE_BLOCK_NAME: &str = "core/block";

/// Attribute key holding the [`ReusableId`] on a reusable block instance.
pub const REUSABLE_REF_ATTRIBUTE: &str = "ref";

/// A block instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Instance identity. Never shared between two records in a document.
    #[serde(default)]
    pub id: BlockId,
    /// Block type name (`namespace/name`).
    pub name: String,
    /// Arbitrary block attributes.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Nested blocks; this record is their container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_blocks: Vec<BlockRecord>,
}

impl BlockRecord {
    /// Create a block with a fresh id and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            name: name.into(),
            attributes: serde_json::Map::new(),
            inner_blocks: Vec::new(),
        }
    }

    /// Set an attribute (builder style).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the nested blocks (builder style).
    pub fn with_inner_blocks(mut self, inner: Vec<BlockRecord>) -> Self {
        self.inner_blocks = inner;
        self
    }

    /// String attribute accessor.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    /// Check if this is a reusable block instance.
    pub fn is_reusable(&self) -> bool {
        self.name == REUSABLE_BLOCK_NAME
    }

    /// The referenced definition, if this is a reusable instance with a
    /// well-formed `ref` attribute.
    pub fn reusable_ref(&self) -> Option<ReusableId> {
        if !self.is_reusable() {
            return None;
        }
        self.attribute_str(REUSABLE_REF_ATTRIBUTE)
            .and_then(|s| ReusableId::parse(s).ok())
    }

    /// Depth-first walk over this block and every nested block.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a BlockRecord)) {
        f(self);
        for inner in &self.inner_blocks {
            inner.walk(f);
        }
    }
}

/// How a block is currently edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockMode {
    /// Rich visual editing.
    #[default]
    Visual,
    /// Raw markup editing.
    Html,
}

impl BlockMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            BlockMode::Visual => BlockMode::Html,
            BlockMode::Html => BlockMode::Visual,
        }
    }
}

/// A shared, independently stored block definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReusableBlock {
    pub id: ReusableId,
    pub title: String,
    pub blocks: Vec<BlockRecord>,
}
