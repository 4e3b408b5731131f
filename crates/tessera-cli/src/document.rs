//! RON document files: block types, blocks, locks and reusable definitions.
//!
//! ```ron
//! (
//!     block_types: [
//!         (name: "acme/banner", title: "Banner", supports: (multiple: false)),
//!     ],
//!     template_lock: None,
//!     blocks: [
//!         (name: "core/paragraph", attributes: {"content": "Hello"}),
//!         (name: "acme/banner"),
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use ron::extensions::Extensions;
use serde::Deserialize;
use tracing::debug;

use tessera_blocks::{BlockRegistry, BlockType};
use tessera_store::MemoryStore;
use tessera_types::{BlockId, BlockRecord, ReusableBlock, TemplateLock};

/// A lock on a nested container, addressed by block id.
#[derive(Clone, Debug, Deserialize)]
pub struct ContainerLock {
    pub container: BlockId,
    pub lock: TemplateLock,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocumentFile {
    /// Registered on top of the core types, replacing same-named ones.
    pub block_types: Vec<BlockType>,
    /// Lock on the document root.
    pub template_lock: Option<TemplateLock>,
    pub container_locks: Vec<ContainerLock>,
    pub reusable_blocks: Vec<ReusableBlock>,
    pub blocks: Vec<BlockRecord>,
}

impl DocumentFile {
    /// Parse a document. Optional fields take bare values (`multiple: false`).
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Core types plus this document's declared types.
    pub fn registry(&self) -> Result<BlockRegistry> {
        let mut registry = BlockRegistry::with_core_types();
        for block_type in &self.block_types {
            if registry.get_block_type(&block_type.name).is_some() {
                registry.unregister(&block_type.name)?;
            }
            registry.register(block_type.clone())?;
        }
        Ok(registry)
    }

    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::from_blocks(self.blocks)?;
        store.set_template_lock(None, self.template_lock)?;
        for ContainerLock { container, lock } in self.container_locks {
            store
                .set_template_lock(Some(container), Some(lock))
                .with_context(|| format!("locking container {container}"))?;
        }
        for reusable in self.reusable_blocks {
            store.add_reusable_block(reusable);
        }
        debug!(blocks = store.block_count(), "loaded document");
        Ok(store)
    }
}
