//! Block factory.

use tessera_types::{BlockId, BlockRecord};

/// Deep-copy a block under new identities.
///
/// The clone and every nested block get fresh [`BlockId`]s; name and
/// attributes are copied as-is.
pub fn clone_block(block: &BlockRecord) -> BlockRecord {
    BlockRecord {
        id: BlockId::new(),
        name: block.name.clone(),
        attributes: block.attributes.clone(),
        inner_blocks: block.inner_blocks.iter().map(clone_block).collect(),
    }
}
