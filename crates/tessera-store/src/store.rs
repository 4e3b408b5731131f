//! The store interface handed to UI components.

use tessera_types::{BlockId, BlockMode, BlockRecord, ReusableBlock, ReusableId, TemplateLock};

use crate::Result;

/// Read + write access to editor block state.
///
/// Object safe: components take `&dyn EditorStore` for rendering and
/// `&mut dyn EditorStore` for dispatching.
pub trait EditorStore {
    // =========================================================================
    // Selectors
    // =========================================================================

    /// Resolve one block, including its nested blocks.
    fn get_block(&self, id: BlockId) -> Option<BlockRecord>;

    /// Resolve several blocks, preserving order. Unknown ids resolve to `None`.
    fn get_blocks_by_client_id(&self, ids: &[BlockId]) -> Vec<Option<BlockRecord>> {
        ids.iter().map(|id| self.get_block(*id)).collect()
    }

    /// Position of `id` among the children of `root`.
    fn get_block_index(&self, id: BlockId, root: Option<BlockId>) -> Option<usize>;

    /// The container the block lives in. `Some(None)` is the document root.
    fn get_block_root(&self, id: BlockId) -> Option<Option<BlockId>>;

    /// Template lock on a container (`None` = document root).
    fn get_template_lock(&self, root: Option<BlockId>) -> Option<TemplateLock>;

    /// Current editing mode of a block.
    fn get_block_mode(&self, id: BlockId) -> BlockMode;

    fn get_reusable_block(&self, id: ReusableId) -> Option<ReusableBlock>;

    // =========================================================================
    // Actions
    // =========================================================================

    /// Insert blocks at `index` within `root`, then select the last one.
    fn insert_blocks(&mut self, blocks: Vec<BlockRecord>, index: usize, root: Option<BlockId>) -> Result<()>;

    /// Remove blocks (and their nested blocks).
    fn remove_blocks(&mut self, ids: &[BlockId]) -> Result<()>;

    /// Make `id` the sole selected block.
    fn select_block(&mut self, id: BlockId) -> Result<()>;

    /// Select the range from `start` to `end`.
    fn multi_select(&mut self, start: BlockId, end: BlockId) -> Result<()>;

    /// Switch a block between visual and raw-markup editing.
    fn toggle_block_mode(&mut self, id: BlockId) -> Result<()>;

    /// Replace `ids` (contiguous or not, same container) with `blocks` at the
    /// position of the first id.
    fn replace_blocks(&mut self, ids: &[BlockId], blocks: Vec<BlockRecord>) -> Result<()>;

    /// Move a block into a new reusable definition, leaving an instance behind.
    fn convert_block_to_reusable(&mut self, id: BlockId) -> Result<ReusableId>;

    /// Replace a reusable instance with copies of its definition's blocks.
    fn convert_block_to_static(&mut self, id: BlockId) -> Result<()>;

    /// Delete a definition and every instance referring to it.
    fn delete_reusable_block(&mut self, id: ReusableId) -> Result<()>;
}
