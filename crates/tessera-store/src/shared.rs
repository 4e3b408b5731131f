//! Shareable store handle.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tessera_types::{BlockId, BlockMode, BlockRecord, ReusableBlock, ReusableId, TemplateLock};

use crate::{EditorStore, MemoryStore, Result};

/// Cloneable handle to one [`MemoryStore`].
///
/// Every clone sees the same state. Writes take the lock for the duration of
/// one store call, so mutations from different owners are serialized.
#[derive(Clone, Default)]
pub struct SharedStore(Arc<RwLock<MemoryStore>>);

impl SharedStore {
    pub fn new(store: MemoryStore) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// Read access for accessors not on [`EditorStore`].
    pub fn read(&self) -> RwLockReadGuard<'_, MemoryStore> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, MemoryStore> {
        self.0.write()
    }
}

impl EditorStore for SharedStore {
    fn get_block(&self, id: BlockId) -> Option<BlockRecord> {
        self.0.read().get_block(id)
    }

    fn get_blocks_by_client_id(&self, ids: &[BlockId]) -> Vec<Option<BlockRecord>> {
        self.0.read().get_blocks_by_client_id(ids)
    }

    fn get_block_index(&self, id: BlockId, root: Option<BlockId>) -> Option<usize> {
        self.0.read().get_block_index(id, root)
    }

    fn get_block_root(&self, id: BlockId) -> Option<Option<BlockId>> {
        self.0.read().get_block_root(id)
    }

    fn get_template_lock(&self, root: Option<BlockId>) -> Option<TemplateLock> {
        self.0.read().get_template_lock(root)
    }

    fn get_block_mode(&self, id: BlockId) -> BlockMode {
        self.0.read().get_block_mode(id)
    }

    fn get_reusable_block(&self, id: ReusableId) -> Option<ReusableBlock> {
        self.0.read().get_reusable_block(id)
    }

    fn insert_blocks(&mut self, blocks: Vec<BlockRecord>, index: usize, root: Option<BlockId>) -> Result<()> {
        self.0.write().insert_blocks(blocks, index, root)
    }

    fn remove_blocks(&mut self, ids: &[BlockId]) -> Result<()> {
        self.0.write().remove_blocks(ids)
    }

    fn select_block(&mut self, id: BlockId) -> Result<()> {
        self.0.write().select_block(id)
    }

    fn multi_select(&mut self, start: BlockId, end: BlockId) -> Result<()> {
        self.0.write().multi_select(start, end)
    }

    fn toggle_block_mode(&mut self, id: BlockId) -> Result<()> {
        self.0.write().toggle_block_mode(id)
    }

    fn replace_blocks(&mut self, ids: &[BlockId], blocks: Vec<BlockRecord>) -> Result<()> {
        self.0.write().replace_blocks(ids, blocks)
    }

    fn convert_block_to_reusable(&mut self, id: BlockId) -> Result<ReusableId> {
        self.0.write().convert_block_to_reusable(id)
    }

    fn convert_block_to_static(&mut self, id: BlockId) -> Result<()> {
        self.0.write().convert_block_to_static(id)
    }

    fn delete_reusable_block(&mut self, id: ReusableId) -> Result<()> {
        self.0.write().delete_reusable_block(id)
    }
}
