//! In-memory editor store.
//!
//! Blocks are stored flat, indexed by id, with each container's child order
//! kept separately. Nested records are rebuilt on read, so callers always get
//! an owned snapshot and never alias store internals.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use tessera_blocks::{clone_block, names};
use tessera_types::{BlockId, BlockMode, BlockRecord, ReusableBlock, ReusableId, TemplateLock};

use crate::{EditorStore, Result, StoreError, UNTITLED_REUSABLE_TITLE};

/// Which blocks are selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    None,
    /// One selected block.
    Single(BlockId),
    /// A contiguous range between two siblings, inclusive.
    Range { start: BlockId, end: BlockId },
}

impl SelectionState {
    fn references(&self, id: BlockId) -> bool {
        match *self {
            SelectionState::None => false,
            SelectionState::Single(s) => s == id,
            SelectionState::Range { start, end } => start == id || end == id,
        }
    }
}

/// Block metadata without children.
#[derive(Clone, Debug)]
struct Node {
    name: String,
    attributes: serde_json::Map<String, serde_json::Value>,
    parent: Option<BlockId>,
}

/// Editor state held in process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Blocks indexed by ID.
    nodes: HashMap<BlockId, Node>,
    /// Child order per container (`None` = document root).
    children: HashMap<Option<BlockId>, Vec<BlockId>>,
    /// Template locks per container.
    locks: HashMap<Option<BlockId>, TemplateLock>,
    /// Blocks not in visual mode.
    modes: HashMap<BlockId, BlockMode>,
    selection: SelectionState,
    reusables: IndexMap<ReusableId, ReusableBlock>,
    /// Bumped on any mutation.
    version: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `blocks` at the document root.
    pub fn from_blocks(blocks: Vec<BlockRecord>) -> Result<Self> {
        let mut store = Self::new();
        store.check_new_ids(&blocks, &HashSet::new())?;
        for (position, block) in blocks.into_iter().enumerate() {
            store.attach(block, None, position);
        }
        Ok(store)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of blocks, nested ones included.
    pub fn block_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Selected block ids in document order.
    pub fn selected_block_ids(&self) -> Vec<BlockId> {
        match self.selection {
            SelectionState::None => Vec::new(),
            SelectionState::Single(id) => vec![id],
            SelectionState::Range { start, end } => {
                let Some(parent) = self.nodes.get(&start).map(|n| n.parent) else {
                    return Vec::new();
                };
                let siblings = self.order(parent);
                let (Some(a), Some(b)) = (
                    siblings.iter().position(|s| *s == start),
                    siblings.iter().position(|s| *s == end),
                ) else {
                    return Vec::new();
                };
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                siblings[lo..=hi].to_vec()
            }
        }
    }

    /// Child ids of a container in order.
    pub fn order(&self, root: Option<BlockId>) -> &[BlockId] {
        self.children.get(&root).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Child blocks of a container in order, nested blocks included.
    pub fn blocks(&self, root: Option<BlockId>) -> Vec<BlockRecord> {
        self.order(root)
            .iter()
            .filter_map(|id| self.record(*id))
            .collect()
    }

    /// Set or clear a container's template lock.
    pub fn set_template_lock(&mut self, root: Option<BlockId>, lock: Option<TemplateLock>) -> Result<()> {
        self.check_container(root)?;
        match lock {
            Some(lock) => self.locks.insert(root, lock),
            None => self.locks.remove(&root),
        };
        self.bump();
        Ok(())
    }

    /// Store a reusable definition.
    pub fn add_reusable_block(&mut self, reusable: ReusableBlock) {
        self.reusables.insert(reusable.id, reusable);
        self.bump();
    }

    pub fn reusable_blocks(&self) -> impl Iterator<Item = &ReusableBlock> {
        self.reusables.values()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn bump(&mut self) {
        self.version += 1;
    }

    fn record(&self, id: BlockId) -> Option<BlockRecord> {
        let node = self.nodes.get(&id)?;
        Some(BlockRecord {
            id,
            name: node.name.clone(),
            attributes: node.attributes.clone(),
            inner_blocks: self.blocks(Some(id)),
        })
    }

    fn check_container(&self, root: Option<BlockId>) -> Result<()> {
        match root {
            Some(id) if !self.nodes.contains_key(&id) => Err(StoreError::BlockNotFound(id)),
            _ => Ok(()),
        }
    }

    fn check_unlocked(&self, root: Option<BlockId>) -> Result<()> {
        match self.locks.get(&root) {
            Some(lock) => {
                tracing::warn!(container = ?root, %lock, "structural edit rejected by template lock");
                Err(StoreError::Locked {
                    container: root,
                    lock: *lock,
                })
            }
            None => Ok(()),
        }
    }

    fn parent_of(&self, id: BlockId) -> Result<Option<BlockId>> {
        self.nodes
            .get(&id)
            .map(|n| n.parent)
            .ok_or(StoreError::BlockNotFound(id))
    }

    /// Reject ids already in the store (unless about to be removed) or
    /// repeated within the batch.
    fn check_new_ids(&self, blocks: &[BlockRecord], leaving: &HashSet<BlockId>) -> Result<()> {
        let mut seen = HashSet::new();
        let mut clash = None;
        for block in blocks {
            block.walk(&mut |b| {
                let taken = self.nodes.contains_key(&b.id) && !leaving.contains(&b.id);
                if clash.is_none() && (taken || !seen.insert(b.id)) {
                    clash = Some(b.id);
                }
            });
        }
        match clash {
            Some(id) => Err(StoreError::DuplicateBlock(id)),
            None => Ok(()),
        }
    }

    fn subtree_ids(&self, id: BlockId, out: &mut HashSet<BlockId>) {
        out.insert(id);
        for child in self.order(Some(id)) {
            self.subtree_ids(*child, out);
        }
    }

    fn attach(&mut self, block: BlockRecord, parent: Option<BlockId>, position: usize) {
        let BlockRecord {
            id,
            name,
            attributes,
            inner_blocks,
        } = block;
        self.nodes.insert(
            id,
            Node {
                name,
                attributes,
                parent,
            },
        );
        let siblings = self.children.entry(parent).or_default();
        let position = position.min(siblings.len());
        siblings.insert(position, id);
        for (i, inner) in inner_blocks.into_iter().enumerate() {
            self.attach(inner, Some(id), i);
        }
    }

    fn detach(&mut self, id: BlockId) {
        let Some(parent) = self.nodes.get(&id).map(|n| n.parent) else {
            return;
        };
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|s| *s != id);
        }
        self.drop_subtree(id);
    }

    fn drop_subtree(&mut self, id: BlockId) {
        if let Some(kids) = self.children.remove(&Some(id)) {
            for kid in kids {
                self.drop_subtree(kid);
            }
        }
        self.nodes.remove(&id);
        self.modes.remove(&id);
        self.locks.remove(&Some(id));
    }

    /// Point the selection at `fallback` if it references a removed block.
    fn repair_selection(&mut self, fallback: Option<BlockId>) {
        let dangling = match self.selection {
            SelectionState::None => false,
            SelectionState::Single(id) => !self.nodes.contains_key(&id),
            SelectionState::Range { start, end } => {
                !self.nodes.contains_key(&start) || !self.nodes.contains_key(&end)
            }
        };
        if dangling {
            self.selection = match fallback {
                Some(id) if self.nodes.contains_key(&id) => SelectionState::Single(id),
                _ => SelectionState::None,
            };
        }
    }

    /// The nearest earlier sibling of `id` that is not in `excluded`.
    fn previous_sibling(&self, id: BlockId, excluded: &[BlockId]) -> Option<BlockId> {
        let parent = self.nodes.get(&id)?.parent;
        let siblings = self.order(parent);
        let index = siblings.iter().position(|s| *s == id)?;
        siblings[..index]
            .iter()
            .rev()
            .find(|s| !excluded.contains(*s))
            .copied()
    }

    /// Instances of a reusable definition, in document order.
    fn instances_of(&self, reusable: ReusableId) -> Vec<BlockId> {
        let mut found = Vec::new();
        let mut stack: Vec<BlockId> = self.order(None).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let is_instance = node.name == names::REUSABLE
                && node
                    .attributes
                    .get(tessera_types::block::REUSABLE_REF_ATTRIBUTE)
                    .and_then(|v| v.as_str())
                    .and_then(|r| ReusableId::parse(r).ok())
                    == Some(reusable);
            if is_instance {
                found.push(id);
            }
            stack.extend(self.order(Some(id)).iter().rev().copied());
        }
        found
    }
}

impl EditorStore for MemoryStore {
    fn get_block(&self, id: BlockId) -> Option<BlockRecord> {
        self.record(id)
    }

    fn get_block_index(&self, id: BlockId, root: Option<BlockId>) -> Option<usize> {
        self.order(root).iter().position(|s| *s == id)
    }

    fn get_block_root(&self, id: BlockId) -> Option<Option<BlockId>> {
        self.nodes.get(&id).map(|n| n.parent)
    }

    fn get_template_lock(&self, root: Option<BlockId>) -> Option<TemplateLock> {
        self.locks.get(&root).copied()
    }

    fn get_block_mode(&self, id: BlockId) -> BlockMode {
        self.modes.get(&id).copied().unwrap_or_default()
    }

    fn get_reusable_block(&self, id: ReusableId) -> Option<ReusableBlock> {
        self.reusables.get(&id).cloned()
    }

    fn insert_blocks(&mut self, blocks: Vec<BlockRecord>, index: usize, root: Option<BlockId>) -> Result<()> {
        self.check_container(root)?;
        self.check_unlocked(root)?;
        let len = self.order(root).len();
        if index > len {
            return Err(StoreError::InvalidIndex { index, len });
        }
        self.check_new_ids(&blocks, &HashSet::new())?;

        let count = blocks.len();
        let last = blocks.last().map(|b| b.id);
        for (offset, block) in blocks.into_iter().enumerate() {
            self.attach(block, root, index + offset);
        }
        if let Some(last) = last {
            self.selection = SelectionState::Single(last);
        }
        self.bump();
        tracing::debug!(count, index, container = ?root, "inserted blocks");
        Ok(())
    }

    fn remove_blocks(&mut self, ids: &[BlockId]) -> Result<()> {
        for id in ids {
            let parent = self.parent_of(*id)?;
            self.check_unlocked(parent)?;
        }
        let fallback = ids.first().and_then(|first| self.previous_sibling(*first, ids));
        for id in ids {
            self.detach(*id);
        }
        self.repair_selection(fallback);
        self.bump();
        tracing::debug!(count = ids.len(), "removed blocks");
        Ok(())
    }

    fn select_block(&mut self, id: BlockId) -> Result<()> {
        self.parent_of(id)?;
        self.selection = SelectionState::Single(id);
        Ok(())
    }

    fn multi_select(&mut self, start: BlockId, end: BlockId) -> Result<()> {
        let start_parent = self.parent_of(start)?;
        let end_parent = self.parent_of(end)?;
        if start_parent != end_parent {
            return Err(StoreError::MixedContainers);
        }
        self.selection = if start == end {
            SelectionState::Single(start)
        } else {
            SelectionState::Range { start, end }
        };
        Ok(())
    }

    fn toggle_block_mode(&mut self, id: BlockId) -> Result<()> {
        self.parent_of(id)?;
        let mode = self.get_block_mode(id).toggled();
        match mode {
            BlockMode::Visual => self.modes.remove(&id),
            other => self.modes.insert(id, other),
        };
        self.bump();
        tracing::debug!(block = %id.short(), %mode, "toggled block mode");
        Ok(())
    }

    fn replace_blocks(&mut self, ids: &[BlockId], blocks: Vec<BlockRecord>) -> Result<()> {
        let Some(first) = ids.first() else {
            return Ok(());
        };
        let root = self.parent_of(*first)?;
        for id in ids {
            if self.parent_of(*id)? != root {
                return Err(StoreError::MixedContainers);
            }
        }
        self.check_unlocked(root)?;

        let mut leaving = HashSet::new();
        for id in ids {
            self.subtree_ids(*id, &mut leaving);
        }
        self.check_new_ids(&blocks, &leaving)?;

        let siblings = self.order(root);
        let position = ids
            .iter()
            .filter_map(|id| siblings.iter().position(|s| s == id))
            .min()
            .unwrap_or(siblings.len());
        let fallback = self.previous_sibling(*first, ids);

        for id in ids {
            self.detach(*id);
        }
        let last = blocks.last().map(|b| b.id);
        for (offset, block) in blocks.into_iter().enumerate() {
            self.attach(block, root, position + offset);
        }
        match last {
            Some(last) => self.selection = SelectionState::Single(last),
            None => self.repair_selection(fallback),
        }
        self.bump();
        tracing::debug!(replaced = ids.len(), container = ?root, "replaced blocks");
        Ok(())
    }

    fn convert_block_to_reusable(&mut self, id: BlockId) -> Result<ReusableId> {
        let record = self.record(id).ok_or(StoreError::BlockNotFound(id))?;
        let reusable_id = ReusableId::new();
        let instance = BlockRecord::new(names::REUSABLE)
            .with_attribute(tessera_types::block::REUSABLE_REF_ATTRIBUTE, reusable_id.to_string());

        self.replace_blocks(&[id], vec![instance])?;
        self.reusables.insert(
            reusable_id,
            ReusableBlock {
                id: reusable_id,
                title: UNTITLED_REUSABLE_TITLE.to_string(),
                blocks: vec![record],
            },
        );
        tracing::debug!(block = %id.short(), reusable = %reusable_id.short(), "converted block to reusable");
        Ok(reusable_id)
    }

    fn convert_block_to_static(&mut self, id: BlockId) -> Result<()> {
        let record = self.record(id).ok_or(StoreError::BlockNotFound(id))?;
        let reusable_id = record.reusable_ref().ok_or(StoreError::NotReusable(id))?;
        let definition = self
            .reusables
            .get(&reusable_id)
            .ok_or(StoreError::ReusableNotFound(reusable_id))?;
        let copies: Vec<BlockRecord> = definition.blocks.iter().map(clone_block).collect();
        self.replace_blocks(&[id], copies)
    }

    fn delete_reusable_block(&mut self, id: ReusableId) -> Result<()> {
        if !self.reusables.contains_key(&id) {
            return Err(StoreError::ReusableNotFound(id));
        }
        let instances = self.instances_of(id);
        for instance in &instances {
            let parent = self.parent_of(*instance)?;
            self.check_unlocked(parent)?;
        }
        let fallback = match self.selection {
            SelectionState::None => None,
            SelectionState::Single(anchor) | SelectionState::Range { start: anchor, .. } => Some(anchor)
                .filter(|a| instances.contains(a))
                .and_then(|a| self.previous_sibling(a, &instances)),
        };

        self.reusables.shift_remove(&id);
        for instance in &instances {
            self.detach(*instance);
        }
        self.repair_selection(fallback);
        self.bump();
        tracing::debug!(reusable = %id.short(), instances = instances.len(), "deleted reusable block");
        Ok(())
    }
}
