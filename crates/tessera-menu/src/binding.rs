//! Store binding: derived menu state on the read side, duplicate / remove /
//! select on the write side.
//!
//! Nothing here is cached. Every call resolves a fresh
//! [`BlockSettingsState`] from the store, so guards always reflect the
//! document as it is at dispatch time.

use tracing::{debug, warn};

use tessera_blocks::{BlockRegistry, Support, clone_block};
use tessera_store::EditorStore;
use tessera_types::{BlockId, BlockRecord, Selection};

use crate::Result;

/// Flags the menu derives from the store for one selection.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockSettingsState {
    /// Selected blocks in selection order; unknown ids resolve to `None`.
    pub blocks: Vec<Option<BlockRecord>>,
    /// Position of the last selected block within the root.
    pub index: Option<usize>,
    /// The root container carries a template lock.
    pub is_locked: bool,
    /// Every selected block resolved and supports `multiple`.
    pub can_duplicate: bool,
}

impl BlockSettingsState {
    pub fn resolve(store: &dyn EditorStore, registry: &BlockRegistry, selection: &Selection) -> Self {
        let blocks = store.get_blocks_by_client_id(selection.ids());
        let can_duplicate = blocks.iter().all(|block| {
            block
                .as_ref()
                .is_some_and(|b| registry.has_block_support(&b.name, Support::Multiple, true))
        });

        Self {
            index: store.get_block_index(selection.last(), selection.root()),
            is_locked: store.get_template_lock(selection.root()).is_some(),
            blocks,
            can_duplicate,
        }
    }

    /// The single resolved block, when exactly one id is selected.
    pub fn single_block(&self) -> Option<&BlockRecord> {
        match self.blocks.as_slice() {
            [Some(block)] => Some(block),
            _ => None,
        }
    }
}

/// Duplicate the selection right after its last block.
///
/// Silent no-op when the root is locked or any block can't be duplicated.
/// More than one clone leaves the clones multi-selected; a single clone is
/// left selected by the insert itself.
pub fn duplicate(store: &mut dyn EditorStore, registry: &BlockRegistry, selection: &Selection) -> Result<()> {
    let state = BlockSettingsState::resolve(&*store, registry, selection);
    if state.is_locked || !state.can_duplicate {
        debug!(
            is_locked = state.is_locked,
            can_duplicate = state.can_duplicate,
            "duplicate skipped"
        );
        return Ok(());
    }

    let clones: Vec<BlockRecord> = state.blocks.iter().flatten().map(clone_block).collect();
    let first = clones.first().map(|b| b.id);
    let last = clones.last().map(|b| b.id);
    let count = clones.len();
    let position = state.index.map_or(0, |i| i + 1);

    debug!(count, position, root = ?selection.root(), "duplicating blocks");
    store.insert_blocks(clones, position, selection.root()).inspect_err(|e| {
        warn!(error = %e, "duplicate rejected by store");
    })?;

    if count > 1
        && let (Some(first), Some(last)) = (first, last)
    {
        store.multi_select(first, last)?;
    }
    Ok(())
}

/// Remove every selected block.
///
/// No lock check here; the store decides.
pub fn remove(store: &mut dyn EditorStore, selection: &Selection) -> Result<()> {
    debug!(count = selection.len(), "removing blocks");
    store.remove_blocks(selection.ids()).inspect_err(|e| {
        warn!(error = %e, "remove rejected by store");
    })?;
    Ok(())
}

pub fn select(store: &mut dyn EditorStore, id: BlockId) -> Result<()> {
    store.select_block(id)?;
    Ok(())
}
