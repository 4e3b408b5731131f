//! The selection a block settings menu is rendered for.

use crate::ids::BlockId;

/// Error building a [`Selection`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection must contain at least one block")]
    Empty,
}

/// Ordered, non-empty set of selected blocks plus the container they live in.
///
/// Immutable once built: the menu never edits a selection, it asks the store
/// to select something else and gets a new one on the next render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<BlockId>,
    root: Option<BlockId>,
}

impl Selection {
    /// A single selected block.
    pub fn single(id: BlockId, root: Option<BlockId>) -> Self {
        Self { ids: vec![id], root }
    }

    /// An ordered multi-selection. Order is preserved as given.
    pub fn from_ids(ids: impl IntoIterator<Item = BlockId>, root: Option<BlockId>) -> Result<Self, SelectionError> {
        let ids: Vec<BlockId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Self { ids, root })
    }

    pub fn ids(&self) -> &[BlockId] {
        &self.ids
    }

    /// The container scoping the index space (`None` = document root).
    pub fn root(&self) -> Option<BlockId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Never true for a built selection.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn first(&self) -> BlockId {
        self.ids[0]
    }

    /// The last selected block: the anchor for duplicate insertion.
    pub fn last(&self) -> BlockId {
        self.ids[self.ids.len() - 1]
    }

    /// The selected block when exactly one is selected.
    pub fn single_id(&self) -> Option<BlockId> {
        match self.ids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

impl From<BlockId> for Selection {
    fn from(id: BlockId) -> Self {
        Self::single(id, None)
    }
}
