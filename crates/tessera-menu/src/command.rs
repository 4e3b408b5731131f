//! Commands a menu item or shortcut can dispatch.

use tessera_types::{BlockId, ReusableId};

/// What activating a menu entry does.
///
/// Block-targeted variants carry the id they were rendered for. Duplicate and
/// Remove act on the menu's current selection and re-check their guards at
/// dispatch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    /// Switch between visual and raw-markup editing.
    ToggleMode(BlockId),
    /// Re-parse a freeform block's content into blocks.
    ConvertFreeform(BlockId),
    /// Re-parse a raw-markup block's content into blocks.
    ConvertHtml(BlockId),
    Duplicate,
    ConvertToReusable(BlockId),
    ConvertToStatic(BlockId),
    DeleteReusable(ReusableId),
    Remove,
    /// Handled by the extension fill registered under `slot`.
    Fill { slot: String, action: String },
}
