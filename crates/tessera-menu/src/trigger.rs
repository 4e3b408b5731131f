//! The toggle control that opens and closes the menu popover.

use tracing::{debug, warn};

use tessera_store::EditorStore;
use tessera_types::Selection;

use crate::{Result, binding};

pub const LABEL_OPEN: &str = "Hide Options";
pub const LABEL_CLOSED: &str = "More Options";
pub const TOGGLE_ICON: &str = "ellipsis";

/// Popover open state. Owned by whoever hosts the menu, not the menu itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dropdown {
    is_open: bool,
}

impl Dropdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// A popover that starts open.
    pub fn opened() -> Self {
        Self { is_open: true }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}

/// Rendered toggle control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleView {
    pub label: &'static str,
    pub icon: &'static str,
    pub is_opened: bool,
    pub is_visible: bool,
    pub aria_expanded: bool,
    /// Request initial focus.
    pub focus: bool,
}

impl ToggleView {
    pub fn new(is_open: bool, is_focused: bool, is_hidden: bool, focus: bool) -> Self {
        Self {
            label: if is_open { LABEL_OPEN } else { LABEL_CLOSED },
            icon: TOGGLE_ICON,
            is_opened: is_open,
            is_visible: is_focused || is_open || !is_hidden,
            aria_expanded: is_open,
            focus,
        }
    }
}

/// Toggle click: a single selected block is selected first, then the
/// popover flips.
///
/// The popover flips even when the store rejects the selection; that error
/// is returned afterwards.
pub fn click(store: &mut dyn EditorStore, selection: &Selection, dropdown: &mut Dropdown) -> Result<()> {
    let selected = match selection.single_id() {
        Some(id) => binding::select(store, id).inspect_err(|err| warn!(block = %id, %err, "select before toggle failed")),
        None => Ok(()),
    };
    dropdown.toggle();
    debug!(open = dropdown.is_open(), "menu toggled");
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_view_visibility() {
        assert!(!ToggleView::new(false, false, true, false).is_visible);
        assert!(ToggleView::new(false, true, true, false).is_visible);
        assert!(ToggleView::new(true, false, true, false).is_visible);
        assert!(ToggleView::new(false, false, false, false).is_visible);
    }

    #[test]
    fn test_toggle_view_labels() {
        let open = ToggleView::new(true, false, true, true);
        assert_eq!(open.label, "Hide Options");
        assert!(open.aria_expanded);
        assert!(open.focus);

        let closed = ToggleView::new(false, false, true, false);
        assert_eq!(closed.label, "More Options");
        assert_eq!(closed.icon, "ellipsis");
        assert!(!closed.is_opened);
    }

    #[test]
    fn test_click_toggles_when_select_fails() {
        let mut store = tessera_store::MemoryStore::new();
        let selection = Selection::single(tessera_types::BlockId::new(), None);
        let mut dropdown = Dropdown::new();

        let result = click(&mut store, &selection, &mut dropdown);
        assert!(matches!(result, Err(crate::MenuError::Store(_))));
        assert!(dropdown.is_open());

        assert!(click(&mut store, &selection, &mut dropdown).is_err());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_dropdown_state() {
        let mut dropdown = Dropdown::new();
        assert!(!dropdown.is_open());
        dropdown.toggle();
        assert!(dropdown.is_open());
        dropdown.close();
        dropdown.close();
        assert!(!dropdown.is_open());
        dropdown.open();
        assert_eq!(dropdown, Dropdown::opened());
    }
}
