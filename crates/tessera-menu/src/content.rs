//! Menu content: the ordered, conditionally rendered entries.
//!
//! Entry order is fixed:
//!
//! | # | Entry | Shown when |
//! |---|-------|------------|
//! | 1 | Extension fills | always evaluated |
//! | 2 | Edit as HTML / Edit visually | one block, type supports `html` |
//! | 3 | Convert to Blocks (freeform) | one freeform-handler block |
//! | 4 | Convert to Blocks (raw markup) | one `core/html` block |
//! | 5 | Duplicate | unlocked and every block supports `multiple` |
//! | 6 | Add to / Convert from Reusable | one block |
//! | 7 | Separator | always |
//! | 8 | Remove from Reusable Blocks | one reusable instance with a definition |
//! | 9 | Remove Block | unlocked |

use tracing::trace;

use tessera_blocks::{BlockRegistry, Support, names};
use tessera_store::EditorStore;
use tessera_types::{BlockMode, BlockRecord, Selection};

use crate::binding::BlockSettingsState;
use crate::command::MenuCommand;
use crate::shortcuts::ShortcutMap;
use crate::slot::SlotRegistry;

pub const LABEL_EDIT_HTML: &str = "Edit as HTML";
pub const LABEL_EDIT_VISUALLY: &str = "Edit visually";
pub const LABEL_CONVERT_TO_BLOCKS: &str = "Convert to Blocks";
pub const LABEL_DUPLICATE: &str = "Duplicate";
pub const LABEL_ADD_REUSABLE: &str = "Add to Reusable Blocks";
pub const LABEL_CONVERT_TO_REGULAR: &str = "Convert to Regular Block";
pub const LABEL_REMOVE_REUSABLE: &str = "Remove from Reusable Blocks";
pub const LABEL_REMOVE: &str = "Remove Block";

/// A clickable menu entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub icon: Option<String>,
    /// Display string of the keyboard shortcut, if any.
    pub shortcut: Option<String>,
    pub command: MenuCommand,
    /// Activating closes the popover.
    pub closes_menu: bool,
}

impl MenuItem {
    fn new(label: &str, icon: &str, command: MenuCommand) -> Self {
        Self {
            label: label.to_string(),
            icon: Some(icon.to_string()),
            shortcut: None,
            command,
            closes_menu: true,
        }
    }

    fn with_shortcut(mut self, display: &str) -> Self {
        self.shortcut = Some(display.to_string());
        self
    }

    fn keeps_open(mut self) -> Self {
        self.closes_menu = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    /// Contributed by an extension fill.
    Fill(MenuItem),
    Item(MenuItem),
    Separator,
}

impl MenuEntry {
    pub fn item(&self) -> Option<&MenuItem> {
        match self {
            MenuEntry::Fill(item) | MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        }
    }
}

/// Everything content rendering reads.
pub struct ContentContext<'a> {
    pub selection: &'a Selection,
    pub state: &'a BlockSettingsState,
    pub store: &'a dyn EditorStore,
    pub registry: &'a BlockRegistry,
    pub slots: &'a SlotRegistry,
    pub shortcuts: &'a ShortcutMap,
}

/// Compute the menu entries in display order.
pub fn render_content(cx: &ContentContext<'_>) -> Vec<MenuEntry> {
    let state = cx.state;
    let single = if cx.selection.len() == 1 {
        state.single_block()
    } else {
        None
    };

    let mut entries: Vec<MenuEntry> = cx
        .slots
        .render(cx.selection, cx.store)
        .into_iter()
        .map(MenuEntry::Fill)
        .collect();

    if let Some(block) = single {
        let items = [
            mode_toggle_item(cx.store, cx.registry, block),
            freeform_convert_item(cx.registry, block),
            html_convert_item(block),
        ];
        entries.extend(items.into_iter().flatten().map(MenuEntry::Item));
    }

    if !state.is_locked && state.can_duplicate {
        let item = MenuItem::new(LABEL_DUPLICATE, "admin-page", MenuCommand::Duplicate)
            .with_shortcut(&cx.shortcuts.duplicate.display)
            .keeps_open();
        entries.push(MenuEntry::Item(item));
    }

    if let Some(item) = single.and_then(|block| reusable_convert_item(cx.store, cx.registry, block)) {
        entries.push(MenuEntry::Item(item));
    }

    entries.push(MenuEntry::Separator);

    if let Some(item) = single.and_then(|block| reusable_delete_item(cx.store, block)) {
        entries.push(MenuEntry::Item(item));
    }

    if !state.is_locked {
        let item = MenuItem::new(LABEL_REMOVE, "trash", MenuCommand::Remove)
            .with_shortcut(&cx.shortcuts.remove.display)
            .keeps_open();
        entries.push(MenuEntry::Item(item));
    }

    trace!(count = entries.len(), selected = cx.selection.len(), "rendered menu content");
    entries
}

// ============================================================================
// Single-block items
// ============================================================================

fn mode_toggle_item(store: &dyn EditorStore, registry: &BlockRegistry, block: &BlockRecord) -> Option<MenuItem> {
    if !registry.has_block_support(&block.name, Support::Html, true) {
        return None;
    }
    let label = match store.get_block_mode(block.id) {
        BlockMode::Visual => LABEL_EDIT_HTML,
        BlockMode::Html => LABEL_EDIT_VISUALLY,
    };
    Some(MenuItem::new(label, "html", MenuCommand::ToggleMode(block.id)))
}

fn freeform_convert_item(registry: &BlockRegistry, block: &BlockRecord) -> Option<MenuItem> {
    (registry.freeform_handler_name() == Some(block.name.as_str()))
        .then(|| MenuItem::new(LABEL_CONVERT_TO_BLOCKS, "screenoptions", MenuCommand::ConvertFreeform(block.id)))
}

fn html_convert_item(block: &BlockRecord) -> Option<MenuItem> {
    (block.name == names::HTML)
        .then(|| MenuItem::new(LABEL_CONVERT_TO_BLOCKS, "screenoptions", MenuCommand::ConvertHtml(block.id)))
}

fn reusable_convert_item(store: &dyn EditorStore, registry: &BlockRegistry, block: &BlockRecord) -> Option<MenuItem> {
    if block.is_reusable() {
        let definition = block.reusable_ref().and_then(|r| store.get_reusable_block(r))?;
        trace!(reusable = %definition.id.short(), "reusable instance");
        return Some(MenuItem::new(
            LABEL_CONVERT_TO_REGULAR,
            "controls-repeat",
            MenuCommand::ConvertToStatic(block.id),
        ));
    }
    registry
        .has_block_support(&block.name, Support::Reusable, true)
        .then(|| MenuItem::new(LABEL_ADD_REUSABLE, "controls-repeat", MenuCommand::ConvertToReusable(block.id)))
}

fn reusable_delete_item(store: &dyn EditorStore, block: &BlockRecord) -> Option<MenuItem> {
    let reusable = block.reusable_ref()?;
    store.get_reusable_block(reusable)?;
    Some(MenuItem::new(LABEL_REMOVE_REUSABLE, "no", MenuCommand::DeleteReusable(reusable)))
}
