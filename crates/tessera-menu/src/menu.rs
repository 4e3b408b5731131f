//! The block settings menu component.
//!
//! [`BlockSettingsMenu`] owns its props, local focus state, the shortcut map
//! and the extension slot. It never holds the store: every render or dispatch
//! is handed one, and derived state is recomputed from it on each call.

use tracing::{debug, trace};

use tessera_blocks::{BlockRegistry, raw_handler};
use tessera_store::{EditorStore, StoreError};
use tessera_types::{BlockId, Selection, SelectionError};

use crate::binding::{self, BlockSettingsState};
use crate::command::MenuCommand;
use crate::config::MenuConfig;
use crate::content::{ContentContext, MenuEntry, MenuItem, render_content};
use crate::keyboard::{KeyEvent, KeyboardShortcuts};
use crate::shortcuts::ShortcutMap;
use crate::slot::{FillProps, OnClose, SlotRegistry};
use crate::trigger::{self, Dropdown, ToggleView};
use crate::Result;

/// Attribute holding the markup of freeform and raw-markup blocks.
const CONTENT_ATTRIBUTE: &str = "content";

/// One block id or an ordered list of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientIds {
    Single(BlockId),
    List(Vec<BlockId>),
}

impl From<BlockId> for ClientIds {
    fn from(id: BlockId) -> Self {
        ClientIds::Single(id)
    }
}

impl From<Vec<BlockId>> for ClientIds {
    fn from(ids: Vec<BlockId>) -> Self {
        ClientIds::List(ids)
    }
}

impl From<&[BlockId]> for ClientIds {
    fn from(ids: &[BlockId]) -> Self {
        ClientIds::List(ids.to_vec())
    }
}

/// Inputs from the menu's host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuProps {
    selection: Selection,
    /// Hide the toggle unless focused or open.
    pub is_hidden: bool,
    /// Request initial focus on the toggle.
    pub focus: bool,
}

impl MenuProps {
    /// Build props for the given blocks. An empty list is rejected.
    pub fn new(client_ids: impl Into<ClientIds>, root_client_id: Option<BlockId>) -> std::result::Result<Self, SelectionError> {
        let selection = match client_ids.into() {
            ClientIds::Single(id) => Selection::single(id, root_client_id),
            ClientIds::List(ids) => Selection::from_ids(ids, root_client_id)?,
        };
        Ok(Self {
            selection,
            is_hidden: true,
            focus: false,
        })
    }

    pub fn with_hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn client_ids(&self) -> &[BlockId] {
        self.selection.ids()
    }

    pub fn root_client_id(&self) -> Option<BlockId> {
        self.selection.root()
    }
}

/// Component-local state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub is_focused: bool,
}

/// A full render: the toggle, plus the entries while the popover is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuView {
    pub toggle: ToggleView,
    pub entries: Option<Vec<MenuEntry>>,
}

pub struct BlockSettingsMenu {
    props: MenuProps,
    state: MenuState,
    shortcuts: ShortcutMap,
    keyboard: KeyboardShortcuts,
    slots: SlotRegistry,
}

impl BlockSettingsMenu {
    pub fn new(props: MenuProps, config: &MenuConfig) -> Result<Self> {
        let shortcuts = config.shortcut_map();
        let keyboard = KeyboardShortcuts::from_shortcuts(&shortcuts)?;
        Ok(Self {
            props,
            state: MenuState::default(),
            shortcuts,
            keyboard,
            slots: SlotRegistry::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn props(&self) -> &MenuProps {
        &self.props
    }

    /// Replace props; local state survives.
    pub fn set_props(&mut self, props: MenuProps) {
        self.props = props;
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    pub fn keyboard(&self) -> &KeyboardShortcuts {
        &self.keyboard
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut SlotRegistry {
        &mut self.slots
    }

    pub fn on_focus(&mut self) {
        self.state.is_focused = true;
    }

    pub fn on_blur(&mut self) {
        self.state.is_focused = false;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn binding_state(&self, store: &dyn EditorStore, registry: &BlockRegistry) -> BlockSettingsState {
        BlockSettingsState::resolve(store, registry, &self.props.selection)
    }

    pub fn render_toggle(&self, dropdown: &Dropdown) -> ToggleView {
        ToggleView::new(
            dropdown.is_open(),
            self.state.is_focused,
            self.props.is_hidden,
            self.props.focus,
        )
    }

    pub fn render_content(&self, store: &dyn EditorStore, registry: &BlockRegistry) -> Vec<MenuEntry> {
        let state = self.binding_state(store, registry);
        render_content(&ContentContext {
            selection: &self.props.selection,
            state: &state,
            store,
            registry,
            slots: &self.slots,
            shortcuts: &self.shortcuts,
        })
    }

    pub fn render(&self, store: &dyn EditorStore, registry: &BlockRegistry, dropdown: &Dropdown) -> MenuView {
        let toggle = self.render_toggle(dropdown);
        let entries = dropdown.is_open().then(|| self.render_content(store, registry));
        trace!(open = dropdown.is_open(), visible = toggle.is_visible, "rendered menu");
        MenuView { toggle, entries }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub fn click_toggle(&self, store: &mut dyn EditorStore, dropdown: &mut Dropdown) -> Result<()> {
        trigger::click(store, &self.props.selection, dropdown)
    }

    /// Activate a rendered item: run its command, then close if it asks to.
    pub fn activate(
        &self,
        item: &MenuItem,
        store: &mut dyn EditorStore,
        registry: &BlockRegistry,
        dropdown: &mut Dropdown,
    ) -> Result<()> {
        debug!(label = %item.label, "menu item activated");
        self.execute(&item.command, store, registry, dropdown)?;
        if item.closes_menu {
            dropdown.close();
        }
        Ok(())
    }

    /// Run a command against the current selection.
    pub fn execute(
        &self,
        command: &MenuCommand,
        store: &mut dyn EditorStore,
        registry: &BlockRegistry,
        dropdown: &mut Dropdown,
    ) -> Result<()> {
        match command {
            MenuCommand::ToggleMode(id) => store.toggle_block_mode(*id)?,
            MenuCommand::ConvertFreeform(id) | MenuCommand::ConvertHtml(id) => {
                let block = store.get_block(*id).ok_or(StoreError::BlockNotFound(*id))?;
                let blocks = raw_handler(block.attribute_str(CONTENT_ATTRIBUTE).unwrap_or_default());
                debug!(block = %id.short(), produced = blocks.len(), "converting to blocks");
                store.replace_blocks(&[*id], blocks)?;
            }
            MenuCommand::Duplicate => self.on_duplicate(store, registry)?,
            MenuCommand::ConvertToReusable(id) => {
                store.convert_block_to_reusable(*id)?;
            }
            MenuCommand::ConvertToStatic(id) => store.convert_block_to_static(*id)?,
            MenuCommand::DeleteReusable(id) => store.delete_reusable_block(*id)?,
            MenuCommand::Remove => self.on_remove(store)?,
            MenuCommand::Fill { slot, action } => {
                let props = FillProps {
                    selection: &self.props.selection,
                    on_close: OnClose::new(dropdown),
                };
                self.slots.activate(slot, action, props, store)?;
            }
        }
        Ok(())
    }

    /// Feed a key press through the shortcut dispatcher. Returns whether a
    /// shortcut matched. Works whether or not the popover is open.
    pub fn handle_key(
        &self,
        event: &KeyEvent,
        store: &mut dyn EditorStore,
        registry: &BlockRegistry,
        dropdown: &mut Dropdown,
    ) -> Result<bool> {
        let Some(command) = self.keyboard.dispatch(event) else {
            return Ok(false);
        };
        self.execute(&command, store, registry, dropdown)?;
        Ok(true)
    }

    pub fn on_duplicate(&self, store: &mut dyn EditorStore, registry: &BlockRegistry) -> Result<()> {
        binding::duplicate(store, registry, &self.props.selection)
    }

    pub fn on_remove(&self, store: &mut dyn EditorStore) -> Result<()> {
        binding::remove(store, &self.props.selection)
    }

    pub fn on_select(&self, store: &mut dyn EditorStore, id: BlockId) -> Result<()> {
        binding::select(store, id)
    }
}
