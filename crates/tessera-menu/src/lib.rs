//! Block settings menu for Tessera.
//!
//! The per-block "more options" dropdown: a toggle control, a popover of
//! conditionally rendered actions, keyboard shortcuts for the two structural
//! actions, and an extension slot for third-party items.
//!
//! # Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | [`trigger`] | Toggle control and the popover's open state |
//! | [`content`] | Ordered menu entries for the current selection |
//! | [`binding`] | Derived state from the store, duplicate / remove / select |
//! | [`keyboard`] | Chord matching, independent of the popover |
//! | [`slot`] | Extension fills |
//! | [`menu`] | [`BlockSettingsMenu`] tying the above together |
//!
//! The menu takes the store by reference on every call (`&dyn EditorStore`
//! to render, `&mut dyn EditorStore` to dispatch) and never caches what it
//! reads.
//!
//! ```ignore
//! let props = MenuProps::new(block_id, None)?;
//! let menu = BlockSettingsMenu::new(props, &MenuConfig::default())?;
//! let mut dropdown = Dropdown::new();
//!
//! menu.click_toggle(&mut store, &mut dropdown)?;
//! for entry in menu.render_content(&store, &registry) {
//!     // ...
//! }
//! ```

pub mod binding;
pub mod command;
pub mod config;
pub mod content;
mod error;
pub mod keyboard;
pub mod menu;
pub mod shortcuts;
pub mod slot;
pub mod trigger;

pub use binding::BlockSettingsState;
pub use command::MenuCommand;
pub use config::{ConfigError, MenuConfig};
pub use content::{MenuEntry, MenuItem};
pub use error::MenuError;
pub use keyboard::{KeyEvent, KeyboardShortcuts, Modifiers};
pub use menu::{BlockSettingsMenu, ClientIds, MenuProps, MenuState, MenuView};
pub use shortcuts::{Chord, Key, ModifierSet, Platform, Shortcut, ShortcutMap};
pub use slot::{FillItem, FillProps, OnClose, SlotFill, SlotRegistry};
pub use trigger::{Dropdown, ToggleView};

/// Result type for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;
