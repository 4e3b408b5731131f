//! Extension slot: third-party items rendered at the top of the menu.
//!
//! Fills register under a unique key and are evaluated in registration
//! order on every render. A fill contributes [`FillItem`]s; activating one
//! routes back to the same fill with the action name it chose.

use tracing::{debug, trace};

use tessera_store::EditorStore;
use tessera_types::Selection;

use crate::command::MenuCommand;
use crate::content::MenuItem;
use crate::error::MenuError;
use crate::trigger::Dropdown;
use crate::Result;

/// Closes the popover the fill was activated from.
pub struct OnClose<'a>(&'a mut Dropdown);

impl<'a> OnClose<'a> {
    pub fn new(dropdown: &'a mut Dropdown) -> Self {
        Self(dropdown)
    }

    pub fn call(&mut self) {
        self.0.close();
    }
}

/// What a fill is given on activation.
pub struct FillProps<'a> {
    pub selection: &'a Selection,
    pub on_close: OnClose<'a>,
}

/// An item contributed by a fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillItem {
    pub label: String,
    pub icon: Option<String>,
    /// Handed back to [`SlotFill::activate`].
    pub action: String,
}

impl FillItem {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            action: action.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A registered contributor to the extension slot.
pub trait SlotFill {
    /// Items for the current selection. May be empty.
    fn items(&self, selection: &Selection, store: &dyn EditorStore) -> Vec<FillItem>;

    /// Handle one of this fill's items being activated.
    fn activate(&self, action: &str, props: FillProps<'_>, store: &mut dyn EditorStore) -> Result<()>;
}

/// Ordered fill registrations.
#[derive(Default)]
pub struct SlotRegistry {
    fills: Vec<(String, Box<dyn SlotFill>)>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fill, replacing any fill already under `key` in place.
    pub fn register(&mut self, key: impl Into<String>, fill: Box<dyn SlotFill>) {
        let key = key.into();
        match self.fills.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = fill,
            None => {
                debug!(%key, "registered slot fill");
                self.fills.push((key, fill));
            }
        }
    }

    pub fn unregister(&mut self, key: &str) -> bool {
        let before = self.fills.len();
        self.fills.retain(|(k, _)| k != key);
        self.fills.len() != before
    }

    pub fn len(&self) -> usize {
        self.fills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fills.iter().map(|(k, _)| k.as_str())
    }

    /// Render every fill's items as menu items, in registration order.
    pub fn render(&self, selection: &Selection, store: &dyn EditorStore) -> Vec<MenuItem> {
        let mut items = Vec::new();
        for (key, fill) in &self.fills {
            let contributed = fill.items(selection, store);
            trace!(%key, count = contributed.len(), "rendered slot fill");
            items.extend(contributed.into_iter().map(|item| MenuItem {
                label: item.label,
                icon: item.icon,
                shortcut: None,
                command: MenuCommand::Fill {
                    slot: key.clone(),
                    action: item.action,
                },
                closes_menu: true,
            }));
        }
        items
    }

    /// Route an activation to the fill registered under `slot`.
    pub fn activate(
        &self,
        slot: &str,
        action: &str,
        props: FillProps<'_>,
        store: &mut dyn EditorStore,
    ) -> Result<()> {
        let (_, fill) = self
            .fills
            .iter()
            .find(|(k, _)| k == slot)
            .ok_or_else(|| MenuError::UnknownFill(slot.to_string()))?;
        debug!(%slot, %action, "activating slot fill");
        fill.activate(action, props, store)
    }
}
