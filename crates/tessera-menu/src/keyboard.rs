//! Keyboard dispatch: key events in, menu commands out.
//!
//! Bindings are built from the raw strings of a [`ShortcutMap`], so the menu
//! display and the dispatcher can never disagree about a chord. Dispatch does
//! not look at whether the popover is open.

use std::str::FromStr;

use tracing::debug;

use crate::command::MenuCommand;
use crate::error::MenuError;
use crate::shortcuts::{Key, ShortcutMap};

/// Modifier key state carried by a key event or required by a binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        alt: false,
        meta: false,
    };

    pub const CTRL_ALT: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: true,
        meta: false,
    };

    pub const META_SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
        meta: true,
    };

    pub const META_ALT: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: true,
        meta: true,
    };

    fn set(&mut self, name: &str) -> bool {
        match name {
            "ctrl" | "control" => self.ctrl = true,
            "shift" => self.shift = true,
            "alt" | "option" => self.alt = true,
            "meta" | "cmd" | "command" | "super" => self.meta = true,
            _ => return false,
        }
        true
    }
}

/// One key press with the modifiers held at the time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Parses raw chords such as `ctrl+shift+d` or `alt+meta+backspace`.
impl FromStr for KeyEvent {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MenuError::InvalidChord(s.to_string());
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_part = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;
        let key = Key::from_raw(key_part).ok_or_else(invalid)?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            if !modifiers.set(&part.to_ascii_lowercase()) {
                return Err(invalid());
            }
        }
        Ok(Self { key, modifiers })
    }
}

/// A chord bound to a menu command.
#[derive(Clone, Debug)]
pub struct KeyBinding {
    pub chord: KeyEvent,
    pub command: MenuCommand,
    /// Human-readable description (display string of the shortcut).
    pub description: String,
}

impl KeyBinding {
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.chord.modifiers == event.modifiers && self.chord.key.same_key(&event.key)
    }
}

/// Keyboard shortcut handler for the block settings menu.
#[derive(Clone, Debug, Default)]
pub struct KeyboardShortcuts {
    bindings: Vec<KeyBinding>,
}

impl KeyboardShortcuts {
    /// Register Duplicate and Remove from the shortcut map.
    pub fn from_shortcuts(map: &ShortcutMap) -> Result<Self, MenuError> {
        let bindings = vec![
            KeyBinding {
                chord: map.duplicate.raw.parse()?,
                command: MenuCommand::Duplicate,
                description: map.duplicate.display.clone(),
            },
            KeyBinding {
                chord: map.remove.raw.parse()?,
                command: MenuCommand::Remove,
                description: map.remove.display.clone(),
            },
        ];
        Ok(Self { bindings })
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// First binding matching `event`, if any.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<MenuCommand> {
        let binding = self.bindings.iter().find(|b| b.matches(event))?;
        debug!(chord = %binding.description, command = ?binding.command, "keyboard shortcut");
        Some(binding.command.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::Platform;

    #[test]
    fn test_parse_chord() {
        let event: KeyEvent = "ctrl+shift+d".parse().unwrap();
        assert_eq!(event, KeyEvent::new(Key::Char('d'), Modifiers::CTRL_SHIFT));

        let event: KeyEvent = "alt+meta+backspace".parse().unwrap();
        assert_eq!(event, KeyEvent::new(Key::Backspace, Modifiers::META_ALT));

        let event: KeyEvent = "Ctrl + Alt + Bksp".parse().unwrap();
        assert_eq!(event, KeyEvent::new(Key::Backspace, Modifiers::CTRL_ALT));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ctrl+".parse::<KeyEvent>().is_err());
        assert!("hyper+d".parse::<KeyEvent>().is_err());
        assert!("ctrl+shift+dd".parse::<KeyEvent>().is_err());
        assert!("".parse::<KeyEvent>().is_err());
    }

    #[test]
    fn test_dispatch_other_platform() {
        let keys = KeyboardShortcuts::from_shortcuts(&ShortcutMap::for_platform(Platform::Other)).unwrap();

        let dup = KeyEvent::new(Key::Char('D'), Modifiers::CTRL_SHIFT);
        assert_eq!(keys.dispatch(&dup), Some(MenuCommand::Duplicate));

        let remove = KeyEvent::new(Key::Backspace, Modifiers::CTRL_ALT);
        assert_eq!(keys.dispatch(&remove), Some(MenuCommand::Remove));

        // Extra modifiers do not match
        let ctrl_alt_shift_d = KeyEvent::new(
            Key::Char('d'),
            Modifiers {
                alt: true,
                ..Modifiers::CTRL_SHIFT
            },
        );
        assert_eq!(keys.dispatch(&ctrl_alt_shift_d), None);
        assert_eq!(keys.dispatch(&KeyEvent::new(Key::Char('d'), Modifiers::NONE)), None);
    }

    #[test]
    fn test_dispatch_apple() {
        let keys = KeyboardShortcuts::from_shortcuts(&ShortcutMap::for_platform(Platform::Apple)).unwrap();
        assert_eq!(
            keys.dispatch(&KeyEvent::new(Key::Char('d'), Modifiers::META_SHIFT)),
            Some(MenuCommand::Duplicate)
        );
        assert_eq!(keys.dispatch(&KeyEvent::new(Key::Char('d'), Modifiers::CTRL_SHIFT)), None);
        assert_eq!(keys.bindings()[1].description, "⌥⌘Bksp");
    }
}
