//! Keyboard shortcut chords and their platform-specific strings.
//!
//! A [`Chord`] is declared once in platform-neutral terms ("primary + shift +
//! d") and rendered two ways per [`Platform`]:
//!
//! - `raw`: what the keyboard dispatcher matches, e.g. `ctrl+shift+d`
//! - `display`: what the menu shows next to an item, e.g. `Ctrl+Shift+D` or
//!   `⇧⌘D` on Apple platforms

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Platform family; decides what "primary" means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    /// Primary = Command.
    Apple,
    /// Primary = Control.
    Other,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::Apple
        } else {
            Platform::Other
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// A physical modifier key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Alt,
    Ctrl,
    Meta,
    Shift,
}

impl Modifier {
    /// Lowercase name used in raw chords.
    pub fn raw_name(&self) -> &'static str {
        match self {
            Modifier::Alt => "alt",
            Modifier::Ctrl => "ctrl",
            Modifier::Meta => "meta",
            Modifier::Shift => "shift",
        }
    }

    fn display_name(&self, platform: Platform) -> &'static str {
        match (platform, self) {
            (Platform::Apple, Modifier::Alt) => "⌥",
            (Platform::Apple, Modifier::Ctrl) => "⌃",
            (Platform::Apple, Modifier::Meta) => "⌘",
            (Platform::Apple, Modifier::Shift) => "⇧",
            (Platform::Other, Modifier::Alt) => "Alt",
            (Platform::Other, Modifier::Ctrl) => "Ctrl",
            (Platform::Other, Modifier::Meta) => "Meta",
            (Platform::Other, Modifier::Shift) => "Shift",
        }
    }
}

/// Platform-neutral modifier combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierSet {
    /// Command / Ctrl.
    Primary,
    PrimaryShift,
    PrimaryAlt,
    /// Primary + Shift + Alt.
    Secondary,
    /// Ctrl+Alt on Apple, Shift+Alt elsewhere.
    Access,
    Ctrl,
    Alt,
    Shift,
    CtrlShift,
    ShiftAlt,
}

impl ModifierSet {
    /// Physical modifiers, in display order.
    pub fn modifiers(&self, platform: Platform) -> Vec<Modifier> {
        use Modifier::*;
        let apple = platform == Platform::Apple;
        match self {
            ModifierSet::Primary if apple => vec![Meta],
            ModifierSet::Primary => vec![Ctrl],
            ModifierSet::PrimaryShift if apple => vec![Shift, Meta],
            ModifierSet::PrimaryShift => vec![Ctrl, Shift],
            ModifierSet::PrimaryAlt if apple => vec![Alt, Meta],
            ModifierSet::PrimaryAlt => vec![Ctrl, Alt],
            ModifierSet::Secondary if apple => vec![Shift, Alt, Meta],
            ModifierSet::Secondary => vec![Ctrl, Shift, Alt],
            ModifierSet::Access if apple => vec![Ctrl, Alt],
            ModifierSet::Access => vec![Shift, Alt],
            ModifierSet::Ctrl => vec![Ctrl],
            ModifierSet::Alt => vec![Alt],
            ModifierSet::Shift => vec![Shift],
            ModifierSet::CtrlShift => vec![Ctrl, Shift],
            ModifierSet::ShiftAlt => vec![Shift, Alt],
        }
    }
}

/// A non-modifier key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character. Compared case-insensitively.
    Char(char),
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    Space,
}

impl Key {
    /// Lowercase name used in raw chords.
    pub fn raw_name(&self) -> String {
        match self {
            Key::Char(c) => c.to_lowercase().to_string(),
            Key::Backspace => "backspace".into(),
            Key::Delete => "del".into(),
            Key::Enter => "enter".into(),
            Key::Escape => "escape".into(),
            Key::Tab => "tab".into(),
            Key::Space => "space".into(),
        }
    }

    /// Short capitalised label for menus.
    pub fn display_name(&self) -> String {
        match self {
            Key::Char(c) => c.to_uppercase().to_string(),
            Key::Backspace => "Bksp".into(),
            Key::Delete => "Del".into(),
            Key::Enter => "Enter".into(),
            Key::Escape => "Esc".into(),
            Key::Tab => "Tab".into(),
            Key::Space => "Space".into(),
        }
    }

    /// Parse a raw key name (inverse of [`Key::raw_name`], plus aliases).
    pub fn from_raw(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        let key = match lower.as_str() {
            "backspace" | "bksp" => Key::Backspace,
            "del" | "delete" => Key::Delete,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "space" => Key::Space,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Case-insensitive key equality.
    pub fn same_key(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.to_lowercase().eq(b.to_lowercase()),
            (a, b) => a == b,
        }
    }
}

/// A modifier combination plus a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub modifiers: ModifierSet,
    pub key: Key,
}

impl Chord {
    pub const fn new(modifiers: ModifierSet, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// Raw chord string, e.g. `ctrl+shift+d`.
    pub fn raw(&self, platform: Platform) -> String {
        let mut parts: Vec<String> = self
            .modifiers
            .modifiers(platform)
            .iter()
            .map(|m| m.raw_name().to_string())
            .collect();
        parts.push(self.key.raw_name());
        parts.join("+")
    }

    /// Display string, e.g. `Ctrl+Shift+D` or `⇧⌘D`.
    pub fn display(&self, platform: Platform) -> String {
        let modifiers = self.modifiers.modifiers(platform);
        let key = self.key.display_name();
        match platform {
            Platform::Apple => {
                let symbols: String = modifiers.iter().map(|m| m.display_name(platform)).collect();
                format!("{symbols}{key}")
            }
            Platform::Other => {
                let mut parts: Vec<&str> = modifiers.iter().map(|m| m.display_name(platform)).collect();
                parts.push(&key);
                parts.join("+")
            }
        }
    }

    pub fn shortcut(&self, platform: Platform) -> Shortcut {
        Shortcut {
            raw: self.raw(platform),
            display: self.display(platform),
        }
    }
}

/// Default chord for Duplicate: primary + shift + d.
pub const DUPLICATE_CHORD: Chord = Chord::new(ModifierSet::PrimaryShift, Key::Char('d'));

/// Default chord for Remove Block: primary + alt + backspace.
pub const REMOVE_CHORD: Chord = Chord::new(ModifierSet::PrimaryAlt, Key::Backspace);

/// A shortcut as handed to the dispatcher (`raw`) and the menu (`display`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub raw: String,
    pub display: String,
}

/// The shortcuts the block settings menu registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutMap {
    pub duplicate: Shortcut,
    pub remove: Shortcut,
}

impl ShortcutMap {
    pub fn new(duplicate: Chord, remove: Chord, platform: Platform) -> Self {
        Self {
            duplicate: duplicate.shortcut(platform),
            remove: remove.shortcut(platform),
        }
    }

    /// The default chords for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        Self::new(DUPLICATE_CHORD, REMOVE_CHORD, platform)
    }
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}
