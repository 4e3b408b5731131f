//! Menu configuration loaded from RON.
//!
//! ```ron
//! (
//!     platform: Apple,
//!     is_hidden: false,
//!     shortcuts: (
//!         duplicate: (modifiers: PrimaryShift, key: Char('d')),
//!     ),
//! )
//! ```
//!
//! Every field is optional; omitted fields take their defaults.

use std::path::Path;

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::shortcuts::{Chord, DUPLICATE_CHORD, Key, Platform, REMOVE_CHORD, ShortcutMap};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("{shortcut} shortcut cannot use key {key:?}")]
    InvalidKey { shortcut: &'static str, key: char },
}

/// Chords for the two registered shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub duplicate: Chord,
    pub remove: Chord,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            duplicate: DUPLICATE_CHORD,
            remove: REMOVE_CHORD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Decides what "primary" maps to.
    pub platform: Platform,
    /// Hide the toggle unless focused or open.
    pub is_hidden: bool,
    pub shortcuts: ShortcutConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            is_hidden: true,
            shortcuts: ShortcutConfig::default(),
        }
    }
}

impl MenuConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        let config: Self = options.from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject chords whose raw form cannot be parsed back.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, chord) in [("duplicate", self.shortcuts.duplicate), ("remove", self.shortcuts.remove)] {
            if let Key::Char(c) = chord.key
                && (c == '+' || c.is_whitespace())
            {
                return Err(ConfigError::InvalidKey {
                    shortcut: name,
                    key: c,
                });
            }
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        debug!(path = %path.display(), platform = %config.platform, "loaded menu config");
        Ok(config)
    }

    /// Platform-specific raw and display strings for the configured chords.
    pub fn shortcut_map(&self) -> ShortcutMap {
        ShortcutMap::new(self.shortcuts.duplicate, self.shortcuts.remove, self.platform)
    }
}
