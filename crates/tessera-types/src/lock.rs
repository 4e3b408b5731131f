//! Container template locks.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Container-level restriction on structural edits to its children.
///
/// Any lock disables the menu's structural actions; the distinction between
/// variants only matters to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TemplateLock {
    /// No insert, remove, or move.
    All,
    /// No insert or remove; moving existing children is allowed.
    Insert,
}
