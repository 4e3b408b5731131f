//! Block type registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::names;
use crate::{RegistryError, Result};

/// A feature a block type may declare support for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Support {
    /// More than one instance may exist in a document (duplication allowed).
    Multiple,
    /// The block can be switched to raw-markup editing.
    Html,
    /// The block can be turned into a reusable block.
    Reusable,
}

/// Declared feature flags. `None` means "not declared"; the caller's default
/// applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supports {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reusable: Option<bool>,
}

impl Supports {
    pub fn get(&self, feature: Support) -> Option<bool> {
        match feature {
            Support::Multiple => self.multiple,
            Support::Html => self.html,
            Support::Reusable => self.reusable,
        }
    }
}

/// A registered block type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockType {
    /// `namespace/name`.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    #[serde(default)]
    pub supports: Supports,
}

impl BlockType {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            supports: Supports::default(),
        }
    }

    pub fn with_support(mut self, feature: Support, value: bool) -> Self {
        match feature {
            Support::Multiple => self.supports.multiple = Some(value),
            Support::Html => self.supports.html = Some(value),
            Support::Reusable => self.supports.reusable = Some(value),
        }
        self
    }
}

/// Registered block types, in registration order.
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    types: IndexMap<String, BlockType>,
    freeform_handler: Option<String>,
}

impl BlockRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the core block types.
    ///
    /// `core/freeform` is set as the freeform content handler.
    pub fn with_core_types() -> Self {
        let mut registry = Self::new();
        let core = [
            BlockType::new(names::PARAGRAPH, "Paragraph"),
            BlockType::new(names::HEADING, "Heading"),
            BlockType::new(names::GROUP, "Group"),
            BlockType::new(names::HTML, "Custom HTML")
                .with_support(Support::Html, false),
            BlockType::new(names::FREEFORM, "Classic")
                .with_support(Support::Html, false)
                .with_support(Support::Reusable, false),
            BlockType::new(names::MORE, "More")
                .with_support(Support::Multiple, false),
            BlockType::new(names::REUSABLE, "Reusable Block")
                .with_support(Support::Html, false)
                .with_support(Support::Reusable, false),
        ];
        for block_type in core {
            debug_assert!(is_valid_name(&block_type.name));
            registry.types.insert(block_type.name.clone(), block_type);
        }
        registry.freeform_handler = Some(names::FREEFORM.to_string());
        registry
    }

    /// Register a block type.
    pub fn register(&mut self, block_type: BlockType) -> Result<()> {
        if !is_valid_name(&block_type.name) {
            return Err(RegistryError::InvalidName(block_type.name));
        }
        if self.types.contains_key(&block_type.name) {
            return Err(RegistryError::AlreadyRegistered(block_type.name));
        }
        tracing::debug!(name = %block_type.name, "registered block type");
        self.types.insert(block_type.name.clone(), block_type);
        Ok(())
    }

    /// Remove a block type, returning its definition.
    pub fn unregister(&mut self, name: &str) -> Result<BlockType> {
        let removed = self
            .types
            .shift_remove(name)
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))?;
        if self.freeform_handler.as_deref() == Some(name) {
            self.freeform_handler = None;
        }
        Ok(removed)
    }

    pub fn get_block_type(&self, name: &str) -> Option<&BlockType> {
        self.types.get(name)
    }

    /// All registered types, in registration order.
    pub fn block_types(&self) -> impl Iterator<Item = &BlockType> {
        self.types.values()
    }

    /// Whether `name` supports `feature`.
    ///
    /// Unregistered types and undeclared flags yield `default`.
    pub fn has_block_support(&self, name: &str, feature: Support, default: bool) -> bool {
        self.types
            .get(name)
            .and_then(|t| t.supports.get(feature))
            .unwrap_or(default)
    }

    /// Type name that handles freeform (unstructured) content, if any.
    pub fn freeform_handler_name(&self) -> Option<&str> {
        self.freeform_handler.as_deref()
    }

    pub fn set_freeform_handler_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !self.types.contains_key(&name) {
            return Err(RegistryError::NotRegistered(name));
        }
        self.freeform_handler = Some(name);
        Ok(())
    }
}

/// `namespace/name`, lowercase alphanumerics and dashes on both sides.
fn is_valid_name(name: &str) -> bool {
    let Some((namespace, local)) = name.split_once('/') else {
        return false;
    };
    let part_ok = |s: &str| {
        !s.is_empty()
            && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && s.starts_with(|c: char| c.is_ascii_lowercase())
    };
    part_ok(namespace) && part_ok(local)
}
