//! The block catalog: the single source of truth for which block types exist, which
//! properties they carry and what those properties default to.
//!
//! The catalog is an immutable lookup table. The built-in table is built once per
//! process and shared by reference; tests and hosts can assemble their own catalog and
//! inject it into the exporter instead.

use crate::graph::{Block, Canvas};
use ahash::AHashMap;
use serde_json::Value;
use std::sync::OnceLock;

mod builtin;
pub mod definition;

pub use builtin::{BUTTON_STYLES, LISTENER_EVENTS, PERMISSIONS};
pub use definition::*;

static BUILTIN: OnceLock<BlockCatalog> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    definitions: AHashMap<String, BlockDefinition>,
}

impl BlockCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh copy of the built-in table, ready to be extended.
    pub fn with_builtin_blocks() -> Self {
        let mut definitions = AHashMap::new();
        builtin::register_default_blocks(&mut definitions);
        Self { definitions }
    }

    /// The shared built-in catalog.
    pub fn builtin() -> &'static BlockCatalog {
        BUILTIN.get_or_init(Self::with_builtin_blocks)
    }

    /// Adds a definition, replacing any existing one with the same type id.
    pub fn with_definition(mut self, definition: BlockDefinition) -> Self {
        self.definitions
            .insert(definition.type_id.clone(), definition);
        self
    }

    pub fn lookup(&self, block_type: &str) -> Option<&BlockDefinition> {
        self.definitions.get(block_type)
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.definitions.contains_key(block_type)
    }

    /// The catalog category of the block's type, or the category stored on the block
    /// when the type is unknown.
    pub fn category_of(&self, block: &Block) -> BlockCategory {
        self.lookup(&block.block_type)
            .map(|def| def.category)
            .unwrap_or(block.category)
    }

    /// Rewrites each block's stored category to [`category_of`](Self::category_of), so
    /// canvas queries such as [`Canvas::triggers`] agree with catalog lookups.
    ///
    /// Blocks saved without a category deserialize as actions; this is what turns a
    /// category-less `command_slash` back into a trigger.
    pub fn classify(&self, canvas: &mut Canvas) {
        for block in &mut canvas.blocks {
            let category = self.category_of(block);
            if block.category != category {
                tracing::debug!(
                    "Block {} ({}) stored as {}, classified as {}",
                    block.id,
                    block.block_type,
                    block.category,
                    category
                );
                block.category = category;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions, ordered by type id.
    pub fn definitions(&self) -> Vec<&BlockDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by(|a, b| a.type_id.cmp(&b.type_id));
        defs
    }

    /// Returns the block's stored value for `key`, or the declared default when it is unset.
    ///
    /// `null` and blank strings count as unset. When the block type or the property is
    /// unknown to the catalog the stored value is returned as is, or an empty string.
    pub fn resolve_property(&self, block: &Block, key: &str) -> Value {
        let stored = block.properties.get(key).filter(|v| !is_unset(v));
        let spec = self
            .lookup(&block.block_type)
            .and_then(|def| def.property_spec(key));

        match (stored, spec) {
            (Some(value), _) => value.clone(),
            (None, Some(spec)) => spec.fallback(),
            (None, None) => Value::String(String::new()),
        }
    }

    pub fn resolve_str(&self, block: &Block, key: &str) -> String {
        match self.resolve_property(block, key) {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Numeric properties tolerate numeric strings; anything else falls back to the default.
    pub fn resolve_number(&self, block: &Block, key: &str) -> f64 {
        let parsed = match self.resolve_property(block, key) {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|n| n.is_finite())
            .or_else(|| self.default_number(block, key))
            .unwrap_or(0.0)
    }

    pub fn resolve_bool(&self, block: &Block, key: &str) -> bool {
        match self.resolve_property(block, key) {
            Value::Bool(b) => b,
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            _ => false,
        }
    }

    fn default_number(&self, block: &Block, key: &str) -> Option<f64> {
        self.lookup(&block.block_type)
            .and_then(|def| def.property_spec(key))
            .and_then(|spec| spec.default.as_ref())
            .and_then(Value::as_f64)
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
