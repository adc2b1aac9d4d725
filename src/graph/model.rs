use crate::catalog::BlockCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The complete graph of one command, event or module unit, ready for export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Editor viewport. Carried through for round-tripping, never read by codegen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// A single node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, alias = "data")]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub category: BlockCategory,
}

/// A directed edge between two blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl Block {
    pub fn new(id: &str, block_type: &str, category: BlockCategory) -> Self {
        Self {
            id: id.to_string(),
            block_type: block_type.to_string(),
            position: Position::default(),
            properties: Map::new(),
            category,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Triggers originate execution paths; everything else is an action.
    ///
    /// Reads the stored category. `Canvas::from_value` and the exporter align it with
    /// the catalog through `BlockCatalog::classify` first.
    pub fn is_trigger(&self) -> bool {
        self.category == BlockCategory::Triggers
    }
}

impl Connection {
    pub fn new(id: &str, source: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn from_handle(mut self, handle: &str) -> Self {
        self.source_handle = Some(handle.to_string());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl Canvas {
    pub fn new(blocks: Vec<Block>, connections: Vec<Connection>) -> Self {
        Self {
            blocks,
            connections,
            viewport: None,
        }
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_trigger())
    }

    pub fn actions(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.is_trigger())
    }

    pub fn has_inbound(&self, block_id: &str) -> bool {
        self.connections.iter().any(|c| c.target == block_id)
    }

    pub fn has_outbound(&self, block_id: &str) -> bool {
        self.connections.iter().any(|c| c.source == block_id)
    }

    pub fn outgoing<'a>(&'a self, block_id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.source == block_id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
