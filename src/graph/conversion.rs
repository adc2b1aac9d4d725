use super::model::{Block, Canvas, Connection, Viewport};
use crate::catalog::BlockCatalog;
use crate::error::CanvasError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A trait for editor-side data models that can be converted into a [`Canvas`].
///
/// The exporter only understands its own canonical graph. Hosts with a different
/// storage format implement this trait to provide the translation layer.
///
/// # Example
///
/// ```rust,no_run
/// use botforge::catalog::BlockCatalog;
/// use botforge::error::CanvasError;
/// use botforge::graph::{Block, Canvas, IntoCanvas};
///
/// struct SavedCommand { nodes: Vec<(String, String, f64)> }
///
/// impl IntoCanvas for SavedCommand {
///     fn into_canvas(self) -> Result<Canvas, CanvasError> {
///         let blocks = self
///             .nodes
///             .into_iter()
///             .map(|(id, kind, y)| {
///                 let category = BlockCatalog::builtin()
///                     .lookup(&kind)
///                     .map(|d| d.category)
///                     .unwrap_or_default();
///                 Block::new(&id, &kind, category).at(0.0, y)
///             })
///             .collect();
///         Ok(Canvas::new(blocks, vec![]))
///     }
/// }
/// ```
pub trait IntoCanvas {
    /// Consumes the object and converts it into an exportable canvas.
    fn into_canvas(self) -> Result<Canvas, CanvasError>;
}

impl IntoCanvas for Canvas {
    fn into_canvas(self) -> Result<Canvas, CanvasError> {
        Ok(self)
    }
}

impl IntoCanvas for Value {
    fn into_canvas(self) -> Result<Canvas, CanvasError> {
        Ok(Canvas::from_value(self))
    }
}

impl Canvas {
    /// Parses canvas JSON text. Fails only when the text is not JSON at all.
    pub fn from_json(text: &str) -> Result<Self, CanvasError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| CanvasError::JsonParse(e.to_string()))?;
        Ok(Self::from_value(value))
    }

    /// Builds a canvas from loosely-shaped JSON.
    ///
    /// Missing or non-array `blocks`/`connections` become empty lists, and entries that
    /// do not deserialize are skipped. A malformed graph degrades to less output, never
    /// to an error. Block categories are taken from the built-in catalog wherever it
    /// knows the block type.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut root) = value else {
            tracing::warn!("Canvas is not a JSON object, treating it as an empty graph");
            return Canvas::default();
        };

        let blocks: Vec<Block> = lenient_list(root.remove("blocks"), "blocks");
        let connections: Vec<Connection> = lenient_list(root.remove("connections"), "connections");
        let viewport = root
            .remove("viewport")
            .and_then(|v| serde_json::from_value::<Viewport>(v).ok());

        let mut canvas = Canvas {
            blocks,
            connections,
            viewport,
        };
        BlockCatalog::builtin().classify(&mut canvas);
        canvas
    }
}

fn lenient_list<T: DeserializeOwned>(value: Option<Value>, field: &str) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!("Skipping malformed entry {} in '{}': {}", index, field, e);
                    None
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            tracing::warn!("Canvas field '{}' is not an array, treating it as empty", field);
            Vec::new()
        }
    }
}
