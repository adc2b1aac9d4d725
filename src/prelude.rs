//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the botforge
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use botforge::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let canvas_json = std::fs::read_to_string("path/to/canvas.json")?;
//! let canvas = Canvas::from_json(&canvas_json)?;
//!
//! let request = ExportRequest::new(canvas, "discord.py", ExportSettings::default());
//! let preview = BotExporter::default().export_preview(&request)?;
//! for file in &preview.files {
//!     print!("{}", FindingFormatter::format_preview(file));
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{Block, Canvas, Connection, IntoCanvas, Position};

// Catalog
pub use crate::catalog::{BlockCatalog, BlockCategory, BlockDefinition, PropertyKind, PropertySpec};

// Code generation
pub use crate::backend::{LanguageBackend, TargetLanguage};
pub use crate::emitter::CodeEmitter;
pub use crate::linearizer::{FlowLinearizer, LinearizationPolicy};

// Export
pub use crate::exporter::{
    BotExporter, ExportPreview, ExportRequest, ExportResult, ExportSettings, FilePreview,
    GeneratedFile,
};
pub use crate::packager::package;

// Validation and reporting
pub use crate::report::FindingFormatter;
pub use crate::validator::{Finding, FindingCategory, GraphRule, GraphValidator, Severity, validate_file};

// Error types
pub use crate::error::{CanvasError, ExportError, PackagingError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
