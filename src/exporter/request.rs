use crate::graph::Canvas;
use crate::validator::Finding;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Prefix used when the settings do not name one.
pub const DEFAULT_PREFIX: &str = "!";

/// Per-export bot configuration.
///
/// `bot_token` is accepted so hosts can round-trip their settings object, but it is
/// never written into generated files. The generated program reads `DISCORD_TOKEN`
/// from its environment instead.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ExportSettings {
    pub fn new(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.bot_token = token.to_string();
        self
    }

    pub fn prefix_or_default(&self) -> &str {
        match self.prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => DEFAULT_PREFIX,
        }
    }
}

impl fmt::Debug for ExportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bot_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ExportSettings")
            .field("bot_token", &token)
            .field("client_id", &self.client_id)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// One export call: the graph, the target language name and the settings.
///
/// The language stays a plain string so an unknown value is reported as
/// `ExportError::UnsupportedLanguage` by the exporter rather than as a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default, deserialize_with = "lenient_canvas")]
    pub canvas: Canvas,
    pub language: String,
    #[serde(default)]
    pub settings: ExportSettings,
}

impl ExportRequest {
    pub fn new(canvas: Canvas, language: &str, settings: ExportSettings) -> Self {
        Self {
            canvas,
            language: language.to_string(),
            settings,
        }
    }
}

fn lenient_canvas<'de, D>(deserializer: D) -> Result<Canvas, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Canvas::from_value(value))
}

/// A file of the exported project, with a path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// The file name after the last `/`.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.').map(|idx| &name[idx + 1..])
    }
}

/// Everything a successful export produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// Entry point first, then the manifest, then the README.
    pub files: Vec<GeneratedFile>,
    /// Package name to version requirement, sorted by name.
    pub dependencies: BTreeMap<String, String>,
    /// Setup and run instructions as markdown.
    pub instructions: String,
    /// Advisory graph findings. Never block the export.
    pub findings: Vec<Finding>,
}

impl ExportResult {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn entry_point(&self) -> Option<&GeneratedFile> {
        self.files.first()
    }
}

/// Size, head and lint issues of one generated file.
#[derive(Debug, Clone, Serialize)]
pub struct FilePreview {
    pub path: String,
    /// Content length in bytes.
    pub size: usize,
    pub preview: String,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportPreview {
    pub language: String,
    pub files: Vec<FilePreview>,
    pub findings: Vec<Finding>,
}

impl ExportPreview {
    pub fn has_issues(&self) -> bool {
        self.files.iter().any(|f| !f.issues.is_empty())
    }
}
