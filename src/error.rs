use thiserror::Error;

/// Errors that abort a single export call before any file is returned.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported target language '{0}' (expected 'discord.js' or 'discord.py')")]
    UnsupportedLanguage(String),

    #[error("Code was generated, but packaging it failed: {0}")]
    PackagingFailed(#[from] PackagingError),
}

/// Errors that can occur while serializing generated files into an archive.
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Zip encoding failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to write archive entry '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when loading a canvas from its serialized form.
///
/// Only text that is not JSON at all is rejected. A structurally incomplete graph
/// (missing or malformed `blocks`/`connections`) is normalized to an empty graph instead.
#[derive(Error, Debug, Clone)]
pub enum CanvasError {
    #[error("Failed to parse canvas JSON: {0}")]
    JsonParse(String),
}
