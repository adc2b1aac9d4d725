//! Zip packaging of generated projects.

use crate::error::PackagingError;
use crate::exporter::GeneratedFile;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Packs `files` into an in-memory zip archive, one deflated entry per file in the
/// given order.
///
/// Every entry carries the same fixed modification time, so identical inputs give
/// byte-identical archives.
pub fn package(files: &[GeneratedFile]) -> Result<Vec<u8>, PackagingError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for file in files {
        writer.start_file(file.path.as_str(), options)?;
        writer
            .write_all(file.content.as_bytes())
            .map_err(|source| PackagingError::Io {
                path: file.path.clone(),
                source,
            })?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
