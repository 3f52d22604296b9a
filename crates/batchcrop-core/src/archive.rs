//! ZIP archive assembly for the batch download.
//!
//! Successful items become entries of a single deflate-compressed ZIP buffer
//! the user downloads. Entry names were derived (and sanitized) by the batch
//! processor; this module stores them verbatim.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// The MIME type of the produced archive.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// The default download file name for the produced archive.
pub const ARCHIVE_FILE_NAME: &str = "batch_cropped.zip";

/// A named byte buffer destined for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name inside the archive, stored verbatim.
    pub name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Errors from ZIP assembly.
///
/// Practically unreachable for in-memory buffers, but the writer API is
/// fallible and the failure is surfaced rather than swallowed.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to add archive entry {name}: {message}")]
    EntryFailed { name: String, message: String },

    #[error("Failed to finalize archive: {0}")]
    FinishFailed(String),
}

/// Pack entries into a single ZIP buffer.
///
/// Entries are written in the given order with deflate compression and 0644
/// permissions. An empty entry list produces a valid, empty archive.
/// Duplicate names are all stored (last write wins for sequential
/// extractors); deriving unambiguous names is the caller's concern.
pub fn write_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for entry in entries {
            zip.start_file(&entry.name, options)
                .map_err(|e| ArchiveError::EntryFailed {
                    name: entry.name.clone(),
                    message: e.to_string(),
                })?;
            zip.write_all(&entry.bytes)
                .map_err(|e| ArchiveError::EntryFailed {
                    name: entry.name.clone(),
                    message: e.to_string(),
                })?;
        }

        zip.finish()
            .map_err(|e| ArchiveError::FinishFailed(e.to_string()))?;
    }

    Ok(buffer)
}
