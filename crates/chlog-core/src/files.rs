//! Changelog and override document I/O.
//!
//! Files are read whole and rewritten whole; there is no partial update.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur when reading or writing files.
#[derive(Debug, Error)]
pub enum FileError {
    /// Failed to read file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Reads a file, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_optional(path: &Path) -> FileResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "read file");
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(FileError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes a file, creating missing parent directories.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub fn write_file(path: &Path, content: &str) -> FileResult<()> {
    let write_err = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Places `text` in front of the current contents of `path`.
///
/// A missing file is treated as empty.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn prepend_to_file(path: &Path, text: &str) -> FileResult<()> {
    let existing = read_optional(path)?.unwrap_or_default();
    write_file(path, &format!("{text}{existing}"))
}
