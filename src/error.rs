//! File-level errors for translation tables.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::codec::CodecError;

/// Errors raised while reading or writing a translations file.
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// The file content could not be decoded, or rows could not be encoded.
    #[error("Malformed translations table: {0}")]
    Codec(#[from] CodecError),

    /// The file exists but could not be read, or could not be written.
    #[error("Failed to access translations file '{}': {source}", path.display())]
    FileAccess {
        /// Translations file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl TranslatorError {
    /// Wraps an I/O error for `path`.
    pub(crate) fn file_access(path: &Path, source: std::io::Error) -> Self {
        Self::FileAccess { path: path.to_path_buf(), source }
    }
}
