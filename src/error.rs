use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the transfer procedure and its collaborators.
///
/// Everything that touches the primary tag set or the final file replace
/// propagates one of these to the caller. The comment-synthesis step is the
/// deliberate exception: its failures are absorbed inside
/// [`crate::transfer`] and never reach here.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The file is missing, its header is corrupt, or the tag layer does not
    /// recognize the format.
    #[error("unsupported or unreadable audio file: {0}")]
    UnsupportedFormat(PathBuf),

    /// Persisting tags or replacing the file failed.
    #[error("failed to write to {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// The single fetch-to-temp-file download failed.
    #[error("download failed: {0}")]
    DownloadFailed(String),

    /// A required user selection is missing or invalid.
    #[error("{0}")]
    ValidationError(String),
}

impl TransferError {
    pub fn write_failed(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::WriteFailed {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
