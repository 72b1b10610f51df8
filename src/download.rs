//! Single fetch-to-temp-file download for the destination screen.

use crate::error::TransferError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Download `url` into a temporary file and return its path.
///
/// The temp file keeps the URL's extension so the transfer procedure can
/// derive a format from it. The file is handed over to the caller (the
/// wizard session) and is consumed by the transfer's final replace; a
/// session abandoned before applying leaks it, which is accepted.
pub async fn fetch_to_temp(
    client: &reqwest::Client,
    url: &str,
) -> Result<PathBuf, TransferError> {
    tracing::info!("Downloading update file from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| TransferError::DownloadFailed(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TransferError::DownloadFailed(e.to_string()))?;

    let temp = tempfile::Builder::new()
        .prefix("trackswap-")
        .suffix(&url_suffix(url))
        .tempfile()
        .map_err(|e| TransferError::DownloadFailed(e.to_string()))?;

    let (mut file, path) = temp
        .keep()
        .map_err(|e| TransferError::DownloadFailed(e.to_string()))?;
    file.write_all(&bytes)
        .map_err(|e| TransferError::DownloadFailed(e.to_string()))?;

    tracing::info!("Downloaded {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Extension suffix of the URL's final path segment, dot included.
fn url_suffix(url: &str) -> String {
    Path::new(url)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
