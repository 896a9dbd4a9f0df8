//! Local filesystem fetcher

use crate::error::{BundleError, BundleResult};
use std::path::Path;
use tracing::error;

/// Read the bundle bytes at `path`
pub async fn fetch(path: &Path) -> BundleResult<Vec<u8>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(_) => {
            error!("invalid bundle path: {}", path.display());
            return Err(BundleError::PathNotFound(path.to_path_buf()));
        }
    };
    if !metadata.is_file() {
        error!("bundle path is not a regular file: {}", path.display());
        return Err(BundleError::PathNotFile(path.to_path_buf()));
    }
    tokio::fs::read(path).await.map_err(|err| {
        error!("failed to read bundle at {}: {err}", path.display());
        BundleError::io(format!("reading bundle at {}", path.display()), err)
    })
}
