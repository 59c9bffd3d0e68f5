//! Destination directory precondition.

use crate::error::InstallError;
use std::fs;
use std::path::Path;

/// Accepts a destination that does not exist or is an empty directory.
///
/// Existence is checked without following a final symlink, so a dangling
/// link is rejected. A link that resolves to an empty directory is accepted.
pub fn check_destination(path: &Path) -> Result<(), InstallError> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(());
    }
    if path.is_dir() && is_empty_dir(path) {
        return Ok(());
    }
    Err(InstallError::InvalidDestination {
        path: path.to_path_buf(),
    })
}

fn is_empty_dir(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) => {
            tracing::debug!("read_dir {} failed: {}", path.display(), e);
            false
        }
    }
}
