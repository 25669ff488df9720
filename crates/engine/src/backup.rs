//! Whole-file copies of the store.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::ResultEngine;

const DEFAULT_EXTENSION: &str = "db";

/// `backup_<YYYYMMDD_HHMMSS>.<ext>`, with the extension of the store file.
pub fn backup_file_name(store: &Path, at: NaiveDateTime) -> String {
    let extension = store
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION);
    format!("backup_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

/// Copies the store file into `dest_dir`, creating it if needed, and returns
/// the path written.
///
/// The copy is taken as-is; writes happening during the copy are not
/// coordinated with it.
pub fn create_backup(store: &Path, dest_dir: &Path, at: NaiveDateTime) -> ResultEngine<PathBuf> {
    std::fs::create_dir_all(dest_dir)?;
    let target = dest_dir.join(backup_file_name(store, at));
    let bytes = std::fs::copy(store, &target)?;
    tracing::info!(
        source = %store.display(),
        target = %target.display(),
        bytes,
        "store backup written"
    );
    Ok(target)
}
