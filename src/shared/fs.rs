//! Usage: Small filesystem helpers for the config store (optional reads, atomic replace with backup).

use std::path::{Path, PathBuf};

pub(crate) fn read_optional_to_string(path: &Path) -> Result<Option<String>, String> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path.file_name().and_then(|v| v.to_str()).unwrap_or("file");
    path.with_file_name(format!("{file_name}.{suffix}"))
}

/// Writes via `<name>.tmp`, moves the previous file to `<name>.bak`, then promotes the temp file.
/// On a failed promote the backup is moved back so the old content survives.
pub(crate) fn replace_file_with_backup(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create dir {}: {e}", parent.display()))?;
        }
    }

    let tmp_path = sibling_path(path, "tmp");
    let backup_path = sibling_path(path, "bak");

    std::fs::write(&tmp_path, bytes)
        .map_err(|e| format!("failed to write temp file {}: {e}", tmp_path.display()))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(path, &backup_path)
            .map_err(|e| format!("failed to create backup {}: {e}", backup_path.display()))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::rename(&backup_path, path);
        return Err(format!("failed to finalize {}: {e}", path.display()));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(())
}
