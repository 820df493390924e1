//! Local export routing
//!
//! A design can opt out of remote publishing through a single property on
//! its property map. An empty value delivers the package beside the design
//! file; a non-empty value names a subdirectory relative to the design
//! file's directory, created recursively if missing. When the key is absent
//! the package goes to the remote service instead.

use crate::adapters::board::BoardSource;
use crate::config::ExportConfig;
use crate::domain::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename the locally delivered package gets: `aisler_export_<stem>.zip`
pub fn export_file_name(board: &dyn BoardSource) -> String {
    let stem = board
        .file_path()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "board".to_string());
    format!("aisler_export_{stem}.zip")
}

/// Delivers the archive locally if the design asks for it
///
/// Returns `Ok(None)` when the local-export property is absent (remote
/// publishing applies), or `Ok(Some(path))` with the final package path
/// after a successful copy.
pub fn deliver_locally(
    board: &dyn BoardSource,
    export: &ExportConfig,
    archive: &Path,
) -> Result<Option<PathBuf>> {
    let Some(value) = board.property(&export.local_export_property) else {
        return Ok(None);
    };

    let design_dir = board
        .file_path()
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let dest_dir = if value.is_empty() {
        design_dir
    } else {
        let dir = design_dir.join(&value);
        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
        }
        dir
    };

    let destination = dest_dir.join(export_file_name(board));
    fs::copy(archive, &destination)?;

    tracing::info!(
        destination = %destination.display(),
        "Package delivered locally, remote publishing skipped"
    );
    Ok(Some(destination))
}
