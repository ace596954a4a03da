use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Result;

/// Collect log files under `root`, sorted by path
///
/// A file path is returned as-is (no extension check) so users can point at
/// a single file explicitly. Unreadable directory entries are skipped.
pub fn discover_log_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    // Surface a missing root instead of silently returning nothing
    std::fs::metadata(root)?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect();

    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "discovered log files");
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
