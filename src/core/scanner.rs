use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use super::error::{Result, TranslateError};

/// Collect every regular file under `root` whose name ends with one of
/// `extensions` (given without the leading dot).
///
/// Symbolic links are neither followed nor returned. Paths matching any of
/// `ignores` (glob, relative to `root`) are skipped. Any traversal error aborts
/// the scan.
pub fn scan_files(root: &Path, extensions: &[String], ignores: &[Pattern]) -> Result<Vec<PathBuf>> {
    let suffixes: Vec<String> = extensions.iter().map(|ext| format!(".{}", ext)).collect();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| TranslateError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if ignores.iter().any(|p| p.matches_path(relative)) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
            tracing::debug!("Scanning {}", path.display());
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
