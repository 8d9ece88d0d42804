//! Common utility functions shared across the codebase.

use std::path::Path;

/// Split a delimited list, trimming each item and dropping empty ones.
///
/// # Examples
///
/// ```
/// use exprmig::utils::split_list;
///
/// assert_eq!(split_list("yaml, yml ,sh", ','), vec!["yaml", "yml", "sh"]);
/// assert_eq!(split_list("yaml,,", ','), vec!["yaml"]);
/// assert!(split_list("   ", ',').is_empty());
/// ```
pub fn split_list(text: &str, separator: char) -> Vec<&str> {
    text.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Display `path` relative to `root` when possible, with `/` separators.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
