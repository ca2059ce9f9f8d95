use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn read_to_string_if_exists(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

/// List files under `root` whose extension matches one of `extensions`.
/// A missing root yields an empty list rather than an error.
pub fn list_files_with_extensions(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|wanted| wanted == ext))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}

pub fn is_test_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|file| file.to_str())
        .unwrap_or_default();
    name.contains("test") || path.to_string_lossy().contains("/tests/")
}
