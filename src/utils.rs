// ABOUTME: Utility functions for the slidemark application
// ABOUTME: Provides input validation, markdown file reading and path handling helpers

use crate::errors::{Result, SlideError};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions accepted as Markdown input.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlideError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SlideError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Whether a path has one of the accepted Markdown extensions.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Read a Markdown input file.
pub fn read_markdown(path: &Path) -> Result<String> {
    validate_file_exists(path)?;
    if !is_markdown_file(path) {
        warn!(
            "{:?} does not look like a Markdown file (expected one of {:?})",
            path, MARKDOWN_EXTENSIONS
        );
    }
    fs::read_to_string(path).map_err(SlideError::FileReadError)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(SlideError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(SlideError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory_exists(parent),
        _ => Ok(()),
    }
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| {
        SlideError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_extensions() {
        assert!(is_markdown_file(Path::new("deck.md")));
        assert!(is_markdown_file(Path::new("deck.MARKDOWN")));
        assert!(is_markdown_file(Path::new("notes.txt")));
        assert!(!is_markdown_file(Path::new("deck.html")));
        assert!(!is_markdown_file(Path::new("README")));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_markdown(Path::new("/no/such/deck.md"));
        assert!(matches!(result, Err(SlideError::PathNotFoundError(_))));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        assert!(matches!(
            validate_file_exists(dir.path()),
            Err(SlideError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parent_directories_are_created() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = dir.path().join("a/b/out.html");
        ensure_parent_directory_exists(&file).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent_directory_exists(Path::new("out.html")).unwrap();
    }
}
