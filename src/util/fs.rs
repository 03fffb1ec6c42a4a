//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file atomically.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old file or the new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush file: {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to write file: {}", path.display()))?;

    Ok(())
}

/// Remove every entry of a directory except the named ones.
///
/// Returns the removed paths, sorted.
pub fn remove_dir_contents_except(dir: &Path, keep: &[&str]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy();
        if keep.iter().any(|k| *k == name) {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir_all(path)
                .with_context(|| format!("failed to remove directory: {}", path.display()))?;
        } else {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove file: {}", path.display()))?;
        }
        removed.push(path.to_path_buf());
    }

    Ok(removed)
}
