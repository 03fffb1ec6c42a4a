//! Implementation of `aim target <dir> clobber`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::project::{target_file_path, TARGET_FILE_NAME};
use crate::util::config::CONFIG_FILE_NAME;
use crate::util::fs::remove_dir_contents_except;

/// Delete everything in a build directory except its target and config files.
///
/// Refuses to touch a directory without a target file, so a mistyped path
/// cannot wipe an unrelated directory.
pub fn clobber(build_dir: &Path) -> Result<Vec<PathBuf>> {
    if !target_file_path(build_dir).is_file() {
        bail!(
            "no {} in {}\n\
             hint: clobber only runs inside a build directory",
            TARGET_FILE_NAME,
            build_dir.display()
        );
    }

    let removed = remove_dir_contents_except(build_dir, &[TARGET_FILE_NAME, CONFIG_FILE_NAME])?;
    for path in &removed {
        tracing::debug!("removed {}", path.display());
    }
    tracing::info!("removed {} entries from {}", removed.len(), build_dir.display());

    Ok(removed)
}
