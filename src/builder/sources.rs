//! Source discovery.
//!
//! Turns a target's `sourceFiles` entries into the list of build-relative
//! source paths the compile steps consume.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use walkdir::WalkDir;

use crate::builder::toolchain::is_absolute;
use crate::core::error::BuildError;
use crate::core::project::Project;
use crate::core::target::Target;

/// Extensions picked up when a source entry names a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx"];

/// Resolves a target's declared sources to concrete files.
pub trait SourceDiscovery {
    /// Return sorted, build-relative source paths for the target.
    ///
    /// Must fail with [`BuildError::NoSourceFiles`] when nothing is found.
    fn discover(&self, target: &Target, project: &Project) -> Result<Vec<String>, BuildError>;
}

/// Discovers sources on the filesystem, relative to a build directory.
#[derive(Debug, Clone)]
pub struct FsSourceDiscovery {
    build_dir: PathBuf,
}

impl FsSourceDiscovery {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        FsSourceDiscovery {
            build_dir: build_dir.into(),
        }
    }

    fn collect_entry(
        &self,
        target: &Target,
        project: &Project,
        entry: &str,
        found: &mut BTreeSet<String>,
    ) -> Result<(), BuildError> {
        let root = self.build_dir.join(&project.project_root);
        let absolute = is_absolute(entry);
        let path = if absolute {
            PathBuf::from(entry)
        } else {
            root.join(entry)
        };

        let display = |file: &Path| -> String {
            if absolute {
                return file.to_string_lossy().into_owned();
            }
            let rel = file.strip_prefix(&root).unwrap_or(file);
            let rel = rel.to_string_lossy().replace('\\', "/");
            let base = project.project_root.trim_end_matches(['/', '\\']);
            if base.is_empty() || base == "." {
                rel
            } else {
                format!("{}/{}", base, rel)
            }
        };

        if path.is_dir() {
            for dir_entry in WalkDir::new(&path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if dir_entry.file_type().is_file() && is_source_file(dir_entry.path()) {
                    found.insert(display(dir_entry.path()));
                }
            }
        } else if path.is_file() {
            found.insert(display(&path));
        } else {
            let pattern = if absolute {
                entry.to_string()
            } else {
                format!(
                    "{}/{}",
                    Pattern::escape(&root.to_string_lossy()),
                    entry
                )
            };
            let paths = glob(&pattern).map_err(|e| BuildError::InvalidPattern {
                target: target.name.clone(),
                pattern: entry.to_string(),
                message: e.msg.to_string(),
            })?;
            for file in paths {
                match file {
                    Ok(file) if file.is_file() => {
                        found.insert(display(&file));
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("glob error: {}", e),
                }
            }
        }

        Ok(())
    }
}

impl SourceDiscovery for FsSourceDiscovery {
    fn discover(&self, target: &Target, project: &Project) -> Result<Vec<String>, BuildError> {
        let mut found = BTreeSet::new();
        for entry in &target.source_files {
            self.collect_entry(target, project, entry, &mut found)?;
        }

        if found.is_empty() {
            return Err(BuildError::NoSourceFiles {
                target: target.name.clone(),
                searched: target.source_files.clone(),
            });
        }

        tracing::debug!("target `{}`: {} source file(s)", target.name, found.len());
        Ok(found.into_iter().collect())
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
