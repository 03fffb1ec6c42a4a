//! Link information resolution.
//!
//! The linker flag for a required library uses its logical name while the
//! build-order edge uses the decorated artifact name. The two must not be
//! confused: ninja needs the file, the linker needs the bare name.

use std::collections::BTreeSet;
use std::path::Path;

use crate::builder::resolver::classify_requirements;
use crate::builder::toolchain::Toolchain;
use crate::core::error::BuildError;
use crate::core::project::Project;
use crate::core::target::{BuildKind, Target};

/// Everything a link step needs beyond its object files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkInfo {
    /// Run-time search path argument (GCC-like only)
    pub rpath: Option<String>,
    /// Search path flags for the build directories of required libraries
    pub required_library_paths: Vec<String>,
    /// Search path flags declared on the target itself
    pub external_library_paths: Vec<String>,
    /// Search path flags pulled in from library references
    pub reference_library_paths: Vec<String>,
    /// Library flags for required project libraries
    pub required_libraries: Vec<String>,
    /// Library flags declared on the target itself
    pub external_libraries: Vec<String>,
    /// Library flags pulled in from library references
    pub reference_libraries: Vec<String>,
    /// Decorated artifact names of required libraries
    pub implicit_inputs: Vec<String>,
}

impl LinkInfo {
    /// The linker arguments in their fixed order: rpath, all search paths,
    /// then all library names.
    pub fn linker_args(&self) -> Vec<String> {
        self.rpath
            .iter()
            .chain(&self.required_library_paths)
            .chain(&self.external_library_paths)
            .chain(&self.reference_library_paths)
            .chain(&self.required_libraries)
            .chain(&self.external_libraries)
            .chain(&self.reference_libraries)
            .cloned()
            .collect()
    }
}

/// Resolve link information for a target.
pub fn resolve_link_info(
    target: &Target,
    project: &Project,
    toolchain: &dyn Toolchain,
) -> Result<LinkInfo, BuildError> {
    let classified = classify_requirements(target, project)?;
    let mut info = LinkInfo::default();

    let mut dynamic_dirs = BTreeSet::new();
    for dep in &classified.linkable {
        info.required_library_paths
            .push(toolchain.library_path_flag(&toolchain.native_path(&dep.name)));
        info.required_libraries
            .push(toolchain.library_flag(dep.logical_name()));
        if let Some(artifact) = toolchain.artifact_name(dep.kind, dep.logical_name()) {
            info.implicit_inputs.push(artifact);
        }
        if dep.kind == BuildKind::DynamicLibrary {
            dynamic_dirs.insert(dep.name.as_str());
        }
    }

    info.external_library_paths = library_path_flags(&target.library_paths, project, toolchain);
    info.external_libraries = library_flags(&target.libraries, toolchain);

    for reference in classified.references() {
        info.reference_library_paths
            .extend(library_path_flags(&reference.library_paths, project, toolchain));
        info.reference_libraries
            .extend(library_flags(&reference.libraries, toolchain));
    }

    let mut tokens = vec!["$ORIGIN".to_string()];
    for dir in dynamic_dirs {
        tokens.push(format!("$ORIGIN/{}", relative_dir(dir, &target.name)));
    }
    info.rpath = toolchain.rpath_arg(&tokens);

    Ok(info)
}

/// Path of `dir` as seen from `from`, both build-relative.
fn relative_dir(dir: &str, from: &str) -> String {
    pathdiff::diff_paths(dir, from)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|| Path::new(dir).to_string_lossy().into_owned())
}

fn library_path_flags(paths: &[String], project: &Project, toolchain: &dyn Toolchain) -> Vec<String> {
    paths
        .iter()
        .map(|p| toolchain.library_path_flag(&toolchain.join(&project.project_root, p)))
        .collect()
}

/// Declared libraries keep their order and repeats: `-lx -ly -lx` is how
/// mutually dependent static libraries are linked.
fn library_flags(libraries: &[String], toolchain: &dyn Toolchain) -> Vec<String> {
    libraries.iter().map(|l| toolchain.library_flag(l)).collect()
}
