//! Per-target toolchain resolution.
//!
//! Each field falls back to the project default on its own. A target that
//! overrides `flags` replaces the default flag list outright; lists from the
//! two layers are never concatenated.

use serde::Serialize;

use crate::builder::toolchain::Toolchain;
use crate::core::project::Project;
use crate::core::target::Target;

/// The effective compiler, archiver, flags and defines of a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedToolchain {
    pub compiler: String,
    pub archiver: String,
    pub flags: Vec<String>,
    /// Bare define names, prefixed only when emitted
    pub defines: Vec<String>,
}

impl ResolvedToolchain {
    /// Defines in the frontend's preprocessor flag syntax.
    pub fn define_flags(&self, toolchain: &dyn Toolchain) -> Vec<String> {
        self.defines
            .iter()
            .map(|d| toolchain.define_flag(d))
            .collect()
    }
}

/// Resolve a target's toolchain against the project defaults.
pub fn resolve_toolchain(target: &Target, project: &Project) -> ResolvedToolchain {
    ResolvedToolchain {
        compiler: target
            .compiler
            .clone()
            .unwrap_or_else(|| project.compiler.clone()),
        archiver: target
            .archiver
            .clone()
            .unwrap_or_else(|| project.archiver.clone()),
        flags: target
            .flags
            .clone()
            .unwrap_or_else(|| project.flags.clone()),
        defines: target
            .defines
            .clone()
            .unwrap_or_else(|| project.defines.clone()),
    }
}
