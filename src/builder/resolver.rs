//! Dependency resolution.
//!
//! Requirements are followed one hop only: a target sees its direct
//! requirements, never their requirements. Link and include information is
//! the union of what each direct requirement contributes.

use std::collections::HashSet;

use crate::core::error::BuildError;
use crate::core::project::Project;
use crate::core::target::{BuildKind, Target};

/// Direct requirements of a target, partitioned by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified<'a> {
    /// Static and dynamic libraries (produce an artifact to link against)
    pub linkable: Vec<&'a Target>,
    /// Header-only bundles and external library references
    pub reference_only: Vec<&'a Target>,
    /// Executables listed in `requires`; they only order the build
    pub other: Vec<&'a Target>,
}

impl<'a> Classified<'a> {
    /// All direct requirements regardless of role, sorted by name.
    pub fn all(&self) -> Vec<&'a Target> {
        let mut all: Vec<&'a Target> = self
            .linkable
            .iter()
            .chain(&self.reference_only)
            .chain(&self.other)
            .copied()
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Library references only (header-only entries excluded).
    pub fn references(&self) -> impl Iterator<Item = &'a Target> + '_ {
        self.reference_only
            .iter()
            .copied()
            .filter(|t| t.kind == BuildKind::LibraryReference)
    }
}

/// Find a target by name.
pub fn find_target<'a>(
    owner: &str,
    name: &str,
    project: &'a Project,
) -> Result<&'a Target, BuildError> {
    project
        .target(name)
        .ok_or_else(|| BuildError::UnresolvedDependency {
            target: owner.to_string(),
            name: name.to_string(),
        })
}

/// Partition a target's direct requirements by build kind.
///
/// Duplicate names are dropped (first occurrence wins) and each partition
/// is sorted by name so the result does not depend on declaration order.
pub fn classify_requirements<'a>(
    target: &Target,
    project: &'a Project,
) -> Result<Classified<'a>, BuildError> {
    let mut seen = HashSet::new();
    let mut classified = Classified::default();

    for name in &target.requires {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let dep = find_target(&target.name, name, project)?;
        match dep.kind {
            BuildKind::StaticLibrary | BuildKind::DynamicLibrary => classified.linkable.push(dep),
            BuildKind::HeaderOnly | BuildKind::LibraryReference => {
                classified.reference_only.push(dep)
            }
            BuildKind::Executable => classified.other.push(dep),
        }
    }

    classified.linkable.sort_by(|a, b| a.name.cmp(&b.name));
    classified.reference_only.sort_by(|a, b| a.name.cmp(&b.name));
    classified.other.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(classified)
}
