//! Include path resolution.

use std::collections::BTreeSet;

use crate::builder::resolver::classify_requirements;
use crate::builder::toolchain::Toolchain;
use crate::core::error::BuildError;
use crate::core::project::Project;
use crate::core::target::Target;

/// Sorted, deduplicated include directories of a target, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet {
    /// Build-relative (or absolute) `includePaths`
    pub regular: Vec<String>,
    /// `systemIncludePaths`, verbatim
    pub system: Vec<String>,
    /// Build-relative `localIncludePaths`
    pub quote: Vec<String>,
}

impl IncludeSet {
    /// Render as compiler flags: regular, then system, then quote.
    pub fn to_flags(&self, toolchain: &dyn Toolchain) -> Vec<String> {
        let mut flags: Vec<String> = self
            .regular
            .iter()
            .map(|p| format!("{}{}", toolchain.include_prefix(), p))
            .collect();

        // Folded categories are already part of `regular`.
        if let Some(prefix) = toolchain.system_include_prefix() {
            flags.extend(self.system.iter().map(|p| format!("{}{}", prefix, p)));
        }
        if let Some(prefix) = toolchain.quote_include_prefix() {
            flags.extend(self.quote.iter().map(|p| format!("{}{}", prefix, p)));
        }

        flags
    }
}

/// Resolve the include set of a target: its own paths plus those of every
/// direct requirement, whatever its kind.
pub fn resolve_includes(
    target: &Target,
    project: &Project,
    toolchain: &dyn Toolchain,
) -> Result<IncludeSet, BuildError> {
    let classified = classify_requirements(target, project)?;

    let mut regular = BTreeSet::new();
    let mut system = BTreeSet::new();
    let mut quote = BTreeSet::new();

    for source in std::iter::once(target).chain(classified.all()) {
        for path in &source.include_paths {
            regular.insert(toolchain.join(&project.project_root, path));
        }
        for path in &source.system_include_paths {
            system.insert(path.clone());
        }
        for path in &source.local_include_paths {
            quote.insert(toolchain.join(&project.project_root, path));
        }
    }

    let mut set = IncludeSet {
        regular: regular.into_iter().collect(),
        system: system.into_iter().collect(),
        quote: quote.into_iter().collect(),
    };

    if toolchain.system_include_prefix().is_none() {
        fold(&mut set.regular, &mut set.system, toolchain);
    }
    if toolchain.quote_include_prefix().is_none() {
        fold(&mut set.regular, &mut set.quote, toolchain);
    }

    Ok(set)
}

fn fold(regular: &mut Vec<String>, other: &mut Vec<String>, toolchain: &dyn Toolchain) {
    regular.extend(other.drain(..).map(|p| toolchain.native_path(&p)));
    regular.sort();
    regular.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::toolchain::{GccToolchain, MsvcToolchain};
    use crate::test_support::fixtures;

    #[test]
    fn test_two_target_gcc() {
        let project = fixtures::two_target_project();
        let a = project.target("a").unwrap();
        let includes = resolve_includes(a, &project, &GccToolchain).unwrap();

        assert_eq!(
            includes.to_flags(&GccToolchain),
            vec!["-I../../a/include", "-I../../b/include"]
        );
    }

    #[test]
    fn test_two_target_msvc() {
        let project = fixtures::two_target_project();
        let a = project.target("a").unwrap();
        let includes = resolve_includes(a, &project, &MsvcToolchain).unwrap();

        assert_eq!(
            includes.to_flags(&MsvcToolchain),
            vec!["/I..\\..\\a\\include", "/I..\\..\\b\\include"]
        );
    }

    #[test]
    fn test_categories_and_order_gcc() {
        let project = fixtures::full_project();
        let a = project.target("a").unwrap();
        let flags = resolve_includes(a, &project, &GccToolchain)
            .unwrap()
            .to_flags(&GccToolchain);

        assert_eq!(
            flags,
            vec![
                "-I../../a/include",
                "-I../../b/include",
                "-I../../c/include",
                "-I../../i/include",
                "-I../../r/include",
                "-isystem/usr/include",
                "-iquote../../b/local/include",
            ]
        );
    }

    #[test]
    fn test_msvc_folds_system_and_quote() {
        let project = fixtures::full_project();
        let a = project.target("a").unwrap();
        let includes = resolve_includes(a, &project, &MsvcToolchain).unwrap();

        assert!(includes.system.is_empty());
        assert!(includes.quote.is_empty());

        let flags = includes.to_flags(&MsvcToolchain);
        assert!(flags.iter().all(|f| f.starts_with("/I")));
        assert!(flags.contains(&"/I\\usr\\include".to_string()));
        assert!(flags.contains(&"/I..\\..\\b\\local\\include".to_string()));
        assert_eq!(flags.len(), 7);
    }

    #[test]
    fn test_requirement_order_does_not_matter() {
        let mut project = fixtures::full_project();
        let a = project.target("a").unwrap();
        let before = resolve_includes(a, &project, &GccToolchain).unwrap();

        let a = project.builds.iter_mut().find(|t| t.name == "a").unwrap();
        a.requires.reverse();
        let a = project.target("a").unwrap();
        let after = resolve_includes(a, &project, &GccToolchain).unwrap();

        assert_eq!(before, after);
        assert_eq!(
            resolve_includes(a, &project, &GccToolchain).unwrap(),
            after
        );
    }

    #[test]
    fn test_absolute_include_kept() {
        let project = fixtures::two_target_project();
        let mut b = project.target("b").unwrap().clone();
        b.include_paths.push("/opt/sdk/include".to_string());

        let includes = resolve_includes(&b, &project, &GccToolchain).unwrap();
        assert_eq!(includes.regular, vec!["../../b/include", "/opt/sdk/include"]);
    }
}
