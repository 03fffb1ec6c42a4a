//! Target file validation.
//!
//! Everything downstream assumes a validated project: every `requires`
//! name resolves, names are unique, there are no requirement cycles, and
//! each artifact-producing target declares what it needs to be built.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use crate::core::error::BuildError;
use crate::core::project::Project;

/// Validate a project, returning the first error found.
pub fn validate(project: &Project) -> Result<(), BuildError> {
    check_unique_names(project)?;
    check_required_fields(project)?;
    check_requirements(project)?;
    check_cycles(project)?;
    Ok(())
}

fn check_unique_names(project: &Project) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for target in &project.builds {
        if !seen.insert(target.name.as_str()) {
            return Err(BuildError::DuplicateTarget {
                name: target.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_required_fields(project: &Project) -> Result<(), BuildError> {
    for target in &project.builds {
        if !target.kind.produces_artifact() {
            continue;
        }
        if target.output_name.as_deref().map_or(true, str::is_empty) {
            return Err(BuildError::MissingField {
                target: target.name.clone(),
                field: "outputName",
            });
        }
        if target.source_files.is_empty() {
            return Err(BuildError::MissingField {
                target: target.name.clone(),
                field: "sourceFiles",
            });
        }
        if !target.kind.links() && (!target.libraries.is_empty() || !target.library_paths.is_empty()) {
            tracing::warn!(
                "target `{}`: libraries and libraryPaths are ignored for {} targets",
                target.name,
                target.kind
            );
        }
    }
    Ok(())
}

fn check_requirements(project: &Project) -> Result<(), BuildError> {
    for target in &project.builds {
        for name in &target.requires {
            if project.target(name).is_none() {
                return Err(BuildError::UnresolvedDependency {
                    target: target.name.clone(),
                    name: name.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_cycles(project: &Project) -> Result<(), BuildError> {
    let mut graph = DiGraph::<&str, ()>::new();
    let nodes: HashMap<&str, _> = project
        .builds
        .iter()
        .map(|t| (t.name.as_str(), graph.add_node(t.name.as_str())))
        .collect();

    for target in &project.builds {
        let from = nodes[target.name.as_str()];
        for name in &target.requires {
            if let Some(&to) = nodes.get(name.as_str()) {
                graph.update_edge(from, to, ());
            }
        }
    }

    for scc in tarjan_scc(&graph) {
        let is_cycle = scc.len() > 1 || graph.contains_edge(scc[0], scc[0]);
        if is_cycle {
            let mut cycle: Vec<String> = scc.iter().rev().map(|&n| graph[n].to_string()).collect();
            cycle.push(cycle[0].clone());
            return Err(BuildError::DependencyCycle { cycle });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::CompilerFrontend;
    use crate::core::target::{BuildKind, Target};

    fn project() -> Project {
        Project::new("../..", CompilerFrontend::Gcc, "g++", "ar")
    }

    fn lib(name: &str) -> Target {
        Target::new(name, BuildKind::StaticLibrary)
            .with_output(name)
            .with_sources([format!("{}/src", name)])
    }

    #[test]
    fn test_valid_project() {
        let p = project()
            .with_target(lib("b"))
            .with_target(lib("a").with_requires(["b"]))
            .with_target(Target::new("i", BuildKind::HeaderOnly));
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn test_unresolved_dependency() {
        let p = project().with_target(lib("a").with_requires(["nope"]));
        assert_eq!(
            validate(&p).unwrap_err(),
            BuildError::UnresolvedDependency {
                target: "a".to_string(),
                name: "nope".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_target() {
        let p = project().with_target(lib("a")).with_target(lib("a"));
        assert!(matches!(validate(&p), Err(BuildError::DuplicateTarget { name }) if name == "a"));
    }

    #[test]
    fn test_missing_fields_only_for_artifact_kinds() {
        let p = project().with_target(Target::new("a", BuildKind::Executable).with_sources(["a"]));
        assert!(matches!(
            validate(&p),
            Err(BuildError::MissingField { field: "outputName", .. })
        ));

        let p = project().with_target(Target::new("a", BuildKind::Executable).with_output("a"));
        assert!(matches!(
            validate(&p),
            Err(BuildError::MissingField { field: "sourceFiles", .. })
        ));

        // Header-only and reference targets need neither.
        let p = project()
            .with_target(Target::new("i", BuildKind::HeaderOnly))
            .with_target(Target::new("r", BuildKind::LibraryReference));
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn test_cycles() {
        let p = project()
            .with_target(lib("a").with_requires(["b"]))
            .with_target(lib("b").with_requires(["a"]));
        match validate(&p) {
            Err(BuildError::DependencyCycle { cycle }) => {
                assert_eq!(cycle.len(), 3);
                assert_eq!(cycle.first(), cycle.last());
            }
            other => panic!("expected cycle, got {:?}", other),
        }

        let p = project().with_target(lib("a").with_requires(["a"]));
        assert!(matches!(validate(&p), Err(BuildError::DependencyCycle { .. })));
    }
}
