//! Errors raised while turning a target file into a build graph.
//!
//! Every variant is fatal: nothing is written once one of these is returned.

use miette::Diagnostic;
use thiserror::Error;

/// Configuration and discovery errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BuildError {
    /// A `requires` entry names a target that does not exist.
    #[error("in target `{target}`: required target `{name}` not found")]
    #[diagnostic(
        code(aim::unresolved_dependency),
        help("add a build named `{name}` to target.toml or remove it from `requires`")
    )]
    UnresolvedDependency { target: String, name: String },

    /// `buildRule` holds a value outside the five known kinds.
    #[error("in target `{target}`: unknown build rule `{value}`")]
    #[diagnostic(
        code(aim::unknown_build_kind),
        help("expected one of: staticLibrary, dynamicLibrary, executable, headerOnly, libraryReference")
    )]
    UnknownBuildKind { target: String, value: String },

    /// `compilerFrontend` holds an unrecognised value.
    #[error("unknown compiler frontend `{value}`")]
    #[diagnostic(code(aim::unknown_frontend), help("expected `gcc` or `msvc`"))]
    UnknownFrontend { value: String },

    /// A frontend that is declared but has no implementation.
    #[error("compiler frontend `{value}` is not supported")]
    #[diagnostic(code(aim::unsupported_frontend), help("use `gcc` or `msvc`"))]
    UnsupportedFrontend { value: String },

    /// Two builds share a name.
    #[error("target `{name}` is defined more than once")]
    #[diagnostic(code(aim::duplicate_target))]
    DuplicateTarget { name: String },

    /// A field required by the target's build kind is absent.
    #[error("in target `{target}`: missing required field `{field}`")]
    #[diagnostic(code(aim::missing_field))]
    MissingField { target: String, field: &'static str },

    /// Targets require each other.
    #[error("dependency cycle between targets: {}", cycle.join(" -> "))]
    #[diagnostic(code(aim::dependency_cycle))]
    DependencyCycle { cycle: Vec<String> },

    /// A source-bearing target matched no source files.
    #[error("in target `{target}`: failed to find any source files in {}", searched.join(", "))]
    #[diagnostic(code(aim::no_source_files))]
    NoSourceFiles {
        target: String,
        searched: Vec<String>,
    },

    /// A `sourceFiles` entry is not a valid glob pattern.
    #[error("in target `{target}`: invalid source pattern `{pattern}`: {message}")]
    #[diagnostic(code(aim::invalid_pattern))]
    InvalidPattern {
        target: String,
        pattern: String,
        message: String,
    },

    /// Two sources of one target map to the same object file.
    #[error("in target `{target}`: sources `{first}` and `{second}` both compile to `{object}`")]
    #[diagnostic(code(aim::duplicate_object), help("rename one of the sources"))]
    DuplicateObject {
        target: String,
        object: String,
        first: String,
        second: String,
    },

    /// An alias or artifact name is produced by two targets.
    #[error("in target `{target}`: output `{output}` is already produced by another target")]
    #[diagnostic(
        code(aim::duplicate_output),
        help("give the targets distinct names or output names")
    )]
    DuplicateOutput { target: String, output: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = BuildError::UnknownBuildKind {
            target: "a".to_string(),
            value: "mystery".to_string(),
        };
        assert_eq!(err.to_string(), "in target `a`: unknown build rule `mystery`");

        let err = BuildError::NoSourceFiles {
            target: "b".to_string(),
            searched: vec!["../../b/src".to_string(), "../../b/extra".to_string()],
        };
        assert!(err.to_string().contains("../../b/src, ../../b/extra"));
    }

    #[test]
    fn test_cycle_message() {
        let err = BuildError::DependencyCycle {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "dependency cycle between targets: a -> b -> a");
    }
}
