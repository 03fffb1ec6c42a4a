//! compile_commands.json generation for IDE integration.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::builder::plan::BuildPlan;
use crate::builder::toolchain::Toolchain;

/// compile_commands.json entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    pub directory: String,
    pub file: String,
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Build the compilation database for a plan.
///
/// Every step's paths are build-relative, so `directory` is the build
/// directory for all entries.
pub fn compile_commands(
    plan: &BuildPlan,
    toolchain: &dyn Toolchain,
    build_dir: &Path,
) -> Vec<CompileCommand> {
    let directory = build_dir.display().to_string();
    plan.compile_steps()
        .map(|step| CompileCommand {
            directory: directory.clone(),
            file: step.source.clone(),
            arguments: toolchain.compile_arguments(step),
            output: Some(step.output.clone()),
        })
        .collect()
}

/// Render the compilation database as pretty-printed JSON.
pub fn to_json(commands: &[CompileCommand]) -> Result<String> {
    Ok(serde_json::to_string_pretty(commands)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::toolchain::GccToolchain;
    use crate::test_support::{fixtures, MockSourceDiscovery};

    #[test]
    fn test_compile_commands_from_plan() {
        let project = fixtures::two_target_project();
        let plan = BuildPlan::new(&project, &GccToolchain, &MockSourceDiscovery::new()).unwrap();
        let commands = compile_commands(&plan, &GccToolchain, Path::new("/work/builds/debug"));

        assert_eq!(commands.len(), 2);
        let b = &commands[0];
        assert_eq!(b.directory, "/work/builds/debug");
        assert_eq!(b.file, "../../b/src/main.cpp");
        assert_eq!(b.output.as_deref(), Some("b/main.o"));
        assert_eq!(b.arguments[0], "g++");
        assert!(b.arguments.contains(&"-I../../b/include".to_string()));
    }

    #[test]
    fn test_compile_command_without_output() {
        let cmd = CompileCommand {
            directory: "/project".to_string(),
            file: "src/lib.c".to_string(),
            arguments: vec!["gcc".to_string(), "-c".to_string()],
            output: None,
        };

        let json = to_json(&[cmd.clone()]).unwrap();
        assert!(json.contains("directory"));
        assert!(!json.contains("output"));

        let parsed: Vec<CompileCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![cmd]);
    }
}
