//! Build plan generation.
//!
//! A BuildPlan describes every compile, archive, link and alias step of a
//! project. The whole plan is computed in memory before anything is
//! rendered, so a failing target never leaves a partial build file behind.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;

use crate::builder::flags::resolve_toolchain;
use crate::builder::includes::resolve_includes;
use crate::builder::link::resolve_link_info;
use crate::builder::ninja::{Edge, NinjaWriter};
use crate::builder::sources::SourceDiscovery;
use crate::builder::toolchain::Toolchain;
use crate::core::error::BuildError;
use crate::core::project::{CompilerFrontend, Project};
use crate::core::target::{BuildKind, Target};

/// A complete build plan.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    /// Frontend the plan was generated for
    pub frontend: CompilerFrontend,

    /// All build steps, grouped by target in declaration order
    pub steps: Vec<BuildStep>,
}

/// A build step in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildStep {
    /// Compile a source file to an object file
    Compile(CompileStep),
    /// Create a static library from object files
    Archive(ArchiveStep),
    /// Link objects into a shared library or executable
    Link(LinkStep),
    /// Give an output another name
    Alias(AliasStep),
}

/// A single compilation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileStep {
    /// Target name
    pub target: String,

    /// Source file, build-relative
    pub source: String,

    /// Output object file, build-relative
    pub output: String,

    /// Compiler executable
    pub compiler: String,

    /// Include flags
    pub includes: Vec<String>,

    /// Define flags
    pub defines: Vec<String>,

    /// Compiler flags
    pub flags: Vec<String>,
}

/// A step to create a static library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveStep {
    /// Target name
    pub target: String,

    /// Object files to archive
    pub objects: Vec<String>,

    /// Output archive file
    pub output: String,

    /// Archiver executable
    pub archiver: String,
}

/// Which link rule a link step uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRule {
    Shared,
    Executable,
}

impl LinkRule {
    /// Rule name in the build file.
    pub fn rule_name(&self) -> &'static str {
        match self {
            LinkRule::Shared => "shared",
            LinkRule::Executable => "exe",
        }
    }
}

/// A single link step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStep {
    /// Target name
    pub target: String,

    /// Shared library or executable
    pub rule: LinkRule,

    /// Object files to link
    pub objects: Vec<String>,

    /// Output file
    pub output: String,

    /// Decorated names of required libraries (build order only)
    pub implicit_inputs: Vec<String>,

    /// Files the linker writes besides the output
    pub implicit_outputs: Vec<String>,

    /// Compiler driver used to link
    pub compiler: String,

    /// Include flags
    pub includes: Vec<String>,

    /// Define flags
    pub defines: Vec<String>,

    /// Compiler flags
    pub flags: Vec<String>,

    /// Library search paths, libraries and rpath, in link order
    pub linker_args: Vec<String>,
}

/// A phony alias from one name to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasStep {
    /// The new name
    pub output: String,

    /// What it stands for
    pub input: String,
}

/// Tracks every output so no two steps claim the same file.
#[derive(Default)]
struct Outputs {
    claimed: HashSet<String>,
    objects: HashMap<String, String>,
}

impl Outputs {
    fn claim(&mut self, target: &Target, output: &str) -> Result<(), BuildError> {
        if !self.claimed.insert(output.to_string()) {
            return Err(BuildError::DuplicateOutput {
                target: target.name.clone(),
                output: output.to_string(),
            });
        }
        Ok(())
    }

    fn claim_object(&mut self, target: &Target, object: &str, source: &str) -> Result<(), BuildError> {
        if let Some(first) = self.objects.insert(object.to_string(), source.to_string()) {
            return Err(BuildError::DuplicateObject {
                target: target.name.clone(),
                object: object.to_string(),
                first,
                second: source.to_string(),
            });
        }
        self.claim(target, object)
    }
}

impl BuildPlan {
    /// Create a build plan for every target of a validated project.
    pub fn new(
        project: &Project,
        toolchain: &dyn Toolchain,
        discovery: &dyn SourceDiscovery,
    ) -> Result<Self, BuildError> {
        let mut steps = Vec::new();
        let mut outputs = Outputs::default();

        for target in &project.builds {
            let artifact = match target.kind {
                BuildKind::HeaderOnly | BuildKind::LibraryReference => {
                    tracing::debug!("target `{}`: {}, nothing to build", target.name, target.kind);
                    continue;
                }
                BuildKind::StaticLibrary => toolchain.static_library_name(target.logical_name()),
                BuildKind::DynamicLibrary => toolchain.dynamic_library_name(target.logical_name()),
                BuildKind::Executable => toolchain.executable_name(target.logical_name()),
            };

            tracing::debug!("target `{}`: {} -> {}", target.name, target.kind, artifact);
            emit_target(
                target,
                &artifact,
                project,
                toolchain,
                discovery,
                &mut outputs,
                &mut steps,
            )?;
        }

        Ok(BuildPlan {
            frontend: toolchain.frontend(),
            steps,
        })
    }

    /// Iterate over the compile steps.
    pub fn compile_steps(&self) -> impl Iterator<Item = &CompileStep> {
        self.steps.iter().filter_map(|step| match step {
            BuildStep::Compile(compile) => Some(compile),
            _ => None,
        })
    }

    /// Get the number of compile steps.
    pub fn compile_count(&self) -> usize {
        self.compile_steps().count()
    }

    /// Get the number of archive and link steps.
    pub fn artifact_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, BuildStep::Archive(_) | BuildStep::Link(_)))
            .count()
    }

    /// Render the plan as a ninja build file.
    pub fn to_ninja(&self, toolchain: &dyn Toolchain) -> String {
        let mut w = NinjaWriter::new();
        w.comment("Generated by aim. Do not edit; rerun `aim target <dir> generate` instead.");
        w.variable("ninja_required_version", "1.7");
        w.newline();

        for rule in toolchain.rules() {
            w.rule(&rule);
            w.newline();
        }

        for step in &self.steps {
            match step {
                BuildStep::Compile(c) => w.build(&Edge {
                    outputs: std::slice::from_ref(&c.output),
                    rule: "compile",
                    inputs: std::slice::from_ref(&c.source),
                    variables: vec![
                        ("compiler", c.compiler.clone()),
                        ("defines", c.defines.join(" ")),
                        ("flags", c.flags.join(" ")),
                        ("includes", c.includes.join(" ")),
                    ],
                    ..Edge::default()
                }),
                BuildStep::Archive(a) => {
                    w.build(&Edge {
                        outputs: std::slice::from_ref(&a.output),
                        rule: "archive",
                        inputs: &a.objects,
                        variables: vec![("archiver", a.archiver.clone())],
                        ..Edge::default()
                    });
                    w.newline();
                }
                BuildStep::Link(l) => {
                    w.build(&Edge {
                        outputs: std::slice::from_ref(&l.output),
                        implicit_outputs: &l.implicit_outputs,
                        rule: l.rule.rule_name(),
                        inputs: &l.objects,
                        implicit: &l.implicit_inputs,
                        variables: vec![
                            ("compiler", l.compiler.clone()),
                            ("defines", l.defines.join(" ")),
                            ("flags", l.flags.join(" ")),
                            ("includes", l.includes.join(" ")),
                            ("linker_args", l.linker_args.join(" ")),
                        ],
                    });
                    w.newline();
                }
                BuildStep::Alias(alias) => w.build(&Edge {
                    outputs: std::slice::from_ref(&alias.output),
                    rule: "phony",
                    inputs: std::slice::from_ref(&alias.input),
                    ..Edge::default()
                }),
            }
        }

        w.finish()
    }
}

fn emit_target(
    target: &Target,
    artifact: &str,
    project: &Project,
    toolchain: &dyn Toolchain,
    discovery: &dyn SourceDiscovery,
    outputs: &mut Outputs,
    steps: &mut Vec<BuildStep>,
) -> Result<(), BuildError> {
    let sep = toolchain.separator();
    let resolved = resolve_toolchain(target, project);
    let includes = resolve_includes(target, project, toolchain)?.to_flags(toolchain);
    let defines = resolved.define_flags(toolchain);

    let mut flags = Vec::new();
    if target.kind == BuildKind::DynamicLibrary {
        flags.extend(toolchain.dynamic_library_flags().iter().map(|f| f.to_string()));
    }
    flags.extend(resolved.flags.iter().cloned());

    let sources = discovery.discover(target, project)?;
    let mut objects = Vec::with_capacity(sources.len());
    for source in &sources {
        let stem = Path::new(source)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.clone());
        let object = format!(
            "{}{}{}.{}",
            target.name,
            sep,
            stem,
            toolchain.object_extension()
        );
        outputs.claim_object(target, &object, source)?;

        steps.push(BuildStep::Compile(CompileStep {
            target: target.name.clone(),
            source: toolchain.native_path(source),
            output: object.clone(),
            compiler: resolved.compiler.clone(),
            includes: includes.clone(),
            defines: defines.clone(),
            flags: flags.clone(),
        }));
        objects.push(object);
    }

    let output = format!("{}{}{}", target.name, sep, artifact);
    outputs.claim(target, &output)?;

    match target.kind {
        BuildKind::StaticLibrary => {
            steps.push(BuildStep::Archive(ArchiveStep {
                target: target.name.clone(),
                objects,
                output: output.clone(),
                archiver: resolved.archiver,
            }));
        }
        BuildKind::DynamicLibrary | BuildKind::Executable => {
            let link = resolve_link_info(target, project, toolchain)?;
            let (rule, implicit_outputs) = if target.kind == BuildKind::DynamicLibrary {
                let side = toolchain.dynamic_library_side_outputs(
                    &toolchain.native_path(&target.name),
                    target.logical_name(),
                );
                (LinkRule::Shared, side)
            } else {
                (LinkRule::Executable, Vec::new())
            };
            for side in &implicit_outputs {
                outputs.claim(target, side)?;
            }

            steps.push(BuildStep::Link(LinkStep {
                target: target.name.clone(),
                rule,
                objects,
                output: output.clone(),
                linker_args: link.linker_args(),
                implicit_inputs: link.implicit_inputs,
                implicit_outputs,
                compiler: resolved.compiler,
                includes,
                defines,
                flags,
            }));
        }
        BuildKind::HeaderOnly | BuildKind::LibraryReference => {}
    }

    // output path -> decorated name -> logical name -> target name
    let mut chain = vec![
        output.as_str(),
        artifact,
        target.logical_name(),
        target.name.as_str(),
    ];
    chain.dedup();
    for pair in chain.windows(2) {
        outputs.claim(target, pair[1])?;
        steps.push(BuildStep::Alias(AliasStep {
            output: pair[1].to_string(),
            input: pair[0].to_string(),
        }));
    }

    Ok(())
}
