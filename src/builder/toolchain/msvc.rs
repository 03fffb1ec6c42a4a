//! MSVC frontend (cl.exe, clang-cl).

use crate::builder::ninja::Rule;
use crate::builder::plan::CompileStep;
use crate::core::project::CompilerFrontend;

use super::Toolchain;

/// MSVC-like frontend.
///
/// Has no system or quote include categories; those paths are folded into
/// `/I`. Libraries are named by file (`x.lib`) rather than by `-l`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsvcToolchain;

fn has_extension(name: &str, ext: &str) -> bool {
    name.len() > ext.len() && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

impl Toolchain for MsvcToolchain {
    fn frontend(&self) -> CompilerFrontend {
        CompilerFrontend::Msvc
    }

    fn separator(&self) -> char {
        '\\'
    }

    fn include_prefix(&self) -> &'static str {
        "/I"
    }

    fn system_include_prefix(&self) -> Option<&'static str> {
        None
    }

    fn quote_include_prefix(&self) -> Option<&'static str> {
        None
    }

    fn define_prefix(&self) -> &'static str {
        "/D"
    }

    fn library_path_prefix(&self) -> &'static str {
        "/LIBPATH:"
    }

    fn library_flag(&self, name: &str) -> String {
        // DLLs are linked through their import library.
        if has_extension(name, ".dll") {
            format!("{}.lib", &name[..name.len() - 4])
        } else if has_extension(name, ".lib") {
            name.to_string()
        } else {
            format!("{}.lib", name)
        }
    }

    fn static_library_name(&self, logical: &str) -> String {
        format!("{}.lib", logical)
    }

    fn dynamic_library_name(&self, logical: &str) -> String {
        format!("{}.dll", logical)
    }

    fn executable_name(&self, logical: &str) -> String {
        if has_extension(logical, ".exe") {
            logical.to_string()
        } else {
            format!("{}.exe", logical)
        }
    }

    fn object_extension(&self) -> &'static str {
        "obj"
    }

    fn dynamic_library_flags(&self) -> &'static [&'static str] {
        &["/DEXPORT_DLL_PUBLIC"]
    }

    fn dynamic_library_side_outputs(&self, dir: &str, logical: &str) -> Vec<String> {
        vec![
            format!("{}\\{}.lib", dir, logical),
            format!("{}\\{}.exp", dir, logical),
        ]
    }

    fn rpath_arg(&self, _tokens: &[String]) -> Option<String> {
        None
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "compile",
                "$compiler /nologo /showIncludes $defines $flags $includes /c $in /Fo$out",
            )
            .description("CXX $out")
            .deps("msvc"),
            Rule::new("archive", "$archiver /nologo /OUT:$out $in").description("LIB $out"),
            Rule::new(
                "shared",
                "$compiler /nologo $defines /LD $flags $includes $in /link /DLL /OUT:$out $linker_args",
            )
            .description("SHARED $out"),
            Rule::new(
                "exe",
                "$compiler /nologo $defines $flags $includes $in /link /OUT:$out $linker_args",
            )
            .description("LINK $out"),
        ]
    }

    fn compile_arguments(&self, step: &CompileStep) -> Vec<String> {
        let mut args = vec![step.compiler.clone(), "/nologo".to_string()];
        args.extend(step.defines.iter().cloned());
        args.extend(step.flags.iter().cloned());
        args.extend(step.includes.iter().cloned());
        args.push("/c".to_string());
        args.push(step.source.clone());
        args.push(format!("/Fo{}", step.output));
        args
    }
}
