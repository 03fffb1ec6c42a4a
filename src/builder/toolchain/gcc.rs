//! GCC/Clang frontend.

use crate::builder::ninja::{escape_value, Rule};
use crate::builder::plan::CompileStep;
use crate::core::project::CompilerFrontend;

use super::Toolchain;

/// GCC-like frontend (gcc, clang, cross compilers such as avr-gcc).
#[derive(Debug, Clone, Copy, Default)]
pub struct GccToolchain;

impl Toolchain for GccToolchain {
    fn frontend(&self) -> CompilerFrontend {
        CompilerFrontend::Gcc
    }

    fn separator(&self) -> char {
        '/'
    }

    fn include_prefix(&self) -> &'static str {
        "-I"
    }

    fn system_include_prefix(&self) -> Option<&'static str> {
        Some("-isystem")
    }

    fn quote_include_prefix(&self) -> Option<&'static str> {
        Some("-iquote")
    }

    fn define_prefix(&self) -> &'static str {
        "-D"
    }

    fn library_path_prefix(&self) -> &'static str {
        "-L"
    }

    fn library_flag(&self, name: &str) -> String {
        format!("-l{}", name)
    }

    fn static_library_name(&self, logical: &str) -> String {
        format!("lib{}.a", logical)
    }

    fn dynamic_library_name(&self, logical: &str) -> String {
        format!("lib{}.so", logical)
    }

    fn executable_name(&self, logical: &str) -> String {
        logical.to_string()
    }

    fn object_extension(&self) -> &'static str {
        "o"
    }

    fn dynamic_library_flags(&self) -> &'static [&'static str] {
        &["-DEXPORT_DLL_PUBLIC", "-fvisibility=hidden", "-fPIC"]
    }

    fn dynamic_library_side_outputs(&self, _dir: &str, _logical: &str) -> Vec<String> {
        Vec::new()
    }

    fn rpath_arg(&self, tokens: &[String]) -> Option<String> {
        // Relocatable executables: see "$ORIGIN" in ld.so(8).
        Some(format!("-Wl,-rpath='{}'", escape_value(&tokens.join(":"))))
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "compile",
                "$compiler $defines $flags $includes -MMD -MF $out.d -c $in -o $out",
            )
            .description("CXX $out")
            .depfile("$out.d"),
            Rule::new("archive", "$archiver rcs $out $in").description("AR $out"),
            Rule::new(
                "shared",
                "$compiler $defines -shared $flags $includes $in -o $out $linker_args",
            )
            .description("SHARED $out"),
            Rule::new(
                "exe",
                "$compiler $defines $flags $includes $in -o $out $linker_args",
            )
            .description("LINK $out"),
        ]
    }

    fn compile_arguments(&self, step: &CompileStep) -> Vec<String> {
        let mut args = vec![step.compiler.clone()];
        args.extend(step.defines.iter().cloned());
        args.extend(step.flags.iter().cloned());
        args.extend(step.includes.iter().cloned());
        args.push("-c".to_string());
        args.push(step.source.clone());
        args.push("-o".to_string());
        args.push(step.output.clone());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_conventions() {
        let tc = GccToolchain;
        assert_eq!(tc.static_library_name("b"), "libb.a");
        assert_eq!(tc.dynamic_library_name("c"), "libc.so");
        assert_eq!(tc.executable_name("a"), "a");
    }

    #[test]
    fn test_flags() {
        let tc = GccToolchain;
        assert_eq!(tc.define_flag("EnableFeature"), "-DEnableFeature");
        assert_eq!(tc.library_path_flag("b"), "-Lb");
        assert_eq!(tc.library_flag("b"), "-lb");
    }

    #[test]
    fn test_rpath_is_ninja_escaped() {
        let tc = GccToolchain;
        let arg = tc
            .rpath_arg(&["$ORIGIN".to_string(), "$ORIGIN/../c".to_string()])
            .unwrap();
        assert_eq!(arg, "-Wl,-rpath='$$ORIGIN$:$$ORIGIN/../c'");
    }

    #[test]
    fn test_compile_arguments() {
        let step = CompileStep {
            target: "a".to_string(),
            source: "../../a/src/main.cpp".to_string(),
            output: "a/main.o".to_string(),
            compiler: "g++".to_string(),
            includes: vec!["-I../../a/include".to_string()],
            defines: vec!["-DX".to_string()],
            flags: vec!["-Wall".to_string()],
        };
        assert_eq!(
            GccToolchain.compile_arguments(&step),
            vec![
                "g++",
                "-DX",
                "-Wall",
                "-I../../a/include",
                "-c",
                "../../a/src/main.cpp",
                "-o",
                "a/main.o"
            ]
        );
    }
}
