//! Toolchain frontends.
//!
//! The GCC-like and MSVC-like frontends share the same resolver shape but
//! differ in flag syntax, path separators, include categories and artifact
//! naming. A frontend is selected once per project with [`for_frontend`].

use crate::builder::ninja::Rule;
use crate::builder::plan::CompileStep;
use crate::core::project::CompilerFrontend;
use crate::core::target::BuildKind;

mod gcc;
mod msvc;

pub use gcc::GccToolchain;
pub use msvc::MsvcToolchain;

/// Trait for toolchain frontend implementations.
pub trait Toolchain: Send + Sync {
    /// Get the frontend this toolchain implements.
    fn frontend(&self) -> CompilerFrontend;

    /// Path separator used in emitted paths.
    fn separator(&self) -> char;

    /// Prefix for regular include directories.
    fn include_prefix(&self) -> &'static str;

    /// Prefix for system include directories.
    ///
    /// `None` means the frontend has no such category and system paths are
    /// folded into the regular includes.
    fn system_include_prefix(&self) -> Option<&'static str>;

    /// Prefix for quote-style include directories, `None` when folded.
    fn quote_include_prefix(&self) -> Option<&'static str>;

    /// Prefix for preprocessor defines.
    fn define_prefix(&self) -> &'static str;

    /// Prefix for library search paths.
    fn library_path_prefix(&self) -> &'static str;

    /// Linker argument naming a library by its logical name.
    fn library_flag(&self, name: &str) -> String;

    /// Physical static library name.
    fn static_library_name(&self, logical: &str) -> String;

    /// Physical dynamic library name.
    fn dynamic_library_name(&self, logical: &str) -> String;

    /// Physical executable name.
    fn executable_name(&self, logical: &str) -> String;

    /// Object file extension (without dot).
    fn object_extension(&self) -> &'static str;

    /// Flags forced on when compiling and linking a dynamic library.
    fn dynamic_library_flags(&self) -> &'static [&'static str];

    /// Extra files produced alongside a dynamic library, given its
    /// build-relative output directory and logical name.
    fn dynamic_library_side_outputs(&self, dir: &str, logical: &str) -> Vec<String>;

    /// Format the run-time search path argument from `$ORIGIN`-relative
    /// tokens. `None` when the frontend has no equivalent.
    fn rpath_arg(&self, tokens: &[String]) -> Option<String>;

    /// Rule declarations for the build file.
    fn rules(&self) -> Vec<Rule>;

    /// Full argument vector of a compile step, for compile_commands.json.
    fn compile_arguments(&self, step: &CompileStep) -> Vec<String>;

    /// Rewrite separators to the frontend's convention.
    fn native_path(&self, path: &str) -> String {
        let sep = self.separator();
        path.chars()
            .map(|c| if c == '/' || c == '\\' { sep } else { c })
            .collect()
    }

    /// Join `path` onto `base` unless `path` is already absolute.
    fn join(&self, base: &str, path: &str) -> String {
        if is_absolute(path) {
            return self.native_path(path);
        }
        let base = base.trim_end_matches(['/', '\\']);
        if base.is_empty() || base == "." {
            return self.native_path(path);
        }
        let mut joined = self.native_path(base);
        joined.push(self.separator());
        joined.push_str(&self.native_path(path));
        joined
    }

    /// Format a define as a preprocessor flag.
    fn define_flag(&self, define: &str) -> String {
        format!("{}{}", self.define_prefix(), define)
    }

    /// Format a library search path flag.
    fn library_path_flag(&self, path: &str) -> String {
        format!("{}{}", self.library_path_prefix(), path)
    }

    /// Physical artifact name for a build kind; `None` for kinds that
    /// produce nothing.
    fn artifact_name(&self, kind: BuildKind, logical: &str) -> Option<String> {
        match kind {
            BuildKind::StaticLibrary => Some(self.static_library_name(logical)),
            BuildKind::DynamicLibrary => Some(self.dynamic_library_name(logical)),
            BuildKind::Executable => Some(self.executable_name(logical)),
            BuildKind::HeaderOnly | BuildKind::LibraryReference => None,
        }
    }
}

/// Select the toolchain for a project's frontend.
pub fn for_frontend(frontend: CompilerFrontend) -> Box<dyn Toolchain> {
    match frontend {
        CompilerFrontend::Gcc => Box::new(GccToolchain),
        CompilerFrontend::Msvc => Box::new(MsvcToolchain),
    }
}

/// Check whether a declared path is absolute on either platform.
///
/// Recognises `/x`, `\x`, and drive-letter paths like `C:/x`, independent
/// of the host the generator runs on.
pub fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes {
        [b'/' | b'\\', ..] => true,
        [drive, b':', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}
