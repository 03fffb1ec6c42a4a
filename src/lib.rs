//! aim - a build description compiler for C and C++
//!
//! This crate reads a declarative target file, resolves includes, toolchain
//! overrides and link information per target for GCC-like or MSVC-like
//! frontends, and emits a ninja build graph.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and in-memory fixtures for aim unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildPlan, Toolchain};
pub use core::{BuildError, BuildKind, CompilerFrontend, Project, Target};
