//! Core data structures for aim.
//!
//! This module contains the target model the rest of the crate consumes:
//! - Targets and build kinds
//! - The project (target file) and its frontend
//! - Validation of the target file contract
//! - The error type shared by resolvers and the planner

pub mod error;
pub mod project;
pub mod target;
pub mod validate;

pub use error::BuildError;
pub use project::{CompilerFrontend, Project, TARGET_FILE_NAME};
pub use target::{BuildKind, Target};
pub use validate::validate;
