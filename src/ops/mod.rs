//! High-level operations.
//!
//! This module contains the implementation of aim commands.

pub mod build;
pub mod clobber;
pub mod generate;
pub mod list;

pub use build::{build, BuildOptions};
pub use clobber::clobber;
pub use generate::{generate, GenerateOptions, GenerateSummary};
pub use list::{format_table, list, ListEntry};
