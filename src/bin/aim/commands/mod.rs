//! Command implementations

pub mod build;
pub mod clobber;
pub mod generate;
pub mod list;
