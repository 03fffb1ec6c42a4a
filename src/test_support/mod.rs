//! Test utilities for aim unit tests.
//!
//! Provides in-memory projects and a source discovery that never touches
//! the filesystem, so planning can be tested without laying out files.

pub mod fixtures;

use std::collections::HashMap;

use crate::builder::sources::SourceDiscovery;
use crate::core::error::BuildError;
use crate::core::project::Project;
use crate::core::target::Target;

/// In-memory source discovery.
///
/// Targets without registered sources get one `main.cpp` per declared
/// source entry, named as the filesystem discovery would name it.
#[derive(Debug, Clone, Default)]
pub struct MockSourceDiscovery {
    sources: HashMap<String, Vec<String>>,
}

impl MockSourceDiscovery {
    pub fn new() -> Self {
        MockSourceDiscovery::default()
    }

    /// Register the exact sources returned for a target.
    pub fn with_sources(mut self, target: &str, files: &[&str]) -> Self {
        self.sources.insert(
            target.to_string(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }
}

impl SourceDiscovery for MockSourceDiscovery {
    fn discover(&self, target: &Target, project: &Project) -> Result<Vec<String>, BuildError> {
        let mut files = match self.sources.get(&target.name) {
            Some(files) => files.clone(),
            None => target
                .source_files
                .iter()
                .map(|dir| format!("{}/{}/main.cpp", project.project_root, dir))
                .collect(),
        };

        if files.is_empty() {
            return Err(BuildError::NoSourceFiles {
                target: target.name.clone(),
                searched: target.source_files.clone(),
            });
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}
