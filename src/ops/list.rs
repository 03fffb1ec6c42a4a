//! Implementation of `aim target <dir> list`.

use std::path::Path;

use anyhow::Result;

use crate::builder::for_frontend;
use crate::core::{BuildKind, Project};

/// Shown in place of an output name for kinds that produce no artifact.
pub const NO_ARTIFACT: &str = "n.a.";

/// One row of the target listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Target name
    pub name: String,

    /// Declared build kind
    pub kind: BuildKind,

    /// Platform-decorated output name, if the kind produces one
    pub output: Option<String>,
}

/// List the targets of a build directory, in declaration order.
pub fn list(build_dir: &Path) -> Result<Vec<ListEntry>> {
    let project = Project::load(build_dir)?;
    Ok(entries(&project))
}

/// Build the listing for an already loaded project.
pub fn entries(project: &Project) -> Vec<ListEntry> {
    let toolchain = for_frontend(project.frontend);
    project
        .builds
        .iter()
        .map(|target| ListEntry {
            name: target.name.clone(),
            kind: target.kind,
            output: toolchain.artifact_name(target.kind, target.logical_name()),
        })
        .collect()
}

/// Format the listing as an aligned table.
pub fn format_table(entries: &[ListEntry]) -> String {
    let headers = ["Name", "Build Rule", "Output Name"];
    let rows: Vec<[String; 3]> = entries
        .iter()
        .map(|e| {
            [
                e.name.clone(),
                e.kind.to_string(),
                e.output.clone().unwrap_or_else(|| NO_ARTIFACT.to_string()),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 3]| {
        let line = format!(
            "{:<w0$}  {:<w1$}  {}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        );
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(headers);
    let rules = widths.map(|w| "-".repeat(w));
    push_row([rules[0].as_str(), rules[1].as_str(), rules[2].as_str()]);
    for row in &rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
    }

    out
}
