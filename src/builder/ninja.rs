//! Minimal writer for the ninja build file syntax.
//!
//! Only the subset the build graph needs: comments, top-level variables,
//! rules and build edges with implicit inputs/outputs and edge variables.

use std::fmt::Write as _;

/// A rule declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule name referenced by build edges
    pub name: &'static str,
    /// Command template (`$in`, `$out` and edge variables)
    pub command: &'static str,
    /// Progress description
    pub description: Option<&'static str>,
    /// Dependency file produced by the command
    pub depfile: Option<&'static str>,
    /// Dependency format (`gcc` or `msvc`)
    pub deps: Option<&'static str>,
}

impl Rule {
    /// Create a rule with just a command.
    pub const fn new(name: &'static str, command: &'static str) -> Self {
        Rule {
            name,
            command,
            description: None,
            depfile: None,
            deps: None,
        }
    }

    /// Set the description.
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Set depfile-based header dependency tracking.
    pub const fn depfile(mut self, depfile: &'static str) -> Self {
        self.depfile = Some(depfile);
        self.deps = Some("gcc");
        self
    }

    /// Set the dependency format without a depfile.
    pub const fn deps(mut self, deps: &'static str) -> Self {
        self.deps = Some(deps);
        self
    }
}

/// A build edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edge<'a> {
    pub outputs: &'a [String],
    pub implicit_outputs: &'a [String],
    pub rule: &'a str,
    pub inputs: &'a [String],
    pub implicit: &'a [String],
    pub variables: Vec<(&'static str, String)>,
}

/// Accumulates a ninja file in memory.
#[derive(Debug, Default)]
pub struct NinjaWriter {
    out: String,
}

impl NinjaWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        NinjaWriter::default()
    }

    /// Write a `#` comment line.
    pub fn comment(&mut self, text: &str) {
        for line in text.lines() {
            let _ = writeln!(self.out, "# {}", line);
        }
    }

    /// Write an empty line.
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Write a top-level variable.
    pub fn variable(&mut self, key: &str, value: &str) {
        let _ = writeln!(self.out, "{} = {}", key, value);
    }

    /// Write a rule declaration.
    pub fn rule(&mut self, rule: &Rule) {
        let _ = writeln!(self.out, "rule {}", rule.name);
        self.indented("command", rule.command);
        if let Some(description) = rule.description {
            self.indented("description", description);
        }
        if let Some(depfile) = rule.depfile {
            self.indented("depfile", depfile);
        }
        if let Some(deps) = rule.deps {
            self.indented("deps", deps);
        }
    }

    /// Write a build edge.
    pub fn build(&mut self, edge: &Edge<'_>) {
        let mut line = String::from("build");
        for output in edge.outputs {
            line.push(' ');
            line.push_str(&escape_path(output));
        }
        if !edge.implicit_outputs.is_empty() {
            line.push_str(" |");
            for output in edge.implicit_outputs {
                line.push(' ');
                line.push_str(&escape_path(output));
            }
        }
        line.push_str(": ");
        line.push_str(edge.rule);
        for input in edge.inputs {
            line.push(' ');
            line.push_str(&escape_path(input));
        }
        if !edge.implicit.is_empty() {
            line.push_str(" |");
            for input in edge.implicit {
                line.push(' ');
                line.push_str(&escape_path(input));
            }
        }
        self.out.push_str(&line);
        self.out.push('\n');

        for (key, value) in &edge.variables {
            self.indented(key, value);
        }
    }

    /// Consume the writer, returning the file content.
    pub fn finish(self) -> String {
        self.out
    }

    fn indented(&mut self, key: &str, value: &str) {
        let _ = writeln!(self.out, "  {} = {}", key, value);
    }
}

/// Escape a path for use in a build line.
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '$' => escaped.push_str("$$"),
            ' ' => escaped.push_str("$ "),
            ':' => escaped.push_str("$:"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a string for literal use inside a variable value.
///
/// Unlike [`escape_path`], spaces are left alone since values are
/// whitespace-separated argument lists.
pub fn escape_value(value: &str) -> String {
    value.replace('$', "$$").replace(':', "$:")
}
