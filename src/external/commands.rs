//! Command construction
//!
//! Turns a routed work queue into the shell command lines for its tool family.
//! Every path is double-quoted individually so names with spaces or shell
//! metacharacters reach the tool as a single argument.

use std::path::Path;

use crate::config::{SnifferConfig, ToolFamily};
use crate::hooks::router::WorkQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Rewrites files in place; its queue is re-staged afterwards
    Fix,
    /// Reports violations; non-empty output fails the gate
    Analyze,
}

/// A shell command line for one tool over one queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub family: ToolFamily,
    pub kind: CommandKind,
    pub line: String,
}

pub struct CommandBuilder<'a> {
    config: &'a SnifferConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a SnifferConfig) -> Self {
        Self { config }
    }

    /// Commands for one queue, in execution order. Empty queues and
    /// unconfigured families produce nothing.
    pub fn build(&self, queue: &WorkQueue) -> Vec<ToolCommand> {
        if queue.is_empty() {
            return Vec::new();
        }

        let files = queue.quoted_paths().join(" ");
        match queue.family {
            ToolFamily::CodeSniffer => self.code_sniffer(&files),
            ToolFamily::Eslint => self.eslint(&files),
        }
    }

    fn code_sniffer(&self, files: &str) -> Vec<ToolCommand> {
        let phpcs = &self.config.phpcs;
        let Some(bin) = &phpcs.bin else {
            return Vec::new();
        };

        let mut commands = Vec::with_capacity(2);

        if let Some(fixer) = &phpcs.fixer_bin {
            commands.push(ToolCommand {
                family: ToolFamily::CodeSniffer,
                kind: CommandKind::Fix,
                line: format!("{} -p {}", quote_path(fixer), files),
            });
        }

        let mut line = format!("{} -s", quote_path(bin));
        if !phpcs.standard.is_empty() {
            line.push_str(&format!(" --standard={}", shell_word(&phpcs.standard)));
        }
        if !phpcs.encoding.is_empty() {
            line.push_str(&format!(" --encoding={}", shell_word(&phpcs.encoding)));
        }
        line.push_str(&format!(
            " --extensions={}",
            shell_word(&phpcs.extensions.join(","))
        ));
        if !phpcs.ignore.is_empty() {
            line.push_str(&format!(" --ignore={}", shell_word(&phpcs.ignore.join(","))));
        }
        line.push(' ');
        line.push_str(files);

        commands.push(ToolCommand {
            family: ToolFamily::CodeSniffer,
            kind: CommandKind::Analyze,
            line,
        });

        commands
    }

    fn eslint(&self, files: &str) -> Vec<ToolCommand> {
        let eslint = &self.config.eslint;
        let Some(bin) = &eslint.bin else {
            return Vec::new();
        };

        let mut line = quote_path(bin);
        if let Some(config) = &eslint.config {
            line.push_str(&format!(" -c {}", quote_path(config)));
        }
        match &eslint.ignore_path {
            Some(ignore) => line.push_str(&format!(" --ignore-path {}", quote_path(ignore))),
            None => line.push_str(" --no-ignore"),
        }
        line.push_str(" --quiet ");
        line.push_str(files);

        vec![ToolCommand {
            family: ToolFamily::Eslint,
            kind: CommandKind::Analyze,
            line,
        }]
    }
}

/// Wrap a value in double quotes, escaping the characters the shell still
/// interprets inside them
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

/// Leave plain option values bare, quote anything else
fn shell_word(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.,/:=+@%".contains(c));

    if safe { value.to_string() } else { quote(value) }
}
