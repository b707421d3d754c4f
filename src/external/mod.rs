//! External tool execution
//!
//! Tools are invoked through [`ProcessRunner`]. The default [`ShellRunner`]
//! hands each built command line to `sh -c` inside the repository work tree,
//! capturing stdout and stderr as one stream.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::ToolFamily;

pub mod commands;

pub use commands::{CommandBuilder, CommandKind, ToolCommand};

/// Captured result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Combined stdout and stderr, in the order the tool wrote them
    pub output: String,
    /// Exit status; -1 when the process was killed by a signal
    pub status: i32,
}

/// What one tool reported for its queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub family: ToolFamily,
    pub output: String,
    pub status: i32,
}

/// Seam between the gate and the operating system
pub trait ProcessRunner {
    /// Run a shell command line to completion and capture its output
    fn run(&self, command_line: &str) -> std::io::Result<CommandOutput>;

    /// Run `program` without arguments, passing each stdout line to `on_line`
    /// as soon as it is written
    fn run_streaming(&self, program: &Path, on_line: &mut dyn FnMut(&str)) -> std::io::Result<i32>;
}

/// Runs commands through `sh -c` in a fixed working directory
pub struct ShellRunner {
    work_dir: PathBuf,
}

impl ShellRunner {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Relative program paths are taken relative to the work tree
    fn program_path(&self, program: &Path) -> PathBuf {
        if program.is_relative() && program.components().count() > 1 {
            self.work_dir.join(program)
        } else {
            program.to_path_buf()
        }
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str) -> std::io::Result<CommandOutput> {
        tracing::debug!("Running: {}", command_line);

        let result = Command::new("sh")
            .arg("-c")
            .arg(format!("exec 2>&1; {command_line}"))
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()?;

        let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
        if !result.stderr.is_empty() {
            output.push_str(&String::from_utf8_lossy(&result.stderr));
        }

        Ok(CommandOutput {
            output,
            status: result.status.code().unwrap_or(-1),
        })
    }

    fn run_streaming(&self, program: &Path, on_line: &mut dyn FnMut(&str)) -> std::io::Result<i32> {
        let program = self.program_path(program);
        tracing::debug!("Streaming: {}", program.display());

        let mut child = Command::new(&program)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut line = Vec::new();
            loop {
                line.clear();
                if reader.read_until(b'\n', &mut line)? == 0 {
                    break;
                }
                let text = String::from_utf8_lossy(&line);
                on_line(text.trim_end_matches(['\n', '\r']));
            }
        }

        let status = child.wait()?;
        Ok(status.code().unwrap_or(-1))
    }
}
