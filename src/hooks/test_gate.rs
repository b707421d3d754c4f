//! Optional test suite run after linting passes

use std::path::Path;

use crate::cli::Output;
use crate::config::SnifferConfig;
use crate::error::GateError;
use crate::external::ProcessRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// The test gate is disabled
    Skipped,
    Passed,
}

/// Name shown in test summaries: the last component of `dir`
pub fn project_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Run the configured test runner, streaming its output. No timeout applies.
pub fn run<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &SnifferConfig,
    project: &str,
    output: &Output,
) -> Result<TestOutcome, GateError> {
    let Some(program) = config.test_runner() else {
        tracing::debug!("Test gate disabled");
        return Ok(TestOutcome::Skipped);
    };

    output.blank_line();
    output.raw(">> Starting unit tests");

    let status = runner
        .run_streaming(program, &mut |line| output.raw(line))
        .map_err(|source| GateError::Spawn {
            command: program.display().to_string(),
            source,
        })?;

    output.blank_line();

    if status != 0 {
        output.raw(&format!(">> Test suite for {project} failed"));
        // Test runners may leave the terminal coloured when they fail
        output.reset_colors();
        return Err(GateError::TestFailure {
            project: project.to_string(),
            status,
        });
    }

    output.raw(&format!(">> All tests for {project} passed."));
    Ok(TestOutcome::Passed)
}
