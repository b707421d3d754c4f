use anyhow::Result;
use clap::Args;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::Output;
use crate::config::SnifferConfig;
use crate::error::GateError;
use crate::external::ShellRunner;
use crate::git::GitRepo;
use crate::hooks::{HookContext, pre_commit, test_gate};

#[derive(Args, Default)]
pub struct CheckArgs {}

/// Run the pre-commit gate; the exit code is what git sees
pub fn execute(_args: CheckArgs, custom_config: Option<&Path>, output: &Output) -> Result<ExitCode> {
    let config = SnifferConfig::load(custom_config)?;

    // Nothing outside the configured environment, not even repository access
    if let Some(skipped) = pre_commit::environment_gate(&config) {
        output.info(&skipped.to_string());
        return Ok(ExitCode::SUCCESS);
    }

    let repo = GitRepo::discover()?;
    let work_dir = repo.workdir()?.to_path_buf();

    let project = test_gate::project_name(&std::env::current_dir()?);
    let context = HookContext::new(config, &work_dir, project);
    let runner = ShellRunner::new(&work_dir);

    match pre_commit::execute(&context, &repo, &runner, output) {
        Ok(outcome) => {
            output.info(&outcome.to_string());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if let GateError::ToolFailure(verdict) = &err {
                verdict.report(output);
            }
            tracing::debug!("Gate failed: {err:?}");
            output.error(&err.to_string());
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
