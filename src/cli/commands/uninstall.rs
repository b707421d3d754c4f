use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::cli::Output;
use crate::git::GitRepo;
use crate::hooks::PRE_COMMIT;

#[derive(Args, Default)]
pub struct UninstallArgs {}

/// Remove the pre-commit hook, leaving hooks from other tools alone
pub fn execute(_args: UninstallArgs, output: &Output) -> Result<ExitCode> {
    let repo = GitRepo::discover()?;

    if !repo.hook_exists(PRE_COMMIT) {
        output.info("No pre-commit hook installed");
        return Ok(ExitCode::SUCCESS);
    }

    if !repo.hook_is_ours(PRE_COMMIT) {
        output.warning("The pre-commit hook was not installed by git-sniffer, leaving it in place");
        return Ok(ExitCode::SUCCESS);
    }

    repo.remove_hook(PRE_COMMIT)?;
    output.success("Removed pre-commit hook");
    Ok(ExitCode::SUCCESS)
}
