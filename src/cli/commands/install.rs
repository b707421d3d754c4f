use anyhow::{Result, bail};
use clap::Args;
use std::process::ExitCode;

use crate::cli::Output;
use crate::git::{GitRepo, HOOK_MARKER};
use crate::hooks::PRE_COMMIT;

#[derive(Args, Default)]
pub struct InstallArgs {
    /// Overwrite a pre-commit hook that git-sniffer did not install
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InstallArgs, output: &Output) -> Result<ExitCode> {
    let repo = GitRepo::discover()?;

    if repo.hook_exists(PRE_COMMIT) && !repo.hook_is_ours(PRE_COMMIT) {
        if !args.force {
            bail!("A pre-commit hook already exists and was not installed by git-sniffer (use --force to replace it)");
        }
        output.warning("Replacing existing pre-commit hook");
    }

    repo.install_hook(PRE_COMMIT, &hook_script())?;
    tracing::info!("Hook written to {}", repo.git_dir().join("hooks").display());

    output.success("Installed pre-commit hook");
    Ok(ExitCode::SUCCESS)
}

/// Shell script git runs before every commit
pub fn hook_script() -> String {
    format!("#!/bin/sh\n{HOOK_MARKER}\nexec git-sniffer check \"$@\"\n")
}
