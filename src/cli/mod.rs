//! Command-line interface for git-sniffer
//!
//! clap parses the global flags and subcommands, then hands off to the
//! implementations in [`commands`].

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub mod commands;
mod output;

pub use output::Output;

#[derive(Parser)]
#[command(
    name = "git-sniffer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pre-commit gate running PHP_CodeSniffer and ESLint on staged files",
    long_about = "git-sniffer checks the files staged for commit with PHP_CodeSniffer and ESLint, \
                  auto-fixes what phpcbf can fix, and optionally runs the test suite. \
                  Any reported violation or failing test blocks the commit."
)]
pub struct Cli {
    /// Use custom configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pre-commit gate against the staged files
    Check(commands::check::CheckArgs),
    /// Install the pre-commit hook into the current repository
    Install(commands::install::InstallArgs),
    /// Remove the pre-commit hook installed by git-sniffer
    Uninstall(commands::uninstall::UninstallArgs),
    /// Configuration management
    Config(commands::config::ConfigArgs),
}

impl Cli {
    pub fn run(self) -> Result<ExitCode> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = self.config.as_deref();

        match self.command {
            Commands::Check(args) => commands::check::execute(args, config, &output),
            Commands::Install(args) => commands::install::execute(args, &output),
            Commands::Uninstall(args) => commands::uninstall::execute(args, &output),
            Commands::Config(args) => commands::config::execute(args, config, &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout belongs to the tools' reports
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
