//! Error types for the pre-commit gate
//!
//! Every condition that blocks a commit is a variant of [`GateError`]. The
//! `check` command is the only place these are turned into an exit status.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::hooks::verdict::Verdict;

/// An external artifact the gate depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    CodeSnifferBin,
    CodeBeautifierBin,
    EslintBin,
    EslintConfig,
    EslintIgnore,
    TestRunnerBin,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Artifact::CodeSnifferBin => "PHP CodeSniffer bin",
            Artifact::CodeBeautifierBin => "PHP Code Beautifier bin",
            Artifact::EslintBin => "ESLint bin",
            Artifact::EslintConfig => "ESLint config file",
            Artifact::EslintIgnore => "ESLint ignore file",
            Artifact::TestRunnerBin => "Test runner bin",
        };
        f.write_str(name)
    }
}

impl Artifact {
    /// Executables, as opposed to config and ignore files
    pub fn is_program(&self) -> bool {
        matches!(
            self,
            Artifact::CodeSnifferBin
                | Artifact::CodeBeautifierBin
                | Artifact::EslintBin
                | Artifact::TestRunnerBin
        )
    }
}

/// Problems detected before the repository is inspected
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{artifact} not found: {}", path.display())]
    Missing { artifact: Artifact, path: PathBuf },

    #[error("{0} not found: no path configured")]
    Unconfigured(Artifact),

    #[error("Eslint bin and Phpcs bin are not configured")]
    NothingConfigured,
}

/// A condition that blocks the commit
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Coding standard violations found in staged files")]
    ToolFailure(Verdict),

    #[error("Test suite for {project} failed (exit status {status})")]
    TestFailure { project: String, status: i32 },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl GateError {
    /// Process exit status for this error; every blocking condition is 1
    pub fn exit_code(&self) -> u8 {
        1
    }
}
