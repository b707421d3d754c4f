//! Tool location
//!
//! Verifies that every configured binary, config file and ignore file exists
//! before the repository is inspected. The first missing artifact aborts the
//! run with a [`ConfigurationError`] naming it. Programs are resolved the
//! same way the shell resolves them when the tools run.

use crate::config::SnifferConfig;
use crate::error::{Artifact, ConfigurationError};
use std::path::{Path, PathBuf};


/// Checks configured tool paths against the filesystem
pub struct ToolLocator<'a> {
    config: &'a SnifferConfig,
    base_dir: &'a Path,
}

impl<'a> ToolLocator<'a> {
    /// Relative paths are resolved against `base_dir`
    pub fn new(config: &'a SnifferConfig, base_dir: &'a Path) -> Self {
        Self { config, base_dir }
    }

    /// Fail on the first configured artifact that cannot be found
    pub fn verify(&self) -> Result<(), ConfigurationError> {
        let phpcs = &self.config.phpcs;
        if let Some(bin) = &phpcs.bin {
            self.require(Artifact::CodeSnifferBin, bin)?;

            if let Some(fixer) = &phpcs.fixer_bin {
                self.require(Artifact::CodeBeautifierBin, fixer)?;
            }
        }

        let eslint = &self.config.eslint;
        if let Some(bin) = &eslint.bin {
            self.require(Artifact::EslintBin, bin)?;

            match &eslint.config {
                Some(config) => self.require(Artifact::EslintConfig, config)?,
                None => return Err(ConfigurationError::Unconfigured(Artifact::EslintConfig)),
            }

            if let Some(ignore) = &eslint.ignore_path {
                self.require(Artifact::EslintIgnore, ignore)?;
            }
        }

        if self.config.enabled_families().is_empty() {
            return Err(ConfigurationError::NothingConfigured);
        }

        if self.config.tests.enabled {
            match &self.config.tests.bin {
                Some(bin) => self.require(Artifact::TestRunnerBin, bin)?,
                None => return Err(ConfigurationError::Unconfigured(Artifact::TestRunnerBin)),
            }
        }

        Ok(())
    }

    /// Resolve a configured file path; relative paths are taken from `base_dir`
    pub fn locate(&self, path: &Path) -> Option<PathBuf> {
        let candidate = self.base_dir.join(path);
        candidate.exists().then_some(candidate)
    }

    /// Resolve a configured program the way `sh` will when it runs it
    ///
    /// A bare command name (no directory part) is only looked up on `PATH`,
    /// never in `base_dir`. Anything with a directory part is a file path.
    pub fn locate_program(&self, path: &Path) -> Option<PathBuf> {
        if path.components().count() == 1 {
            return which::which(path).ok();
        }

        self.locate(path)
    }

    fn require(&self, artifact: Artifact, path: &Path) -> Result<(), ConfigurationError> {
        let found = if artifact.is_program() {
            self.locate_program(path)
        } else {
            self.locate(path)
        };

        match found {
            Some(found) => {
                tracing::debug!("{} found at {}", artifact, found.display());
                Ok(())
            }
            None => Err(ConfigurationError::Missing {
                artifact,
                path: path.to_path_buf(),
            }),
        }
    }
}
