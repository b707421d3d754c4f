//! Git hook implementations
//!
//! Only the pre-commit hook is provided. It is split into the stages it runs
//! through: [`router`] assigns staged files to tool families, [`verdict`]
//! merges analysis output and [`test_gate`] runs the optional test suite.

use std::path::{Path, PathBuf};

use crate::config::SnifferConfig;

pub mod pre_commit;
pub mod router;
pub mod test_gate;
pub mod verdict;

/// Name of the hook git-sniffer installs
pub const PRE_COMMIT: &str = "pre-commit";

/// Everything a hook run needs besides its collaborators
#[derive(Debug, Clone)]
pub struct HookContext {
    pub config: SnifferConfig,
    /// Root of the work tree; tools run here and relative paths resolve here
    pub work_dir: PathBuf,
    /// Shown in the test summary
    pub project: String,
}

impl HookContext {
    pub fn new(config: SnifferConfig, work_dir: &Path, project: impl Into<String>) -> Self {
        Self {
            config,
            work_dir: work_dir.to_path_buf(),
            project: project.into(),
        }
    }
}
