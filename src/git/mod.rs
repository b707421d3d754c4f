//! Git integration layer for git-sniffer
//!
//! This module wraps git2 for the operations the gate needs: resolving the
//! diff base, listing staged changes, re-staging fixed files, and installing
//! the pre-commit hook.

use anyhow::{Context, Result};
use git2::{Index, Repository};
use std::path::Path;

pub mod operations;

pub use operations::{ChangeKind, DiffBase, EMPTY_TREE_ID, StagedChange, StagingArea};

/// Marker written into hooks installed by git-sniffer
pub const HOOK_MARKER: &str = "# installed by git-sniffer";

pub struct GitRepo {
    pub repo: Repository,
}

impl GitRepo {
    /// Open the repository at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open Git repository")?;
        Ok(Self { repo })
    }

    /// Discover the repository containing the current directory
    ///
    /// Inside a hook git may point `GIT_INDEX_FILE` at the index the commit
    /// is built from (`commit -a`, `commit <paths>`); that index is used
    /// instead of `.git/index`.
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".").context("No Git repository found")?;
        let git = Self { repo };

        if let Some(index_file) = std::env::var_os("GIT_INDEX_FILE") {
            git.use_index_file(Path::new(&index_file))?;
        }

        Ok(git)
    }

    /// Read and write staged content through `path` rather than `.git/index`.
    /// Relative paths are taken from the work tree root.
    pub fn use_index_file(&self, path: &Path) -> Result<()> {
        let path = if path.is_relative() {
            self.workdir()?.join(path)
        } else {
            path.to_path_buf()
        };
        tracing::debug!("Using index file {}", path.display());

        let mut index = Index::open(&path)
            .with_context(|| format!("Failed to open index file {}", path.display()))?;
        self.repo
            .set_index(&mut index)
            .context("Failed to attach index file")?;
        Ok(())
    }

    /// Working tree root; bare repositories have none
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .context("Repository has no working directory")
    }

    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Install a git hook, making it executable on Unix
    pub fn install_hook(&self, hook_name: &str, hook_content: &str) -> Result<()> {
        let hooks_dir = self.repo.path().join("hooks");
        let hook_path = hooks_dir.join(hook_name);

        std::fs::create_dir_all(&hooks_dir).context("Failed to create hooks directory")?;
        std::fs::write(&hook_path, hook_content).context("Failed to write hook file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&hook_path)
                .context("Failed to get hook file metadata")?
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&hook_path, perms)
                .context("Failed to set hook file permissions")?;
        }

        Ok(())
    }

    /// Remove a git hook if present
    pub fn remove_hook(&self, hook_name: &str) -> Result<()> {
        let hook_path = self.repo.path().join("hooks").join(hook_name);

        if hook_path.exists() {
            std::fs::remove_file(&hook_path).context("Failed to remove hook file")?;
        }

        Ok(())
    }

    pub fn hook_exists(&self, hook_name: &str) -> bool {
        self.repo.path().join("hooks").join(hook_name).exists()
    }

    /// Whether an existing hook was written by git-sniffer
    pub fn hook_is_ours(&self, hook_name: &str) -> bool {
        std::fs::read_to_string(self.repo.path().join("hooks").join(hook_name))
            .map(|content| content.contains(HOOK_MARKER))
            .unwrap_or(false)
    }
}
