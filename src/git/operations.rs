use git2::{Delta, DiffFindOptions, DiffOptions, ErrorCode, Oid};
use std::path::Path;

use super::GitRepo;

/// Object id of the empty tree, the diff base before the first commit
pub const EMPTY_TREE_ID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// What staged changes are compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffBase {
    /// Tree of the current HEAD commit
    Head(Oid),
    /// No commit yet
    EmptyTree,
}

impl DiffBase {
    /// Revision as git would spell it on the command line
    pub fn revision(&self) -> &'static str {
        match self {
            DiffBase::Head(_) => "HEAD",
            DiffBase::EmptyTree => EMPTY_TREE_ID,
        }
    }
}

/// Kinds of staged change the gate inspects (`--diff-filter=ACMR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Copied,
    Modified,
    Renamed,
}

impl ChangeKind {
    /// Deletions, type changes and everything else map to `None`
    fn from_delta(delta: Delta) -> Option<Self> {
        match delta {
            Delta::Added => Some(ChangeKind::Added),
            Delta::Copied => Some(ChangeKind::Copied),
            Delta::Modified => Some(ChangeKind::Modified),
            Delta::Renamed => Some(ChangeKind::Renamed),
            _ => None,
        }
    }
}

/// A path staged for the pending commit, relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChange {
    pub path: String,
    pub kind: ChangeKind,
}

impl StagedChange {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// The index as seen by the gate
pub trait StagingArea {
    /// Added, copied, modified and renamed paths, in diff order
    fn staged_changes(&self) -> Result<Vec<StagedChange>, git2::Error>;

    /// Add the working tree content of `paths` back to the index
    fn restage(&self, paths: &[String]) -> Result<(), git2::Error>;
}

impl GitRepo {
    /// HEAD when the repository has a commit, the empty tree otherwise
    pub fn diff_base(&self) -> Result<DiffBase, git2::Error> {
        match self.repo.revparse_single("HEAD") {
            Ok(object) => Ok(DiffBase::Head(object.peel_to_tree()?.id())),
            Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::UnbornBranch) => {
                Ok(DiffBase::EmptyTree)
            }
            Err(e) => Err(e),
        }
    }
}

impl StagingArea for GitRepo {
    fn staged_changes(&self) -> Result<Vec<StagedChange>, git2::Error> {
        let base = self.diff_base()?;
        tracing::debug!("Diffing index against {}", base.revision());

        // A missing old tree is how git2 spells the empty tree
        let tree = match base {
            DiffBase::Head(id) => Some(self.repo.find_tree(id)?),
            DiffBase::EmptyTree => None,
        };

        let mut index = self.repo.index()?;
        index.read(false)?;

        let mut diff_opts = DiffOptions::new();
        diff_opts.include_typechange(true);
        let mut diff =
            self.repo
                .diff_tree_to_index(tree.as_ref(), Some(&index), Some(&mut diff_opts))?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true).copies(true);
        diff.find_similar(Some(&mut find_opts))?;

        let changes = diff
            .deltas()
            .filter_map(|delta| {
                let kind = ChangeKind::from_delta(delta.status())?;
                let path = delta.new_file().path()?;
                Some(StagedChange::new(path.to_string_lossy(), kind))
            })
            .collect();

        Ok(changes)
    }

    fn restage(&self, paths: &[String]) -> Result<(), git2::Error> {
        let mut index = self.repo.index()?;
        index.read(false)?;

        for path in paths {
            tracing::debug!("Re-staging {}", path);
            index.add_path(Path::new(path))?;
        }

        index.write()
    }
}
