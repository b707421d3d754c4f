//! Extension based routing of staged files to tool families

use std::collections::HashSet;

use crate::config::{SnifferConfig, ToolFamily};
use crate::external::commands::quote;
use crate::git::StagedChange;

/// Paths one tool family will process, in diff order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkQueue {
    pub family: ToolFamily,
    paths: Vec<String>,
}

impl WorkQueue {
    pub fn new(family: ToolFamily) -> Self {
        Self {
            family,
            paths: Vec::new(),
        }
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Paths wrapped for the shell, one word each
    pub fn quoted_paths(&self) -> Vec<String> {
        self.paths.iter().map(|path| quote(path)).collect()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Text after the last `.` of the file name, exactly as stored
///
/// Dot files count too: `.php` has the extension `php`.
pub fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next()?;
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Split staged changes into one queue per enabled family.
///
/// Only non-empty queues are returned. A path lands in every family whose
/// allow-list contains its extension; paths matching none are dropped.
pub fn route(changes: &[StagedChange], config: &SnifferConfig) -> Vec<WorkQueue> {
    let families: Vec<(ToolFamily, HashSet<&str>)> = config
        .enabled_families()
        .into_iter()
        .map(|family| {
            let allowed = config.extensions(family).iter().map(String::as_str).collect();
            (family, allowed)
        })
        .collect();

    let mut queues: Vec<WorkQueue> = families
        .iter()
        .map(|(family, _)| WorkQueue::new(*family))
        .collect();

    for change in changes {
        let ext = extension(&change.path);
        let mut matched = false;

        for ((_, allowed), queue) in families.iter().zip(queues.iter_mut()) {
            if ext.is_some_and(|ext| allowed.contains(ext)) {
                queue.push(change.path.as_str());
                matched = true;
            }
        }

        if !matched {
            tracing::debug!("No tool handles {}, skipping", change.path);
        }
    }

    queues.retain(|queue| !queue.is_empty());
    queues
}
