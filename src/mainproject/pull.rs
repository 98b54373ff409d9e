// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `pull`: branch-aware fast-forward of every recorded submodule.
//!
//! ```text
//! current  tracking  default   decision
//! ""       *         *         MissingCurrentBranch
//! b        ""        ""        UnknownPullBranch
//! b        t         *         t == b ? pull : skip
//! b        ""        d         d == b ? pull : skip
//! ```

use anyhow::Context;
use std::fmt;
use tracing::{debug, error, info, warn};

use super::{App, ORIGIN, PullSummary};
use crate::config::FiltersConfig;
use crate::error::{GitError, MpError, Result};
use crate::filter::submodule_passes;
use crate::git::{MainRepo, Submodule, cmd, query};
use crate::logging::LogContext;

/// Where the expected branch of a submodule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSource {
    /// `submodule.<name>.branch`.
    Tracking,
    /// `refs/remotes/origin/HEAD`.
    Default,
}

impl fmt::Display for BranchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracking => write!(f, "tracking"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullDecision {
    Pull {
        branch: String,
        source: BranchSource,
    },
    /// The checked-out branch is not the one the submodule should follow.
    Skip {
        source: BranchSource,
        expected: String,
        current: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Updated,
    UpToDate,
    Skipped,
}

/// Decide whether the submodule at `path` may be pulled.
///
/// Empty strings stand for absent values. The tracking branch wins over the
/// remote default.
///
/// # Errors
///
/// Returns [`GitError::MissingCurrentBranch`] when nothing is checked out and
/// [`GitError::UnknownPullBranch`] when neither a tracking nor a default
/// branch is known.
pub fn decide_pull(
    path: &str,
    current: &str,
    tracking: &str,
    default: &str,
) -> std::result::Result<PullDecision, GitError> {
    if current.is_empty() {
        return Err(GitError::MissingCurrentBranch {
            path: path.to_string(),
        });
    }

    let (expected, source) = match (tracking.is_empty(), default.is_empty()) {
        (false, _) => (tracking, BranchSource::Tracking),
        (true, false) => (default, BranchSource::Default),
        (true, true) => {
            return Err(GitError::UnknownPullBranch {
                path: path.to_string(),
            });
        }
    };

    if expected == current {
        Ok(PullDecision::Pull {
            branch: current.to_string(),
            source,
        })
    } else {
        Ok(PullDecision::Skip {
            source,
            expected: expected.to_string(),
            current: current.to_string(),
        })
    }
}

fn pull_submodule(
    repo: &MainRepo,
    submodule: &Submodule,
    log: &LogContext,
) -> Result<PullOutcome> {
    let worktree = repo.worktree_path(&submodule.path);
    let current = query::current_branch(&worktree)
        .with_context(|| format!("failed to read current branch of {}", submodule.path))?
        .unwrap_or_default();
    let default = query::remote_default_branch(&worktree, ORIGIN)
        .with_context(|| format!("failed to read {ORIGIN}/HEAD of {}", submodule.path))?
        .unwrap_or_default();
    let tracking = submodule.branch.as_deref().unwrap_or_default();

    let branch = match decide_pull(&submodule.path, &current, tracking, &default)
        .map_err(MpError::from)?
    {
        PullDecision::Pull { branch, source } => {
            debug!(parent: log.span(), %branch, %source, "pulling");
            branch
        }
        PullDecision::Skip {
            source,
            expected,
            current,
        } => {
            warn!(
                parent: log.span(),
                %expected,
                %current,
                "{source} branch mismatch, skipping pull"
            );
            return Ok(PullOutcome::Skipped);
        }
    };

    let before = query::head_id(&worktree)?;
    cmd::pull(&worktree, ORIGIN, &branch).map_err(|e| {
        MpError::from(GitError::PullFailed {
            path: submodule.path.clone(),
            branch: branch.clone(),
            message: e.to_string(),
        })
    })?;
    let after = query::head_id(&worktree)?;

    if before == after {
        Ok(PullOutcome::UpToDate)
    } else {
        Ok(PullOutcome::Updated)
    }
}

impl<D> App<D> {
    /// Pull every recorded submodule whose name passes the group and project
    /// filters, one after another.
    ///
    /// # Errors
    ///
    /// Returns an error if the main project does not exist or its submodules
    /// cannot be read. Per-submodule failures only land in the summary.
    pub fn pull_main_project_submodules(&self, filters: &FiltersConfig) -> Result<PullSummary> {
        let root = self.main_project_path();
        let repo = MainRepo::open(root)
            .with_context(|| format!("failed to open main project {}", root.display()))?;
        let submodules = repo
            .submodules()
            .with_context(|| format!("failed to read submodules of {}", root.display()))?;
        debug!(parent: self.log.span(), count = submodules.len(), "submodules recorded");

        let mut summary = PullSummary::default();
        for submodule in &submodules {
            if !submodule_passes(&submodule.name, filters) {
                debug!(parent: self.log.span(), name = %submodule.name, "submodule filtered out");
                summary.filtered.push(submodule.name.clone());
                continue;
            }

            let log = self.log.submodule(&submodule.name);
            match pull_submodule(&repo, submodule, &log) {
                Ok(PullOutcome::Updated) => {
                    info!(parent: log.span(), "updated");
                    summary.pulled.push(submodule.name.clone());
                }
                Ok(PullOutcome::UpToDate) => {
                    debug!(parent: log.span(), "already up to date");
                    summary.up_to_date.push(submodule.name.clone());
                }
                Ok(PullOutcome::Skipped) => summary.skipped.push(submodule.name.clone()),
                Err(e) => {
                    let message = format!("{e:#}");
                    error!(parent: log.span(), error = %message, "failed to pull submodule");
                    summary.failed.push((submodule.name.clone(), message));
                }
            }
        }

        summary.log(&self.log);
        Ok(summary)
    }
}
