// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The aggregate ("main") repository and its submodules.
//!
//! ```text
//! open_or_init(root)
//!   missing dir   -> create_dir_all
//!   missing .git  -> git init
//!
//! ensure_submodule(path, url)
//!   find(path) --found--------------------------.
//!      |                                         v
//!   submodule add -> absorbgitdirs -> find -> submodule init
//!                                     (SubmoduleNotFound if still absent)
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::backend::Submodule;
use super::{cmd, query};
use crate::error::{GitError, MpResult};

/// Result of [`MainRepo::ensure_submodule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The submodule was registered by this call.
    Added,
    /// The submodule was already registered.
    Present,
}

/// Handle on the aggregate repository at `root`.
#[derive(Debug, Clone)]
pub struct MainRepo {
    root: PathBuf,
}

impl MainRepo {
    /// Open an existing repository rooted exactly at `root`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepoNotFound` if `root` is not a repository root.
    pub fn open(root: &Path) -> MpResult<Self> {
        if !query::is_git_repo(root) {
            return Err(GitError::RepoNotFound {
                path: root.display().to_string(),
            }
            .into());
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Open the repository at `root`, creating the directory and running
    /// `git init` when needed. An existing repository is left untouched.
    ///
    /// Returns the handle and whether a repository was created.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` exists but is not a directory, or if the
    /// directory cannot be created or initialized.
    pub fn open_or_init(root: &Path) -> MpResult<(Self, bool)> {
        if root.exists() && !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("{} is not a directory", root.display()),
            )
            .into());
        }

        if !root.exists() {
            info!(path = %root.display(), "main project directory does not exist, creating");
            std::fs::create_dir_all(root)?;
        }

        if query::is_git_repo(root) {
            debug!(path = %root.display(), "main project repository exists");
            return Ok((Self::open(root)?, false));
        }

        info!(path = %root.display(), "initializing main project repository");
        cmd::init_repo(root)?;
        Ok((Self::open(root)?, true))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute worktree path of a submodule path.
    #[must_use]
    pub fn worktree_path(&self, submodule_path: &str) -> PathBuf {
        self.root.join(submodule_path)
    }

    /// All recorded submodules, in `.gitmodules` order.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository configuration cannot be read.
    pub fn submodules(&self) -> MpResult<Vec<Submodule>> {
        query::submodules(&self.root)
    }

    /// Look up a submodule by its worktree path.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository configuration cannot be read.
    pub fn find_submodule(&self, submodule_path: &str) -> MpResult<Option<Submodule>> {
        Ok(self
            .submodules()?
            .into_iter()
            .find(|s| s.path == submodule_path))
    }

    /// Clone `url` into the submodule's worktree unless something is already there.
    ///
    /// Touches nothing but `submodule_path`, so distinct paths may be prepared
    /// concurrently. Returns whether a clone happened.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone fails.
    pub fn prepare_worktree(&self, submodule_path: &str, url: &str) -> MpResult<bool> {
        let dest = self.worktree_path(submodule_path);
        if dest.join(".git").exists() {
            return Ok(false);
        }
        if dest.is_dir() && std::fs::read_dir(&dest)?.next().is_some() {
            // Leave unrelated content alone; `submodule add` reports the conflict.
            return Ok(false);
        }
        debug!(path = submodule_path, url, "cloning submodule worktree");
        cmd::clone(url, &dest)?;
        Ok(true)
    }

    /// Make sure `submodule_path` is a registered, initialized submodule of `url`.
    ///
    /// Calling this twice with the same arguments yields one submodule entry.
    /// It mutates `.gitmodules` and `.git/config`; callers serialize it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `submodule add`, `absorbgitdirs` or
    /// `submodule init` fails, or `GitError::SubmoduleNotFound` if the entry
    /// is still missing after being added.
    pub fn ensure_submodule(&self, submodule_path: &str, url: &str) -> MpResult<EnsureOutcome> {
        let outcome = if self.find_submodule(submodule_path)?.is_some() {
            debug!(path = submodule_path, "submodule exists");
            EnsureOutcome::Present
        } else {
            info!(path = submodule_path, url, "submodule does not exist, adding");
            cmd::add_submodule(&self.root, url, submodule_path)?;
            cmd::absorb_git_dirs(&self.root, submodule_path)?;

            if self.find_submodule(submodule_path)?.is_none() {
                return Err(GitError::SubmoduleNotFound {
                    path: submodule_path.to_string(),
                }
                .into());
            }
            info!(path = submodule_path, "submodule added");
            EnsureOutcome::Added
        };

        cmd::init_submodule(&self.root, submodule_path)?;
        Ok(outcome)
    }
}
