// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::MpResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend, Submodule};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
pub fn current_branch(path: &Path) -> MpResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Default branch advertised by `remote` (its `HEAD` symbolic ref).
///
/// # Errors
///
/// Returns a `GitError` if the repository or its references cannot be read.
pub fn remote_default_branch(path: &Path, remote: &str) -> MpResult<Option<String>> {
    GixBackend::remote_default_branch(path, remote)
}

/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
pub fn head_id(path: &Path) -> MpResult<Option<String>> {
    GixBackend::head_id(path)
}

/// Submodules recorded in the superproject at `repo_path`.
///
/// # Errors
///
/// Returns a `GitError` if the repository or its config files cannot be read.
pub fn submodules(repo_path: &Path) -> MpResult<Vec<Submodule>> {
    GixBackend::submodules(repo_path)
}
