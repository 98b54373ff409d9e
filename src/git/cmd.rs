// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (LC_ALL=C, no prompts)
//! ```

use crate::error::MpResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Initialize a new repository.
///
/// # Errors
///
/// Returns a `GitError` if repository initialization fails.
pub fn init_repo(path: &Path) -> MpResult<()> {
    ShellBackend::init_repo(path)
}

/// Clone a repository.
///
/// # Errors
///
/// Returns a `GitError` if the clone operation fails or the destination path is invalid.
pub fn clone(url: &str, dest: &Path) -> MpResult<()> {
    ShellBackend::clone(url, dest)
}

/// Add a submodule.
///
/// # Errors
///
/// Returns a `GitError` if the submodule cannot be added.
pub fn add_submodule(repo_path: &Path, url: &str, submodule_path: &str) -> MpResult<()> {
    ShellBackend::add_submodule(repo_path, url, submodule_path)
}

/// # Errors
///
/// Returns a `GitError` if the command fails.
pub fn absorb_git_dirs(repo_path: &Path, submodule_path: &str) -> MpResult<()> {
    ShellBackend::absorb_git_dirs(repo_path, submodule_path)
}

/// Initialize a submodule (idempotent).
///
/// # Errors
///
/// Returns a `GitError` if the command fails.
pub fn init_submodule(repo_path: &Path, submodule_path: &str) -> MpResult<()> {
    ShellBackend::init_submodule(repo_path, submodule_path)
}

/// Fast-forward pull.
///
/// # Errors
///
/// Returns a `GitError` if the pull operation fails.
pub fn pull(repo_path: &Path, remote: &str, branch: &str) -> MpResult<()> {
    ShellBackend::pull(repo_path, remote, branch)
}
