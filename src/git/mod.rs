// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!   query.rs  cmd.rs  repo.rs
//!        \      |      /
//!         v     v     v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .init/.clone
//!    .branch     .submodule add/init
//!    .origin/HEAD .absorbgitdirs
//!    .head_id    .pull --ff-only
//!    .submodules
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for submodule porcelain and every write.

pub mod backend;
pub mod cmd;
pub mod query;
pub mod repo;

pub use backend::{Submodule, git_executable};
pub use repo::{EnsureOutcome, MainRepo};

#[cfg(test)]
pub(crate) mod test_support;
