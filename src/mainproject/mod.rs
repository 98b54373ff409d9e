// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Main-project reconciliation and submodule pulls.
//!
//! ```text
//! App { main_project_path, directory, clone_protocol, max_concurrency, log }
//!   |
//!   +-- fill_main_project(filters) -> FillSummary
//!   |     open_or_init
//!   |     for group (sequential)
//!   |       for project -> JoinSet task
//!   |          find? no -> clone worktree      (concurrent, distinct paths)
//!   |          registration lock -> ensure_submodule
//!   |       wait for the whole group
//!   |
//!   +-- pull_main_project_submodules(filters) -> PullSummary
//!         no directory access, any D (the command uses `()`)
//!         open (must exist)
//!         for submodule (sequential)
//!           submodule_passes? -> decide_pull -> git pull --ff-only
//! ```

pub mod fill;
pub mod pull;
pub mod summary;


use bon::Builder;
use std::path::{Path, PathBuf};

use crate::config::CloneProtocol;
use crate::logging::LogContext;

pub use pull::{BranchSource, PullDecision, PullOutcome, decide_pull};
pub use summary::{FillSummary, PullSummary};

/// Remote every submodule pulls from.
pub const ORIGIN: &str = "origin";

/// Reconciler and pull orchestrator for one aggregate repository.
#[derive(Builder)]
pub struct App<D> {
    #[builder(into)]
    main_project_path: PathBuf,
    directory: D,
    #[builder(default)]
    clone_protocol: CloneProtocol,
    /// Per-group cap on concurrent submodule tasks; 0 means unbounded.
    #[builder(default)]
    max_concurrency: usize,
    #[builder(default)]
    log: LogContext,
}

impl<D> App<D> {
    #[must_use]
    pub fn main_project_path(&self) -> &Path {
        &self.main_project_path
    }
}
