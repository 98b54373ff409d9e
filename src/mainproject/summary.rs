// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-command outcome counters.

use tracing::info;

use crate::logging::LogContext;

/// What `fill` did, per submodule path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub added: Vec<String>,
    pub present: Vec<String>,
    /// `(path, error chain)` of projects whose submodule could not be ensured.
    pub failed: Vec<(String, String)>,
}

impl FillSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.present.len() + self.failed.len()
    }

    /// Emit the totals at `info`.
    pub fn log(&self, ctx: &LogContext) {
        info!(
            parent: ctx.span(),
            added = self.added.len(),
            present = self.present.len(),
            failed = self.failed.len(),
            "fill finished"
        );
    }
}

/// What `pull` did, per submodule name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullSummary {
    /// Pulls that moved HEAD.
    pub pulled: Vec<String>,
    pub up_to_date: Vec<String>,
    /// Branch mismatches.
    pub skipped: Vec<String>,
    /// Excluded by the group/project filters.
    pub filtered: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl PullSummary {
    /// Submodules that passed the filters.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pulled.len() + self.up_to_date.len() + self.skipped.len() + self.failed.len()
    }

    pub fn log(&self, ctx: &LogContext) {
        info!(
            parent: ctx.span(),
            pulled = self.pulled.len(),
            up_to_date = self.up_to_date.len(),
            skipped = self.skipped.len(),
            filtered = self.filtered.len(),
            failed = self.failed.len(),
            "pull finished"
        );
    }
}
