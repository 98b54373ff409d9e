// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull command implementation.

use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::git::git_executable;
use crate::logging::LogContext;
use crate::mainproject::App;

/// Main handler for the `pull` command. Works offline: no GitLab access.
///
/// # Errors
///
/// Returns an error if `git` is not installed or the main project cannot be
/// read. Failed submodules are logged only.
pub fn run_pull_command(config: &Config) -> Result<()> {
    git_executable()?;
    let log = LogContext::for_command("pull");
    let app = App::builder()
        .main_project_path(config.main_project_path()?)
        .directory(())
        .log(log.clone())
        .build();

    let summary = app.pull_main_project_submodules(&config.filters)?;
    if !summary.failed.is_empty() {
        warn!(
            parent: log.span(),
            failed = summary.failed.len(),
            total = summary.total(),
            "some submodules could not be pulled, see the errors above"
        );
    }
    Ok(())
}
