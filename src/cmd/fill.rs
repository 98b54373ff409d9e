// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fill command implementation.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::git::git_executable;
use crate::gitlab::client::GitlabClient;
use crate::logging::LogContext;
use crate::mainproject::App;

/// Main handler for the `fill` command.
///
/// # Errors
///
/// Returns an error if `git` is not installed, a required key is missing or
/// the traversal fails. Projects that could not be added are logged and do
/// not change the exit status.
pub async fn run_fill_command(config: &Config) -> Result<()> {
    git_executable()?;
    let client = GitlabClient::new(config.gitlab_url()?, config.gitlab_token()?)?;
    let log = LogContext::for_command("fill");
    info!(parent: log.span(), api = client.api_url(), "filling main project");

    let app = App::builder()
        .main_project_path(config.main_project_path()?)
        .directory(client)
        .clone_protocol(config.gitlab.clone_protocol)
        .max_concurrency(config.fill.max_concurrency)
        .log(log.clone())
        .build();

    let summary = app.fill_main_project(&config.filters).await?;
    if !summary.failed.is_empty() {
        warn!(
            parent: log.span(),
            failed = summary.failed.len(),
            total = summary.total(),
            "some projects could not be added, see the errors above"
        );
    }
    Ok(())
}
