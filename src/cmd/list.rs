// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for mpcreator.

use std::io::Write;

use crate::config::{CloneProtocol, Config};
use crate::error::Result;
use crate::gitlab::Project;
use crate::gitlab::client::GitlabClient;
use crate::logging::LogContext;
use crate::traverse::Traversal;

/// One `group<TAB>project<TAB>clone-url` line.
#[must_use]
pub fn format_project_line(group: &str, project: &Project, protocol: CloneProtocol) -> String {
    format!("{group}\t{}\t{}", project.path, project.clone_url(protocol))
}

/// Main handler for the `list` command.
///
/// # Errors
///
/// Returns an error if a required key is missing, the traversal fails or
/// stdout cannot be written.
pub async fn run_list_command(config: &Config) -> Result<()> {
    let client = GitlabClient::new(config.gitlab_url()?, config.gitlab_token()?)?;
    let projects = Traversal::new(&client, LogContext::for_command("list"))
        .collect_projects(&config.filters)
        .await?;

    let mut out = std::io::stdout().lock();
    for (group, project) in &projects {
        writeln!(
            out,
            "{}",
            format_project_line(group, project, config.gitlab.clone_protocol)
        )?;
    }
    Ok(())
}
