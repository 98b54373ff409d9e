// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `fill`: add every selected project as a submodule of the main project.

use anyhow::Context;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::{App, FillSummary};
use crate::config::FiltersConfig;
use crate::error::{MpResult, Result};
use crate::git::{EnsureOutcome, MainRepo};
use crate::gitlab::{Group, ProjectDirectory};
use crate::logging::LogContext;
use crate::traverse::Traversal;

/// Repository handle shared by the tasks of one `fill` run.
struct Registry {
    repo: MainRepo,
    /// Serializes every write to `.gitmodules` and `.git/config`.
    registration: Mutex<()>,
}

impl Registry {
    fn ensure(&self, path: &str, url: &str) -> MpResult<EnsureOutcome> {
        if self.repo.find_submodule(path)?.is_none() {
            self.repo.prepare_worktree(path, url)?;
        }
        let _guard = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.repo.ensure_submodule(path, url)
    }
}

async fn ensure_project(
    registry: Arc<Registry>,
    semaphore: Option<Arc<Semaphore>>,
    path: String,
    url: String,
    log: LogContext,
) -> Result<EnsureOutcome> {
    let _permit = match semaphore {
        Some(semaphore) => Some(
            semaphore
                .acquire_owned()
                .await
                .context("concurrency limiter closed")?,
        ),
        None => None,
    };

    if url.is_empty() {
        anyhow::bail!("project has no clone url");
    }

    debug!(parent: log.span(), path, "filling project");
    let outcome =
        tokio::task::spawn_blocking(move || log.in_scope(|| registry.ensure(&path, &url)))
            .await
            .context("submodule task panicked")?
            .context("failed to ensure submodule")?;
    Ok(outcome)
}

impl<D: ProjectDirectory> App<D> {
    /// Make every project selected by `filters` a submodule of the main project.
    ///
    /// Projects of one group are processed concurrently; groups run one after
    /// another. A project failure is logged and recorded in the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the main project cannot be opened or created, or
    /// if listing or filtering groups and projects fails.
    pub async fn fill_main_project(&self, filters: &FiltersConfig) -> Result<FillSummary> {
        let root = self.main_project_path();
        let (repo, created) = MainRepo::open_or_init(root).with_context(|| {
            format!("failed to open or initialize main project {}", root.display())
        })?;
        if created {
            info!(parent: self.log.span(), path = %root.display(), "main project created");
        }

        let registry = Arc::new(Registry {
            repo,
            registration: Mutex::new(()),
        });
        let semaphore =
            (self.max_concurrency > 0).then(|| Arc::new(Semaphore::new(self.max_concurrency)));
        let traversal = Traversal::new(&self.directory, self.log.clone());
        let mut summary = FillSummary::default();

        traversal
            .for_each_group(
                &filters.include_groups,
                &filters.exclude_groups,
                async |group: &Group| -> Result<()> {
                    let group_log = self.log.group(&group.full_path);
                    debug!(parent: group_log.span(), "filling group");

                    let mut tasks = JoinSet::new();
                    let mut pending = HashMap::new();
                    traversal
                        .for_each_group_project(group, filters, |project| {
                            let path = project.submodule_path();
                            let url = project.clone_url(self.clone_protocol).to_string();
                            let log = group_log.project(&project.path_with_namespace);
                            let handle = tasks.spawn(ensure_project(
                                Arc::clone(&registry),
                                semaphore.clone(),
                                path.clone(),
                                url,
                                log.clone(),
                            ));
                            pending.insert(handle.id(), (path, log));
                            Ok(())
                        })
                        .await?;

                    while let Some(joined) = tasks.join_next_with_id().await {
                        let (id, result) = match joined {
                            Ok((id, result)) => (id, result),
                            Err(e) => (e.id(), Err(anyhow::Error::new(e))),
                        };
                        let Some((path, log)) = pending.remove(&id) else {
                            continue;
                        };
                        match result {
                            Ok(EnsureOutcome::Added) => summary.added.push(path),
                            Ok(EnsureOutcome::Present) => summary.present.push(path),
                            Err(e) => {
                                let message = format!("{e:#}");
                                error!(
                                    parent: log.span(),
                                    error = %message,
                                    "failed to add submodule"
                                );
                                summary.failed.push((path, message));
                            }
                        }
                    }

                    debug!(parent: group_log.span(), "filling group done");
                    Ok(())
                },
            )
            .await
            .context("failed to fill main project")?;

        summary.added.sort();
        summary.present.sort();
        summary.failed.sort();
        summary.log(&self.log);
        Ok(summary)
    }
}
