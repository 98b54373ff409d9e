// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Paginated group/project traversal.
//!
//! ```text
//! for_each_group(include, exclude, visitor)
//!   page = 1..
//!     list_groups(page, K, search?)      search = include[0] iff len == 1
//!     group_passes? -> visitor(group).await
//!     len == K ? next page : stop
//!
//! for_each_group_project(group, filters, visitor)
//!   page = 1..
//!     list_group_projects(group.id, page, K)
//!     project_passes? -> visitor(project)
//!     len == K ? next page : stop
//!
//! collect_projects(filters) = both walks, gathering (group, project)
//! ```
//!
//! A full page always triggers one more request, so `N` items with `N % K == 0`
//! cost `N / K + 1` calls.

#[cfg(test)]
mod tests;

use anyhow::Context;
use tracing::debug;

use crate::config::FiltersConfig;
use crate::error::Result;
use crate::filter;
use crate::gitlab::{Group, Project, ProjectDirectory};
use crate::logging::LogContext;

/// Page size used against the remote directory.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Walks a [`ProjectDirectory`] applying the configured filters.
pub struct Traversal<'a, D> {
    directory: &'a D,
    page_size: u32,
    log: LogContext,
}

impl<'a, D: ProjectDirectory> Traversal<'a, D> {
    #[must_use]
    pub const fn new(directory: &'a D, log: LogContext) -> Self {
        Self {
            directory,
            page_size: DEFAULT_PAGE_SIZE,
            log,
        }
    }

    /// Override the page size (must be non-zero).
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Visit every group passing the group filter, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be listed or the visitor fails; the
    /// remaining pages are not requested.
    pub async fn for_each_group<F>(
        &self,
        include: &[String],
        exclude: &[String],
        mut visitor: F,
    ) -> Result<()>
    where
        F: AsyncFnMut(&Group) -> Result<()>,
    {
        let search = match include {
            [only] => Some(only.as_str()),
            _ => None,
        };

        let mut page = 1;
        loop {
            let groups = self
                .directory
                .list_groups(page, self.page_size, search)
                .await
                .with_context(|| format!("failed to list groups (page {page})"))?;

            for group in &groups {
                if !filter::group_passes(group, include, exclude) {
                    debug!(parent: self.log.span(), group = %group.full_path, "group filtered out");
                    continue;
                }
                visitor(group)
                    .await
                    .with_context(|| format!("failed to process group {}", group.full_path))?;
            }

            if !self.is_full_page(groups.len()) {
                break;
            }
            page += 1;
        }

        Ok(())
    }

    /// Visit every direct project of `group` passing the project filters.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be listed, a language lookup fails or
    /// the visitor fails.
    pub async fn for_each_group_project<F>(
        &self,
        group: &Group,
        filters: &FiltersConfig,
        mut visitor: F,
    ) -> Result<()>
    where
        F: FnMut(&Project) -> Result<()>,
    {
        let mut page = 1;
        loop {
            let projects = self
                .directory
                .list_group_projects(group.id, page, self.page_size)
                .await
                .with_context(|| {
                    format!("failed to list projects of {} (page {page})", group.full_path)
                })?;

            for project in &projects {
                let passes = filter::project_passes(self.directory, project, filters)
                    .await
                    .with_context(|| {
                        format!("failed to filter project {}", project.path_with_namespace)
                    })?;
                if !passes {
                    debug!(
                        parent: self.log.span(),
                        project = %project.path_with_namespace,
                        "project filtered out"
                    );
                    continue;
                }
                visitor(project).with_context(|| {
                    format!("failed to process project {}", project.path_with_namespace)
                })?;
            }

            if !self.is_full_page(projects.len()) {
                break;
            }
            page += 1;
        }

        Ok(())
    }

    /// Every project passing `filters`, as `(group full path, project)` pairs
    /// in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if listing or filtering groups and projects fails.
    pub async fn collect_projects(
        &self,
        filters: &FiltersConfig,
    ) -> Result<Vec<(String, Project)>> {
        let mut selected = Vec::new();
        self.for_each_group(
            &filters.include_groups,
            &filters.exclude_groups,
            async |group: &Group| -> Result<()> {
                self.for_each_group_project(group, filters, |project| {
                    selected.push((group.full_path.clone(), project.clone()));
                    Ok(())
                })
                .await
            },
        )
        .await?;
        Ok(selected)
    }

    fn is_full_page(&self, len: usize) -> bool {
        u32::try_from(len).is_ok_and(|len| len == self.page_size)
    }
}
