// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote project directory.
//!
//! ```text
//! ProjectDirectory (trait, async, Send + Sync)
//!   list_groups(page, per_page, search)       GET /groups
//!   list_group_projects(group, page, per_page) GET /groups/:id/projects
//!   project_languages(project)                GET /projects/:id/languages
//!        ^
//!        |
//!   GitlabClient (reqwest, PRIVATE-TOKEN)
//! ```
//!
//! Pages are 1-based. The directory never filters; see [`crate::filter`].

pub mod client;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

use crate::config::CloneProtocol;
use crate::error::Result;

pub use client::GitlabClient;

/// A remote group (namespace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    /// Full slash-separated path, e.g. `platform/backend`.
    pub full_path: String,
}

impl Group {
    /// Full path with GitLab's `" / "` display separators collapsed to `/`.
    #[must_use]
    pub fn normalized_path(&self) -> String {
        self.full_path.replace(" / ", "/")
    }
}

/// A remote project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    /// Last path segment (slug), used by project filters.
    pub path: String,
    /// Namespace-qualified path, e.g. `platform/backend/billing`.
    pub path_with_namespace: String,
    #[serde(default)]
    pub ssh_url_to_repo: String,
    #[serde(default)]
    pub http_url_to_repo: String,
}

impl Project {
    /// Relative path of the project's submodule inside the main project.
    #[must_use]
    pub fn submodule_path(&self) -> String {
        self.path_with_namespace.replace(" / ", "/")
    }

    /// Clone URL for the requested protocol.
    #[must_use]
    pub fn clone_url(&self, protocol: CloneProtocol) -> &str {
        match protocol {
            CloneProtocol::Ssh => &self.ssh_url_to_repo,
            CloneProtocol::Http => &self.http_url_to_repo,
        }
    }
}

/// Language breakdown of a project, keyed by language name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Languages(pub BTreeMap<String, f64>);

impl Languages {
    /// Exact, case-sensitive key lookup.
    #[must_use]
    pub fn contains(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }
}

/// Paginated, read-only view of the remote hosting service.
pub trait ProjectDirectory: Send + Sync {
    /// One page of groups visible to the caller.
    ///
    /// `search` is a server-side narrowing hint; callers still filter.
    fn list_groups(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Group>>> + Send;

    /// One page of the group's direct, non-archived projects.
    fn list_group_projects(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<Project>>> + Send;

    fn project_languages(&self, project_id: u64) -> impl Future<Output = Result<Languages>> + Send;
}
