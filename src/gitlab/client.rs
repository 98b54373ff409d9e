// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab REST v4 implementation of [`ProjectDirectory`].

use anyhow::Context;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::{Group, Languages, Project, ProjectDirectory};
use crate::error::{MpError, NetworkError, Result};

const API_SUFFIX: &str = "/api/v4";

/// Authenticated GitLab API client.
#[derive(Debug, Clone)]
pub struct GitlabClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GitlabClient {
    /// Create a client for `base_url`.
    ///
    /// `base_url` may be the instance root (`https://gitlab.example.com`) or
    /// already point at the API (`.../api/v4`).
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if `base_url` does not parse, or an
    /// error if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let api_url = normalize_api_url(base_url)?;
        let client = Client::builder()
            .user_agent(format!("mpcreator/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url,
            token: token.to_string(),
        })
    }

    /// The normalized API root, ending in `/api/v4`.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{path}", self.api_url);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| MpError::from(NetworkError::InvalidUrl(format!("{raw}: {e}"))).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        trace!(%url, "GitLab API request");

        let response = self
            .client
            .get(url.clone())
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MpError::from(NetworkError::from(e)))
            .with_context(|| format!("failed to request {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MpError::from(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            })
            .into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to parse response from {url}"))
    }
}

impl ProjectDirectory for GitlabClient {
    async fn list_groups(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Vec<Group>> {
        let mut params = page_params(page, per_page);
        params.push(("all_available", "false".to_string()));
        params.push(("top_level_only", "false".to_string()));
        if let Some(search) = search {
            params.push(("search", search.to_string()));
        }

        let groups: Vec<Group> = self.get_json(self.endpoint("/groups", &params)?).await?;
        debug!(page, count = groups.len(), "listed groups");
        Ok(groups)
    }

    async fn list_group_projects(
        &self,
        group_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>> {
        let mut params = page_params(page, per_page);
        params.push(("archived", "false".to_string()));
        params.push(("include_subgroups", "false".to_string()));

        let url = self.endpoint(&format!("/groups/{group_id}/projects"), &params)?;
        let projects: Vec<Project> = self.get_json(url).await?;
        debug!(group_id, page, count = projects.len(), "listed group projects");
        Ok(projects)
    }

    async fn project_languages(&self, project_id: u64) -> Result<Languages> {
        let url = self.endpoint(&format!("/projects/{project_id}/languages"), &[])?;
        self.get_json(url).await
    }
}

fn page_params(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("per_page", per_page.to_string())]
}

/// Trim trailing slashes and append `/api/v4` unless already present.
pub(crate) fn normalize_api_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| MpError::from(NetworkError::InvalidUrl(format!("{base_url}: {e}"))))?;

    if trimmed.ends_with(API_SUFFIX) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{API_SUFFIX}"))
    }
}
