// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mpcreator.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local mpcreator.toml (cwd)
//! 3. --config
//! 4. MPCREATOR_* env vars
//! 5. CLI overrides (--url, --token, --mppath, filter lists)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MPCREATOR_GITLAB__URL=https://git.example.com  → gitlab.url
//! MPCREATOR_GITLAB__TOKEN=glpat-xxxx             → gitlab.token
//! MPCREATOR_MAIN_PROJECT__PATH=/srv/mp           → main_project.path
//! MPCREATOR_FILL__MAX_CONCURRENCY=8              → fill.max_concurrency
//! MPCREATOR_FILTERS__INCLUDE_GROUPS=team,ops     → filters.include_groups
//! ```
//!
//! # Example
//!
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.com"
//! token = "glpat-xxxx"
//!
//! [main_project]
//! path = "/srv/mainproject"
//!
//! [filters]
//! include_groups = ["platform"]
//! exclude_languages = ["PHP"]
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, MpResult, Result};

pub use loader::ConfigLoader;
pub use types::{
    CloneProtocol, FillConfig, FiltersConfig, GitlabConfig, GlobalConfig, MainProjectConfig,
};

/// Prefix of the environment variables read by [`Config::layered`].
pub const ENV_PREFIX: &str = "MPCREATOR";

/// Name of the optional configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "mpcreator.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// GitLab connection.
    pub gitlab: GitlabConfig,
    /// Aggregate repository.
    pub main_project: MainProjectConfig,
    /// Include/exclude filters.
    pub filters: FiltersConfig,
    /// `fill` tuning.
    pub fill: FillConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mpcreator::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("mpcreator.toml")
    ///     .with_env_prefix("MPCREATOR")
    ///     .set("gitlab.url", "https://gitlab.example.com")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loader pre-populated with the standard file and environment layers.
    ///
    /// Callers add their CLI overrides with [`ConfigLoader::set`] and then
    /// call `build()`.
    #[must_use]
    pub fn layered(config_file: Option<&Path>) -> ConfigLoader {
        let mut loader = Self::builder().add_toml_file_optional(LOCAL_CONFIG_FILE);
        if let Some(path) = config_file {
            loader = loader.add_toml_file(path);
        }
        loader.with_env_prefix(ENV_PREFIX)
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// GitLab base URL, required by every remote command.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `gitlab.url` is empty.
    pub fn gitlab_url(&self) -> MpResult<&str> {
        non_empty(&self.gitlab.url, "gitlab", "url")
    }

    /// GitLab access token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `gitlab.token` is empty.
    pub fn gitlab_token(&self) -> MpResult<&str> {
        non_empty(&self.gitlab.token, "gitlab", "token")
    }

    /// Filesystem path of the aggregate repository.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `main_project.path` is unset.
    pub fn main_project_path(&self) -> MpResult<&Path> {
        match self.main_project.path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(missing("main_project", "path").into()),
        }
    }

    /// Replace every configured filter list for which `overrides` carries a
    /// non-empty list.
    pub fn apply_filter_overrides(&mut self, overrides: FiltersConfig) {
        let FiltersConfig {
            include_groups,
            exclude_groups,
            include_projects,
            exclude_projects,
            include_languages,
            exclude_languages,
        } = overrides;

        replace_if_set(&mut self.filters.include_groups, include_groups);
        replace_if_set(&mut self.filters.exclude_groups, exclude_groups);
        replace_if_set(&mut self.filters.include_projects, include_projects);
        replace_if_set(&mut self.filters.exclude_projects, exclude_projects);
        replace_if_set(&mut self.filters.include_languages, include_languages);
        replace_if_set(&mut self.filters.exclude_languages, exclude_languages);
    }

    /// Format configuration options for display.
    ///
    /// The token is shown as `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_gitlab_options(&mut options);
        self.format_filter_options(&mut options);

        options.insert(
            "main_project.path".into(),
            fmt_path(self.main_project.path.as_ref()),
        );
        options.insert(
            "fill.max_concurrency".into(),
            self.fill.max_concurrency.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| {
                format!("{key:<max_key_len$} = {value}")
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.log_level".into(),
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            fmt_path(self.global.log_file.as_ref()),
        );
    }

    fn format_gitlab_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("gitlab.url".into(), self.gitlab.url.clone());
        let token = if self.gitlab.token.is_empty() {
            String::new()
        } else {
            "[hidden]".to_string()
        };
        options.insert("gitlab.token".into(), token);
        options.insert(
            "gitlab.clone_protocol".into(),
            self.gitlab.clone_protocol.to_string(),
        );
    }

    fn format_filter_options(&self, options: &mut BTreeMap<String, String>) {
        let lists = [
            ("include_groups", &self.filters.include_groups),
            ("exclude_groups", &self.filters.exclude_groups),
            ("include_projects", &self.filters.include_projects),
            ("exclude_projects", &self.filters.exclude_projects),
            ("include_languages", &self.filters.include_languages),
            ("exclude_languages", &self.filters.exclude_languages),
        ];
        for (key, values) in lists {
            options.insert(format!("filters.{key}"), values.join(","));
        }
    }
}

fn missing(section: &str, key: &str) -> ConfigError {
    ConfigError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn non_empty<'a>(value: &'a str, section: &str, key: &str) -> MpResult<&'a str> {
    if value.trim().is_empty() {
        Err(missing(section, key).into())
    } else {
        Ok(value)
    }
}

fn replace_if_set(target: &mut Vec<String>, value: Vec<String>) {
    if !value.is_empty() {
        *target = value;
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
