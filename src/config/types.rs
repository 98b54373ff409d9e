// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for mpcreator.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GitlabConfig, MainProjectConfig,
//!         FiltersConfig, FillConfig
//! ```
//!
//! # Clone Protocol
//!
//! ```text
//! CloneProtocol: Ssh (default) | Http
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Which clone URL of a project is recorded in the submodule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneProtocol {
    #[default]
    Ssh,
    Http,
}

impl std::fmt::Display for CloneProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Http => write!(f, "http"),
        }
    }
}

impl std::str::FromStr for CloneProtocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ssh" => Ok(Self::Ssh),
            "http" | "https" => Ok(Self::Http),
            _ => Err(ConfigError::InvalidValue {
                section: "gitlab".to_string(),
                key: "clone_protocol".to_string(),
                message: format!("expected 'ssh' or 'http', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-6 or a level name).
    pub log_level: LogLevel,
    /// Optional log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// GitLab connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitlabConfig {
    /// Base URL, e.g. `https://gitlab.example.com`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Personal access token sent as `PRIVATE-TOKEN`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Clone URL flavour recorded in `.gitmodules`.
    pub clone_protocol: CloneProtocol,
}

/// Location of the aggregate repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MainProjectConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Include/exclude lists applied by `fill`, `list` and `pull`.
///
/// An empty include list includes everything; exclusion always wins.
/// Each list is a TOML array or, from the environment, a comma-separated
/// string (`MPCREATOR_FILTERS__INCLUDE_GROUPS=team,ops`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiltersConfig {
    #[serde(deserialize_with = "string_list")]
    pub include_groups: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub exclude_groups: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub include_projects: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub exclude_projects: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub include_languages: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub exclude_languages: Vec<String>,
}

/// Accepts a sequence of strings or one comma-separated string.
///
/// Blank entries are dropped, so an empty string yields an empty list.
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Joined(joined) => joined.split(',').map(ToString::to_string).collect(),
    };
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

/// `fill` command tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillConfig {
    /// Maximum concurrent submodule clones per group (0 = unbounded).
    pub max_concurrency: usize,
}
