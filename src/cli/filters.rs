// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Connection and filter arguments shared by the commands.
//!
//! Every list flag takes comma-separated values and may be repeated:
//! `--ingroups team,ops --ingroups infra`.

use clap::Args;

use crate::config::FiltersConfig;

/// GitLab connection flags.
#[derive(Debug, Clone, Default, Args)]
pub struct RemoteArgs {
    /// GitLab base URL, e.g. `https://gitlab.example.com`.
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// GitLab personal access token.
    #[arg(short = 't', long = "token", value_name = "TOKEN")]
    pub token: Option<String>,
}

impl RemoteArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(ref url) = self.url {
            overrides.push(("gitlab.url", url.clone()));
        }
        if let Some(ref token) = self.token {
            overrides.push(("gitlab.token", token.clone()));
        }
        overrides
    }
}

/// Group and project name filters.
#[derive(Debug, Clone, Default, Args)]
pub struct NameFilterArgs {
    /// Only groups with one of these path segments.
    #[arg(long = "ingroups", value_name = "GROUP", value_delimiter = ',')]
    pub include_groups: Vec<String>,

    /// Skip groups with one of these path segments.
    #[arg(long = "exgroups", value_name = "GROUP", value_delimiter = ',')]
    pub exclude_groups: Vec<String>,

    /// Only projects with one of these names.
    #[arg(long = "inprojects", value_name = "PROJECT", value_delimiter = ',')]
    pub include_projects: Vec<String>,

    /// Skip projects with one of these names.
    #[arg(long = "exprojects", value_name = "PROJECT", value_delimiter = ',')]
    pub exclude_projects: Vec<String>,
}

/// Language filters, resolved through the GitLab languages endpoint.
#[derive(Debug, Clone, Default, Args)]
pub struct LanguageFilterArgs {
    /// Only projects using one of these languages (exact, case-sensitive).
    #[arg(long = "inlang", value_name = "LANGUAGE", value_delimiter = ',')]
    pub include_languages: Vec<String>,

    /// Skip projects using one of these languages.
    #[arg(long = "exlang", value_name = "LANGUAGE", value_delimiter = ',')]
    pub exclude_languages: Vec<String>,
}

impl NameFilterArgs {
    /// Filter overrides carrying only the name lists.
    #[must_use]
    pub fn to_filters(&self) -> FiltersConfig {
        FiltersConfig {
            include_groups: self.include_groups.clone(),
            exclude_groups: self.exclude_groups.clone(),
            include_projects: self.include_projects.clone(),
            exclude_projects: self.exclude_projects.clone(),
            ..FiltersConfig::default()
        }
    }

    /// Name filters combined with language filters.
    #[must_use]
    pub fn with_languages(&self, languages: &LanguageFilterArgs) -> FiltersConfig {
        FiltersConfig {
            include_languages: languages.include_languages.clone(),
            exclude_languages: languages.exclude_languages.clone(),
            ..self.to_filters()
        }
    }
}
