// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CloneProtocol, Config, ConfigLoader, FiltersConfig};
use crate::error::{ConfigError, MpError};
use crate::logging::LogLevel;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.log_level, LogLevel::INFO);
    assert_eq!(config.gitlab.clone_protocol, CloneProtocol::Ssh);
    assert_eq!(config.fill.max_concurrency, 0);
    assert!(config.main_project.path.is_none());
    assert_eq!(config.filters, FiltersConfig::default());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
log_level = "debug"

[gitlab]
url = "https://gitlab.example.com"
token = "glpat-secret"
clone_protocol = "http"

[main_project]
path = "/srv/mainproject"

[filters]
include_groups = ["platform", "tools"]
exclude_languages = ["PHP"]

[fill]
max_concurrency = 4
"#;

    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.gitlab_url().unwrap(), "https://gitlab.example.com");
    assert_eq!(config.gitlab_token().unwrap(), "glpat-secret");
    assert_eq!(config.gitlab.clone_protocol, CloneProtocol::Http);
    assert_eq!(
        config.main_project_path().unwrap(),
        Path::new("/srv/mainproject")
    );
    assert_eq!(config.filters.include_groups, vec!["platform", "tools"]);
    assert_eq!(config.filters.exclude_languages, vec!["PHP"]);
    assert_eq!(config.fill.max_concurrency, 4);
}

#[test]
fn test_log_level_accepts_number_in_toml() {
    let config = Config::parse("[global]\nlog_level = 5").unwrap();
    assert_eq!(config.global.log_level, LogLevel::TRACE);
}

#[test]
fn test_clone_protocol_parse() {
    assert_eq!("SSH".parse::<CloneProtocol>().unwrap(), CloneProtocol::Ssh);
    assert_eq!("https".parse::<CloneProtocol>().unwrap(), CloneProtocol::Http);
    assert!("ftp".parse::<CloneProtocol>().is_err());
}

#[test]
fn test_missing_required_keys() {
    let config = Config::default();

    let url = config.gitlab_url().unwrap_err();
    assert!(matches!(
        url,
        MpError::Config(ref e) if matches!(**e, ConfigError::MissingKey { ref key, .. } if key == "url")
    ));
    assert!(config.gitlab_token().is_err());
    assert_eq!(
        config.main_project_path().unwrap_err().to_string(),
        "config error: missing required config key 'path' in section '[main_project]'"
    );
}

#[test]
fn test_whitespace_token_is_missing() {
    let config = Config::parse("[gitlab]\ntoken = \"  \"").unwrap();
    assert!(config.gitlab_token().is_err());
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let result = Config::parse("[unknown_section]\nkey = 1");
    assert!(result.is_err());
}

#[test]
fn test_deny_unknown_fields_in_section() {
    let result = Config::parse("[gitlab]\nhost = \"gitlab.example.com\"");
    assert!(result.is_err());
}

#[test]
fn test_config_loader_set_override() {
    let config = Config::builder()
        .add_toml_str("[gitlab]\nurl = \"https://from-file\"")
        .set("gitlab.url", "https://from-cli")
        .set("main_project.path", "/tmp/mp")
        .build()
        .unwrap();

    assert_eq!(config.gitlab.url, "https://from-cli");
    assert_eq!(config.main_project_path().unwrap(), Path::new("/tmp/mp"));
}

#[test]
fn test_config_loader_add_toml_file_success() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[gitlab]\ntoken = \"from-file\"").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .unwrap();
    assert_eq!(config.gitlab.token, "from-file");
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/mpcreator.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/path.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[gitlab]\nurl = \"a\"")
        .add_toml_str("[fill]\nmax_concurrency = 2");

    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [string] <string>",
        "2. [string] <string>",
    ]
    "#);
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("MPCRTEST_GITLAB__TOKEN", "from-env");
        std::env::set_var("MPCRTEST_MAIN_PROJECT__PATH", "/env/mp");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[gitlab]\ntoken = \"from-file\"")
        .with_env_prefix("MPCRTEST")
        .build();

    unsafe {
        std::env::remove_var("MPCRTEST_GITLAB__TOKEN");
        std::env::remove_var("MPCRTEST_MAIN_PROJECT__PATH");
    }

    let config = config.unwrap();
    assert_eq!(config.gitlab.token, "from-env", "env should override file");
    assert_eq!(config.main_project_path().unwrap(), Path::new("/env/mp"));
}

#[test]
fn test_config_loader_env_filter_lists() {
    // SAFETY: the variable names are unique to this test.
    unsafe {
        std::env::set_var("MPCRLISTS_FILTERS__INCLUDE_GROUPS", "team, ops");
        std::env::set_var("MPCRLISTS_FILTERS__EXCLUDE_PROJECTS", "2024");
        std::env::set_var("MPCRLISTS_FILTERS__INCLUDE_LANGUAGES", "");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[filters]\ninclude_groups = [\"from-file\"]\ninclude_languages = [\"Go\"]")
        .with_env_prefix("MPCRLISTS")
        .build();

    unsafe {
        std::env::remove_var("MPCRLISTS_FILTERS__INCLUDE_GROUPS");
        std::env::remove_var("MPCRLISTS_FILTERS__EXCLUDE_PROJECTS");
        std::env::remove_var("MPCRLISTS_FILTERS__INCLUDE_LANGUAGES");
    }

    let config = config.unwrap();
    assert_eq!(config.filters.include_groups, vec!["team", "ops"]);
    assert_eq!(config.filters.exclude_projects, vec!["2024"]);
    assert!(config.filters.include_languages.is_empty());
}

#[test]
fn test_config_loader_env_values_stay_verbatim() {
    // SAFETY: the variable names are unique to this test.
    unsafe {
        std::env::set_var("MPCRVERBATIM_GITLAB__TOKEN", "0012345");
        std::env::set_var("MPCRVERBATIM_MAIN_PROJECT__PATH", "007");
        std::env::set_var("MPCRVERBATIM_FILL__MAX_CONCURRENCY", "8");
        std::env::set_var("MPCRVERBATIM_GLOBAL__LOG_LEVEL", "5");
    }

    let config = ConfigLoader::new().with_env_prefix("MPCRVERBATIM").build();

    unsafe {
        std::env::remove_var("MPCRVERBATIM_GITLAB__TOKEN");
        std::env::remove_var("MPCRVERBATIM_MAIN_PROJECT__PATH");
        std::env::remove_var("MPCRVERBATIM_FILL__MAX_CONCURRENCY");
        std::env::remove_var("MPCRVERBATIM_GLOBAL__LOG_LEVEL");
    }

    let config = config.unwrap();
    assert_eq!(config.gitlab.token, "0012345");
    assert_eq!(config.main_project_path().unwrap(), Path::new("007"));
    assert_eq!(config.fill.max_concurrency, 8);
    assert_eq!(config.global.log_level, LogLevel::TRACE);
}

#[test]
fn test_apply_filter_overrides_replaces_only_non_empty() {
    let mut config = Config::parse(
        r#"
[filters]
include_groups = ["platform"]
exclude_projects = ["legacy"]
"#,
    )
    .unwrap();

    config.apply_filter_overrides(FiltersConfig {
        include_groups: vec!["tools".to_string()],
        include_languages: vec!["Rust".to_string()],
        ..FiltersConfig::default()
    });

    assert_eq!(config.filters.include_groups, vec!["tools"]);
    assert_eq!(config.filters.exclude_projects, vec!["legacy"]);
    assert_eq!(config.filters.include_languages, vec!["Rust"]);
    assert!(config.filters.exclude_groups.is_empty());
}

#[test]
fn test_format_options_hides_token() {
    let config = Config::parse(
        r#"
[gitlab]
url = "https://gitlab.example.com"
token = "glpat-secret"

[main_project]
path = "/srv/mp"

[filters]
include_groups = ["a", "b"]
"#,
    )
    .unwrap();

    let options = config.format_options();
    assert!(options.iter().all(|line| !line.contains("glpat-secret")));

    insta::assert_snapshot!(options.join("\n"), @r"
    fill.max_concurrency      = 0
    filters.exclude_groups    =
    filters.exclude_languages =
    filters.exclude_projects  =
    filters.include_groups    = a,b
    filters.include_languages =
    filters.include_projects  =
    gitlab.clone_protocol     = ssh
    gitlab.token              = [hidden]
    gitlab.url                = https://gitlab.example.com
    global.log_file           =
    global.log_level          = 3
    main_project.path         = /srv/mp
    ");
}
