// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    group_passes, languages_pass, project_name_passes, project_passes, split_submodule_name,
    submodule_passes,
};
use crate::config::FiltersConfig;
use crate::error::Result;
use crate::gitlab::{Group, Languages, Project, ProjectDirectory};

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn group(full_path: &str) -> Group {
    Group {
        id: 1,
        full_path: full_path.to_string(),
    }
}

fn project(path: &str) -> Project {
    Project {
        id: 10,
        path: path.to_string(),
        path_with_namespace: format!("team/app/{path}"),
        ssh_url_to_repo: String::new(),
        http_url_to_repo: String::new(),
    }
}

/// Directory that only answers language requests.
struct LanguageDirectory {
    languages: Option<Languages>,
    calls: AtomicUsize,
}

impl LanguageDirectory {
    fn new(languages: &[&str]) -> Self {
        let map: BTreeMap<String, f64> = languages.iter().map(|l| ((*l).to_string(), 50.0)).collect();
        Self {
            languages: Some(Languages(map)),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            languages: None,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ProjectDirectory for LanguageDirectory {
    async fn list_groups(&self, _: u32, _: u32, _: Option<&str>) -> Result<Vec<Group>> {
        Ok(Vec::new())
    }

    async fn list_group_projects(&self, _: u64, _: u32, _: u32) -> Result<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn project_languages(&self, _: u64) -> Result<Languages> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages
            .clone()
            .ok_or_else(|| anyhow::anyhow!("languages endpoint unavailable"))
    }
}

#[test]
fn test_group_segment_match() {
    let include = names(&["etp"]);
    assert!(group_passes(&group("a/etp/b"), &include, &[]));
    assert!(group_passes(&group("etp"), &include, &[]));
    assert!(group_passes(&group("a/etp"), &include, &[]));
    assert!(!group_passes(&group("a/etpx/b"), &include, &[]));
    assert!(!group_passes(&group("a/xetp"), &include, &[]));
}

#[test]
fn test_group_display_separators_are_collapsed() {
    assert!(group_passes(&group("a / etp / b"), &names(&["etp"]), &[]));
}

#[test]
fn test_group_empty_include_passes_everything() {
    assert!(group_passes(&group("anything/at/all"), &[], &[]));
}

#[test]
fn test_group_exclusion_wins() {
    let include = names(&["team"]);
    let exclude = names(&["legacy"]);
    assert!(group_passes(&group("team/app"), &include, &exclude));
    assert!(!group_passes(&group("team/legacy"), &include, &exclude));
    assert!(!group_passes(&group("team"), &include, &names(&["team"])));
}

#[test]
fn test_project_name_exact_match() {
    let include = names(&["svc1"]);
    assert!(project_name_passes("svc1", &include, &[]));
    assert!(!project_name_passes("svc10", &include, &[]));
    assert!(!project_name_passes("team/svc1", &include, &[]));
    assert!(project_name_passes("svc2", &[], &[]));
    assert!(!project_name_passes("svc1", &include, &include));
}

#[test]
fn test_languages_pass() {
    let languages = Languages(BTreeMap::from([
        ("Go".to_string(), 80.0),
        ("Shell".to_string(), 20.0),
    ]));
    assert!(languages_pass(&languages, &names(&["Rust", "Go"]), &[]));
    assert!(!languages_pass(&languages, &names(&["Rust"]), &[]));
    assert!(!languages_pass(&languages, &[], &names(&["Shell"])));
    assert!(!languages_pass(&languages, &names(&["Go"]), &names(&["Shell"])));
    assert!(!languages_pass(&languages, &names(&["go"]), &[]), "case-sensitive");
}

#[tokio::test]
async fn test_project_passes_skips_language_fetch_without_language_lists() {
    let directory = LanguageDirectory::new(&["Go"]);
    let filters = FiltersConfig {
        include_projects: names(&["svc1"]),
        ..FiltersConfig::default()
    };

    assert!(project_passes(&directory, &project("svc1"), &filters).await.unwrap());
    assert!(!project_passes(&directory, &project("svc2"), &filters).await.unwrap());
    assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_project_passes_fetches_languages_when_needed() {
    let directory = LanguageDirectory::new(&["Go"]);
    let filters = FiltersConfig {
        exclude_languages: names(&["Go"]),
        ..FiltersConfig::default()
    };

    assert!(!project_passes(&directory, &project("svc1"), &filters).await.unwrap());
    assert_eq!(directory.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_project_passes_propagates_language_errors() {
    let directory = LanguageDirectory::failing();
    let filters = FiltersConfig {
        include_languages: names(&["Go"]),
        ..FiltersConfig::default()
    };

    let err = project_passes(&directory, &project("svc1"), &filters)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("languages endpoint unavailable"));
}

#[test]
fn test_split_submodule_name() {
    assert_eq!(split_submodule_name("team/svc1"), ("team", "svc1"));
    assert_eq!(split_submodule_name("team/app/svc1"), ("team", "app"));
    assert_eq!(split_submodule_name("standalone"), ("standalone", ""));
}

#[test]
fn test_submodule_passes_exact_segments() {
    let filters = FiltersConfig {
        include_groups: names(&["team"]),
        exclude_projects: names(&["legacy"]),
        ..FiltersConfig::default()
    };
    assert!(submodule_passes("team/svc1", &filters));
    assert!(!submodule_passes("team/legacy", &filters));
    assert!(!submodule_passes("other/svc1", &filters));
    assert!(!submodule_passes("teams/svc1", &filters));
}
