// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DEFAULT_PAGE_SIZE, Traversal};
use crate::config::FiltersConfig;
use crate::error::Result;
use crate::gitlab::{Group, Languages, Project, ProjectDirectory};
use crate::logging::LogContext;

/// In-memory directory that pages like the GitLab API and records requests.
#[derive(Default)]
struct FakeDirectory {
    groups: Vec<Group>,
    projects: HashMap<u64, Vec<Project>>,
    group_requests: Mutex<Vec<(u32, Option<String>)>>,
    project_requests: AtomicUsize,
    language_requests: AtomicUsize,
}

impl FakeDirectory {
    fn with_groups(paths: &[&str]) -> Self {
        let groups = paths
            .iter()
            .zip(1..)
            .map(|(path, id)| Group {
                id,
                full_path: (*path).to_string(),
            })
            .collect();
        Self {
            groups,
            ..Self::default()
        }
    }

    fn with_group_count(count: u64) -> Self {
        let groups = (1..=count)
            .map(|id| Group {
                id,
                full_path: format!("group{id}"),
            })
            .collect();
        Self {
            groups,
            ..Self::default()
        }
    }

    fn add_projects(&mut self, group_id: u64, paths: &[&str]) {
        let group = self
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.full_path.clone())
            .unwrap_or_default();
        let projects = paths
            .iter()
            .zip(1..)
            .map(|(path, n)| Project {
                id: group_id * 1000 + n,
                path: (*path).to_string(),
                path_with_namespace: format!("{group}/{path}"),
                ssh_url_to_repo: format!("git@example.com:{group}/{path}.git"),
                http_url_to_repo: format!("https://example.com/{group}/{path}.git"),
            })
            .collect();
        self.projects.insert(group_id, projects);
    }

    fn group_request_count(&self) -> usize {
        self.group_requests.lock().unwrap().len()
    }
}

fn page<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    let start = ((page - 1) * per_page) as usize;
    items
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect()
}

impl ProjectDirectory for FakeDirectory {
    async fn list_groups(
        &self,
        page_no: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Vec<Group>> {
        self.group_requests
            .lock()
            .unwrap()
            .push((page_no, search.map(ToString::to_string)));
        Ok(page(&self.groups, page_no, per_page))
    }

    async fn list_group_projects(
        &self,
        group_id: u64,
        page_no: u32,
        per_page: u32,
    ) -> Result<Vec<Project>> {
        self.project_requests.fetch_add(1, Ordering::SeqCst);
        let projects = self.projects.get(&group_id).cloned().unwrap_or_default();
        Ok(page(&projects, page_no, per_page))
    }

    async fn project_languages(&self, _: u64) -> Result<Languages> {
        self.language_requests.fetch_add(1, Ordering::SeqCst);
        Ok(Languages::default())
    }
}

async fn visit_all(directory: &FakeDirectory, include: &[String]) -> Vec<String> {
    let traversal = Traversal::new(directory, LogContext::default());
    let mut visited = Vec::new();
    traversal
        .for_each_group(include, &[], async |group: &Group| -> Result<()> {
            visited.push(group.full_path.clone());
            Ok(())
        })
        .await
        .unwrap();
    visited
}

#[tokio::test]
async fn test_pagination_partial_last_page() {
    let directory = FakeDirectory::with_group_count(250);
    let visited = visit_all(&directory, &[]).await;
    assert_eq!(visited.len(), 250);
    assert_eq!(directory.group_request_count(), 3);
}

#[tokio::test]
async fn test_pagination_exact_multiple_requests_one_extra_page() {
    let directory = FakeDirectory::with_group_count(200);
    let visited = visit_all(&directory, &[]).await;
    assert_eq!(visited.len(), 200);
    assert_eq!(directory.group_request_count(), 3);
}

#[tokio::test]
async fn test_pagination_empty_directory() {
    let directory = FakeDirectory::default();
    assert!(visit_all(&directory, &[]).await.is_empty());
    assert_eq!(directory.group_request_count(), 1);
}

#[tokio::test]
async fn test_custom_page_size() {
    let directory = FakeDirectory::with_group_count(7);
    let traversal = Traversal::new(&directory, LogContext::default()).with_page_size(3);
    assert_eq!(traversal.page_size(), 3);

    let mut count = 0;
    traversal
        .for_each_group(&[], &[], async |_: &Group| -> Result<()> {
            count += 1;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(count, 7);
    assert_eq!(directory.group_request_count(), 3);
}

#[tokio::test]
async fn test_search_hint_only_for_single_include() {
    let directory = FakeDirectory::with_groups(&["team/app", "team/lib", "other"]);

    let visited = visit_all(&directory, &["team".to_string()]).await;
    assert_eq!(visited, vec!["team/app", "team/lib"]);

    visit_all(&directory, &["team".to_string(), "other".to_string()]).await;

    let requests = directory.group_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![(1, Some("team".to_string())), (1, None)],
        "the hint is sent only when exactly one group is included"
    );
}

#[tokio::test]
async fn test_groups_visited_in_server_order() {
    let directory = FakeDirectory::with_groups(&["zeta", "alpha", "mid"]);
    assert_eq!(visit_all(&directory, &[]).await, vec!["zeta", "alpha", "mid"]);
    assert_eq!(DEFAULT_PAGE_SIZE, 100);
}

#[tokio::test]
async fn test_visitor_error_aborts_traversal() {
    let directory = FakeDirectory::with_group_count(150);
    let traversal = Traversal::new(&directory, LogContext::default());

    let mut seen = 0;
    let err = traversal
        .for_each_group(&[], &[], async |group: &Group| -> Result<()> {
            seen += 1;
            if group.id == 2 {
                anyhow::bail!("boom");
            }
            Ok(())
        })
        .await
        .unwrap_err();

    assert_eq!(seen, 2);
    assert_eq!(directory.group_request_count(), 1);
    assert_eq!(format!("{err:#}"), "failed to process group group2: boom");
}

#[tokio::test]
async fn test_project_filter_within_group() {
    let mut directory = FakeDirectory::with_groups(&["team/app", "team/lib"]);
    directory.add_projects(1, &["svc1", "svc2"]);
    directory.add_projects(2, &["shared"]);

    let filters = FiltersConfig {
        include_groups: vec!["team".to_string()],
        include_projects: vec!["svc1".to_string()],
        ..FiltersConfig::default()
    };

    let traversal = Traversal::new(&directory, LogContext::default());
    let mut selected = Vec::new();
    traversal
        .for_each_group(
            &filters.include_groups,
            &filters.exclude_groups,
            async |group: &Group| -> Result<()> {
                traversal
                    .for_each_group_project(group, &filters, |project| {
                        selected.push(project.path_with_namespace.clone());
                        Ok(())
                    })
                    .await
            },
        )
        .await
        .unwrap();

    assert_eq!(selected, vec!["team/app/svc1"]);
    assert_eq!(directory.project_requests.load(Ordering::SeqCst), 2);
    assert_eq!(directory.language_requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_language_lists_trigger_lookup_per_candidate() {
    let mut directory = FakeDirectory::with_groups(&["team"]);
    directory.add_projects(1, &["svc1", "svc2", "skip"]);

    let filters = FiltersConfig {
        exclude_projects: vec!["skip".to_string()],
        exclude_languages: vec!["COBOL".to_string()],
        ..FiltersConfig::default()
    };

    let traversal = Traversal::new(&directory, LogContext::default());
    let group = directory.groups[0].clone();
    let mut count = 0;
    traversal
        .for_each_group_project(&group, &filters, |_| {
            count += 1;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(directory.language_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_collect_projects_pairs_group_and_project() {
    let mut directory = FakeDirectory::with_groups(&["team/app", "team/lib", "archive"]);
    directory.add_projects(1, &["svc1", "svc2"]);
    directory.add_projects(2, &["shared"]);
    directory.add_projects(3, &["old"]);

    let filters = FiltersConfig {
        exclude_groups: vec!["archive".to_string()],
        exclude_projects: vec!["svc2".to_string()],
        ..FiltersConfig::default()
    };
    let selected = Traversal::new(&directory, LogContext::default())
        .collect_projects(&filters)
        .await
        .unwrap();

    let pairs: Vec<_> = selected
        .iter()
        .map(|(group, project)| format!("{group}:{}", project.path))
        .collect();
    assert_eq!(pairs, vec!["team/app:svc1", "team/lib:shared"]);
    assert_eq!(directory.project_requests.load(Ordering::SeqCst), 2);
}
