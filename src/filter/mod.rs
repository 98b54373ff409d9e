// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Include/exclude filter evaluation.
//!
//! ```text
//! group    "/" + full_path + "/" contains "/name/"   (segment match)
//! project  path == name                              (exact)
//! language languages.contains(name)                  (exact, fetched lazily)
//! submodule "group/project" split on '/'             (exact per segment)
//!
//! empty include  => pass
//! any exclude    => reject (wins over include)
//! ```

#[cfg(test)]
mod tests;

use anyhow::Context;

use crate::config::FiltersConfig;
use crate::error::Result;
use crate::gitlab::{Group, Languages, Project, ProjectDirectory};

/// Generic include/exclude rule over a match predicate.
fn include_exclude<F>(include: &[String], exclude: &[String], matches: F) -> bool
where
    F: Fn(&str) -> bool,
{
    let included = include.is_empty() || include.iter().any(|name| matches(name));
    included && !exclude.iter().any(|name| matches(name))
}

/// Whether `group` passes the group lists.
///
/// A name matches when it equals any segment of the group's full path.
#[must_use]
pub fn group_passes(group: &Group, include: &[String], exclude: &[String]) -> bool {
    let formatted = format!("/{}/", group.normalized_path());
    include_exclude(include, exclude, |name| {
        formatted.contains(&format!("/{name}/"))
    })
}

/// Whether a project short path passes the project lists (exact match).
#[must_use]
pub fn project_name_passes(path: &str, include: &[String], exclude: &[String]) -> bool {
    include_exclude(include, exclude, |name| name == path)
}

/// Whether a fetched language set passes the language lists.
#[must_use]
pub fn languages_pass(languages: &Languages, include: &[String], exclude: &[String]) -> bool {
    include_exclude(include, exclude, |name| languages.contains(name))
}

/// Whether language lists are configured, i.e. a language fetch is needed.
#[must_use]
pub fn needs_languages(filters: &FiltersConfig) -> bool {
    !filters.include_languages.is_empty() || !filters.exclude_languages.is_empty()
}

/// Whether `project` passes the project and language lists.
///
/// Languages are fetched from `directory` only when a language list is set
/// and the name lists already passed.
///
/// # Errors
///
/// Returns an error if the language fetch fails.
pub async fn project_passes<D: ProjectDirectory>(
    directory: &D,
    project: &Project,
    filters: &FiltersConfig,
) -> Result<bool> {
    if !project_name_passes(
        &project.path,
        &filters.include_projects,
        &filters.exclude_projects,
    ) {
        return Ok(false);
    }

    if !needs_languages(filters) {
        return Ok(true);
    }

    let languages = directory
        .project_languages(project.id)
        .await
        .with_context(|| format!("failed to get languages of project {}", project.id))?;

    Ok(languages_pass(
        &languages,
        &filters.include_languages,
        &filters.exclude_languages,
    ))
}

/// Splits a submodule name `group/project[/...]` into its first two segments.
///
/// A missing segment is returned as `""`.
#[must_use]
pub fn split_submodule_name(name: &str) -> (&str, &str) {
    let mut segments = name.split('/');
    let group = segments.next().unwrap_or_default();
    let project = segments.next().unwrap_or_default();
    (group, project)
}

/// Whether a recorded submodule name passes the group and project lists.
///
/// Both segments are compared by exact membership; language lists do not
/// apply to local submodules.
#[must_use]
pub fn submodule_passes(name: &str, filters: &FiltersConfig) -> bool {
    let (group, project) = split_submodule_name(name);
    include_exclude(&filters.include_groups, &filters.exclude_groups, |n| {
        n == group
    }) && project_name_passes(
        project,
        &filters.include_projects,
        &filters.exclude_projects,
    )
}
