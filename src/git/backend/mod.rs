// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, MpResult, ProcessError};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::trace;

/// A submodule entry as recorded in `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    /// Logical name (`submodule.<name>.*`), conventionally `group/project`.
    pub name: String,
    /// Worktree path relative to the superproject root.
    pub path: String,
    pub url: String,
    /// Tracking branch (`submodule.<name>.branch`), if configured.
    pub branch: Option<String>,
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if `path` itself is the root of a repository (no upward discovery).
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
    fn current_branch(path: &Path) -> MpResult<Option<String>>;

    /// Branch that `refs/remotes/<remote>/HEAD` points at, without the remote prefix.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or the reference
    /// store is unreadable. A missing reference is `Ok(None)`.
    fn remote_default_branch(path: &Path, remote: &str) -> MpResult<Option<String>>;

    /// Commit id HEAD points at (None for an unborn branch).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
    fn head_id(path: &Path) -> MpResult<Option<String>>;

    /// Submodules declared in the superproject's `.gitmodules`.
    ///
    /// `branch` is taken from the local `.git/config` when set there, else
    /// from `.gitmodules`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository or a config file cannot be read.
    fn submodules(repo_path: &Path) -> MpResult<Vec<Submodule>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository in an existing directory.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(path: &Path) -> MpResult<()>;

    /// Clone `url` into `dest`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone operation fails or the destination path is invalid.
    fn clone(url: &str, dest: &Path) -> MpResult<()>;

    /// `git submodule add <url> <path>`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the submodule cannot be added.
    fn add_submodule(repo_path: &Path, url: &str, submodule_path: &str) -> MpResult<()>;

    /// Move a submodule's embedded `.git` directory into the superproject.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the command fails.
    fn absorb_git_dirs(repo_path: &Path, submodule_path: &str) -> MpResult<()>;

    /// `git submodule init`, a no-op for an initialized submodule.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the command fails.
    fn init_submodule(repo_path: &Path, submodule_path: &str) -> MpResult<()>;

    /// Fast-forward `branch` from `remote`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the pull operation fails.
    fn pull(repo_path: &Path, remote: &str, branch: &str) -> MpResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides efficient read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GixBackend {
    fn open(path: &Path) -> MpResult<gix::Repository> {
        gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))).into())
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::open(path).is_ok()
    }

    fn current_branch(path: &Path) -> MpResult<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Reference(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn remote_default_branch(path: &Path, remote: &str) -> MpResult<Option<String>> {
        let repo = Self::open(path)?;
        let name = format!("refs/remotes/{remote}/HEAD");

        let reference = match repo.find_reference(name.as_str()) {
            Ok(reference) => reference,
            Err(gix::reference::find::existing::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(GitError::Gix(GixError::Reference(e)).into()),
        };

        let prefix = format!("refs/remotes/{remote}/");
        Ok(match reference.target() {
            gix::refs::TargetRef::Symbolic(target) => target
                .as_bstr()
                .to_string()
                .strip_prefix(&prefix)
                .map(ToString::to_string),
            gix::refs::TargetRef::Object(_) => None,
        })
    }

    fn head_id(path: &Path) -> MpResult<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo
            .head()
            .map_err(|e| GitError::Gix(GixError::Reference(e)))?;
        Ok(head.id().map(|id| id.to_string()))
    }

    fn submodules(repo_path: &Path) -> MpResult<Vec<Submodule>> {
        let repo = Self::open(repo_path)?;
        let Some(workdir) = repo.workdir() else {
            return Ok(Vec::new());
        };

        let gitmodules = workdir.join(".gitmodules");
        let Some(declared) = read_config_file(&gitmodules)? else {
            return Ok(Vec::new());
        };
        let local = read_config_file(&repo.git_dir().join("config"))?;

        let Some(sections) = declared.sections_by_name("submodule") else {
            return Ok(Vec::new());
        };

        let submodules = sections
            .filter_map(|section| {
                let name = section.header().subsection_name()?.to_string();
                let path = section.value("path")?.to_string();
                let url = section
                    .value("url")
                    .map(|u| u.to_string())
                    .unwrap_or_default();
                let branch = local
                    .as_ref()
                    .and_then(|file| subsection_value(file, "submodule", &name, "branch"))
                    .or_else(|| section.value("branch").map(|b| b.to_string()))
                    .filter(|b| !b.is_empty());
                Some(Submodule {
                    name,
                    path,
                    url,
                    branch,
                })
            })
            .collect();

        Ok(submodules)
    }
}

fn read_config_file(path: &Path) -> MpResult<Option<gix::config::File<'static>>> {
    if !path.is_file() {
        return Ok(None);
    }
    gix::config::File::from_path_no_includes(path.to_path_buf(), gix::config::Source::Local)
        .map(Some)
        .map_err(|e| {
            GitError::Gix(GixError::ConfigFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })
            .into()
        })
}

fn subsection_value(
    file: &gix::config::File<'_>,
    section: &str,
    subsection: &str,
    key: &str,
) -> Option<String> {
    file.sections_by_name(section)?
        .filter(|s| {
            s.header()
                .subsection_name()
                .is_some_and(|sub| sub == subsection)
        })
        .find_map(|s| s.value(key).map(|v| v.to_string()))
}

// --- ShellBackend Implementation (Git CLI) ---

/// Resolve the `git` executable once via `PATH`.
///
/// # Errors
///
/// Returns `ProcessError::ExecutableNotFound` if `git` is not on `PATH`.
pub fn git_executable() -> MpResult<&'static Path> {
    static GIT: OnceLock<Option<PathBuf>> = OnceLock::new();
    GIT.get_or_init(|| which::which("git").ok())
        .as_deref()
        .ok_or_else(|| {
            ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            }
            .into()
        })
}

/// Shell-based git backend using git CLI.
///
/// Used for every write: submodule porcelain performs checkouts and
/// gitdir moves that gix does not provide.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command.
    ///
    /// Sets `GCM_INTERACTIVE=never`, `GIT_TERMINAL_PROMPT=0` and `LC_ALL=C` so
    /// no credential prompt blocks a worker and messages stay parseable.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> MpResult<String> {
        use std::process::Command;

        let command = format!("git {}", args.join(" "));
        trace!(%command, cwd = %cwd.display(), "running git");

        let output = Command::new(git_executable()?)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(path: &Path) -> MpResult<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }

    fn clone(url: &str, dest: &Path) -> MpResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CommandFailed {
            command: "git clone".to_string(),
            message: format!("invalid destination path {}", dest.display()),
        })?;

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        Self::git_command(
            &[
                "-c",
                "advice.detachedHead=false",
                "clone",
                "--quiet",
                url,
                dest_str,
            ],
            parent,
        )?;
        Ok(())
    }

    fn add_submodule(repo_path: &Path, url: &str, submodule_path: &str) -> MpResult<()> {
        Self::git_command(
            &["submodule", "add", "--quiet", url, submodule_path],
            repo_path,
        )?;
        Ok(())
    }

    fn absorb_git_dirs(repo_path: &Path, submodule_path: &str) -> MpResult<()> {
        Self::git_command(
            &["submodule", "absorbgitdirs", "--", submodule_path],
            repo_path,
        )?;
        Ok(())
    }

    fn init_submodule(repo_path: &Path, submodule_path: &str) -> MpResult<()> {
        Self::git_command(
            &["submodule", "init", "--quiet", "--", submodule_path],
            repo_path,
        )?;
        Ok(())
    }

    fn pull(repo_path: &Path, remote: &str, branch: &str) -> MpResult<()> {
        Self::git_command(&["pull", "--ff-only", "--quiet", remote, branch], repo_path)?;
        Ok(())
    }
}
