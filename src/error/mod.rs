// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              MpError (16 bytes)
//!                     |
//!   +--------+--------+--------+--------+
//!   |        |        |        |        |
//!   v        v        v        v        v
//!  Git    Network   Config  Process    Io
//!  Box      Box      Box      Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Git     Gix, CommandFailed, RepoNotFound,
//!           SubmoduleNotFound, MissingCurrentBranch,
//!           UnknownPullBranch, PullFailed
//!   Network Reqwest, HttpError, InvalidUrl
//!   Config  MissingKey, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed
//! ```
//!
//! Operation-aborting failures propagate as `anyhow` chains built from these
//! types; per-item failures are caught at the item boundary and logged.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MpError`].
pub type MpResult<T> = std::result::Result<T, MpError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum MpError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// GitLab API request failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Generates `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MpError {
                fn from(err: $error) -> Self {
                    MpError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    NetworkError => Network,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD or another reference.
    #[error("failed to find reference: {0}")]
    Reference(#[from] gix::reference::find::existing::Error),

    /// Failed to read a git config file (`.gitmodules`, `.git/config`).
    #[error("failed to read config file '{path}': {message}")]
    ConfigFile { path: String, message: String },
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Submodule is still missing from `.gitmodules` after `submodule add`.
    #[error("submodule not found: {path}")]
    SubmoduleNotFound { path: String },

    /// The submodule worktree has no checked-out branch (detached or unborn HEAD).
    #[error("missing current branch in {path}")]
    MissingCurrentBranch { path: String },

    /// Neither a tracking branch nor `origin/HEAD` is available.
    #[error(
        "cannot determine branch to pull in {path}; fix the remote HEAD reference with \
         'git symbolic-ref refs/remotes/origin/HEAD refs/remotes/origin/<default-branch>'"
    )]
    UnknownPullBranch { path: String },

    /// Pull from the remote failed.
    #[error("failed to pull {branch} in {path}: {message}")]
    PullFailed {
        path: String,
        branch: String,
        message: String,
    },
}

// --- Network Errors ---

/// GitLab API errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Non-success HTTP status. `body` is the response text, possibly empty.
    #[error("http error {status}: {url}: {body}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
