// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mpcreator using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mpcreator [global options] <command>
//! fill | mpfill  -p DIR -u URL -t TOKEN [name filters] [--inlang/--exlang]
//! pull           -p DIR [name filters]
//! list           -u URL -t TOKEN [name filters] [--inlang/--exlang]
//! options
//! version
//! ```

pub mod filters;
pub mod global;


use crate::cli::filters::{LanguageFilterArgs, NameFilterArgs, RemoteArgs};
use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// GitLab main-project builder.
///
/// Adds GitLab projects as submodules of one aggregate repository and keeps
/// them up to date.
#[derive(Debug, Parser)]
#[command(
    name = "mpcreator",
    author,
    version,
    about = "GitLab main-project builder",
    long_about = "mpcreator Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Walks the groups and projects of a GitLab instance and adds every\n\
                  selected project as a git submodule of a main project. `pull`\n\
                  then fast-forwards the submodules whose checked-out branch is the\n\
                  one they should follow.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `mpcreator.toml` in the current directory,\n\
                  then from the file given with --config, then from MPCREATOR_*\n\
                  environment variables (e.g. MPCREATOR_GITLAB__TOKEN). Command-line\n\
                  flags override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Adds every selected GitLab project as a submodule of the main project.
    #[command(visible_alias = "mpfill")]
    Fill(FillArgs),

    /// Pulls the submodules of the main project.
    Pull(PullArgs),

    /// Prints the projects `fill` would add, without touching the main project.
    List(ListArgs),

    /// Lists all options and their effective values.
    Options,

    /// Shows the version.
    Version,
}

/// Arguments for the `fill` command.
#[derive(Debug, Clone, Args)]
pub struct FillArgs {
    /// Path of the main project (created when missing).
    #[arg(short = 'p', long = "mppath", value_name = "DIR")]
    pub mppath: Option<PathBuf>,

    #[command(flatten)]
    pub remote: RemoteArgs,

    #[command(flatten)]
    pub names: NameFilterArgs,

    #[command(flatten)]
    pub languages: LanguageFilterArgs,

    /// Maximum number of concurrent submodule tasks per group (0 = unbounded).
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,
}

/// Arguments for the `pull` command.
#[derive(Debug, Clone, Args)]
pub struct PullArgs {
    /// Path of the main project (must exist).
    #[arg(short = 'p', long = "mppath", value_name = "DIR")]
    pub mppath: Option<PathBuf>,

    /// Accepted for symmetry with `fill`; pull never contacts GitLab.
    #[command(flatten)]
    pub remote: RemoteArgs,

    #[command(flatten)]
    pub names: NameFilterArgs,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    #[command(flatten)]
    pub names: NameFilterArgs,

    #[command(flatten)]
    pub languages: LanguageFilterArgs,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
