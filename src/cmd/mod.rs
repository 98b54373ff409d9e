// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! Cli --> config_loader (files, env, CLI overrides) --> Config
//!     --> cmd::run_* handlers
//!           fill, pull, list, options
//! ```

pub mod fill;
pub mod list;
pub mod options;
pub mod pull;


use anyhow::Context;

use crate::cli::{Cli, Command};
use crate::config::loader::ConfigLoader;
use crate::config::{Config, FiltersConfig};
use crate::error::Result;

/// Loader for `cli`: the standard layers plus every flag that maps to a key.
#[must_use]
pub fn config_loader(cli: &Cli) -> ConfigLoader {
    command_overrides(cli)
        .into_iter()
        .fold(Config::layered(cli.global.config.as_deref()), |loader, (key, value)| {
            loader.set(key, value)
        })
}

/// Build the effective configuration for `cli`.
///
/// # Errors
///
/// Returns an error if a configuration file is missing or malformed, or if a
/// value does not deserialize.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = config_loader(cli)
        .build()
        .context("failed to load configuration")?;
    if let Some(command) = &cli.command {
        config.apply_filter_overrides(filter_overrides(command));
    }
    Ok(config)
}

fn command_overrides(cli: &Cli) -> Vec<(&'static str, String)> {
    let mut overrides = cli.global.to_config_overrides();
    match &cli.command {
        Some(Command::Fill(args)) => {
            overrides.extend(args.remote.to_config_overrides());
            if let Some(ref path) = args.mppath {
                overrides.push(("main_project.path", path.display().to_string()));
            }
            if let Some(jobs) = args.jobs {
                overrides.push(("fill.max_concurrency", jobs.to_string()));
            }
        }
        Some(Command::Pull(args)) => {
            overrides.extend(args.remote.to_config_overrides());
            if let Some(ref path) = args.mppath {
                overrides.push(("main_project.path", path.display().to_string()));
            }
        }
        Some(Command::List(args)) => overrides.extend(args.remote.to_config_overrides()),
        Some(Command::Options | Command::Version) | None => {}
    }
    overrides
}

fn filter_overrides(command: &Command) -> FiltersConfig {
    match command {
        Command::Fill(args) => args.names.with_languages(&args.languages),
        Command::List(args) => args.names.with_languages(&args.languages),
        Command::Pull(args) => args.names.to_filters(),
        Command::Options | Command::Version => FiltersConfig::default(),
    }
}
