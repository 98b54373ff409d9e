// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Fill | Pull | List | Options | Version
//! ```

use std::process::ExitCode;

use mpcreator::cli::{self, Cli, Command};
use mpcreator::cmd::fill::run_fill_command;
use mpcreator::cmd::list::run_list_command;
use mpcreator::cmd::options::run_options_command;
use mpcreator::cmd::pull::run_pull_command;
use mpcreator::cmd::{config_loader, load_config};
use mpcreator::config::Config;
use mpcreator::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    if matches!(command, Command::Version) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_file_level(config.global.log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(
    cli: &Cli,
    command: &Command,
    config: &Config,
) -> mpcreator::error::Result<()> {
    match command {
        Command::Fill(_) => run_fill_command(config).await,
        Command::Pull(_) => run_pull_command(config),
        Command::List(_) => run_list_command(config).await,
        Command::Options => {
            run_options_command(config, &config_loader(cli).format_loaded_files());
            Ok(())
        }
        Command::Version => Ok(()),
    }
}
