// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options command for mpcreator.

use crate::config::Config;

/// Display the effective configuration, then the files it was read from.
pub fn run_options_command(config: &Config, config_files: &[String]) {
    for line in config.format_options() {
        println!("{line}");
    }

    println!();
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        println!("Configuration files:");
        for line in config_files {
            println!("  {line}");
        }
    }
}
