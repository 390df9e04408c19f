// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `configs` commands.

use crate::config::Config;

/// Prints every effective option, one per line.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Prints the config files that were loaded, in load order.
pub fn run_configs_command(loaded: &[String]) {
    if loaded.is_empty() {
        println!("no config files loaded (built-in defaults)");
        return;
    }
    for line in loaded {
        println!("{line}");
    }
}
