//! Config command handler
//!
//! Reads and edits the persisted `schemagram` configuration. Mutating
//! subcommands save the file immediately; `reset` asks for confirmation
//! before deleting it.

use crate::args::ConfigSubcommand;
use schemagram::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => show_all(config),
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_one(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            if let Err(e) = config.set(&key, &value) {
                fail(&e);
            }
            persist(config);
            println!("✓ Set {key} = {value}");
        }
        Some(ConfigSubcommand::Unset { key }) => {
            if let Err(e) = config.unset(&key, defaults) {
                fail(&e);
            }
            persist(config);
            println!("✓ Reset {key} to default");
        }
        Some(ConfigSubcommand::Reset) => reset_all(),
    }
}

/// Print every configuration value with the backing file path
fn show_all(config: &Config) {
    println!("# {}", Config::get_config_file_path().display());
    print!("{config}");
}

/// Print a single configuration value
fn show_one(config: &Config, key: &str) {
    match config.get(key) {
        Some(value) => println!("{value}"),
        None => fail(&format!("Unknown config key: '{key}'")),
    }
}

/// Save the config file, exiting with a failure status if it cannot be written
fn persist(config: &Config) {
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
}

/// Delete the config file after confirmation, restoring defaults on next run
fn reset_all() {
    let config_file = Config::get_config_file_path();
    if !config_file.exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!(
        "Reset schemagram config to defaults? This removes {} (y/n): ",
        config_file.display()
    );
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            fail(&format!("Failed to remove config file: {e}"));
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("Reset cancelled");
    }
}

/// Report an error and exit with a failure status
fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}
