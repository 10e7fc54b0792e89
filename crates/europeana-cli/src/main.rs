//! Europeana CLI - Command-line interface for the Europeana Entity and Search APIs.

use clap::Parser;
use europeana_cli::commands;
use europeana_cli::{Cli, Command, Config, Formatter};
use europeana_sdk::EntityClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> europeana_cli::Result<String> {
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };

    // Profile commands write the file back, so a broken file is an error for them
    let mut config = match cli.command {
        Command::Profile(_) => Config::load_from(&config_path)?,
        _ => Config::load_or_default(&config_path),
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter =
        Formatter::new(format, color_enabled).with_max_cell_width(config.settings.max_cell_width);

    if let Command::Profile(args) = cli.command {
        return commands::execute_profile(args, &mut config, &config_path, &formatter);
    }

    // Commands that call the API
    let client = EntityClient::new(config.client_config(cli.api_key)?)?;

    match cli.command {
        Command::Suggest(args) => commands::execute_suggest(args, &client, &formatter),
        Command::Retrieve(args) => commands::execute_retrieve(args, &client, &formatter),
        Command::Resolve(args) => commands::execute_resolve(args, &client, &formatter),
        Command::Search(args) => commands::execute_search(args, &client, &formatter),
        Command::Agents(args) => commands::execute_agents(args, &client, &formatter),
        Command::Profile(_) => unreachable!(),
    }
}
