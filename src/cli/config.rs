//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use std::path::Path;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file location
    Path,
    /// Write a configuration file with default values
    Init(ConfigInitArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a configuration file with default values
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => execute_path(),
            ConfigCommand::Init(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(None)?;

        if self.json {
            print_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        let path = config_file_path()?;

        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Configuration file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        Config::new()
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("✓ Wrote default configuration to: {}", path.display());
        Ok(())
    }
}

fn execute_path() -> CliResult<()> {
    println!("{}", config_file_path()?.display());
    Ok(())
}

fn config_file_path() -> CliResult<std::path::PathBuf> {
    Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to resolve config path: {e:#}")))
}

/// Loads configuration from an explicit file or the default location.
///
/// An explicit file must exist. The default location falls back to built-in
/// defaults when no file has been written yet.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::validation(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            Config::load_from(path)
        }
        None => Config::load(),
    }
    .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("{APP_NAME} Configuration");
    println!("======================");
    println!();

    println!("Layout:");
    println!("  First Parameter Row: {}", config.layout.first_parameter_row);
    println!(
        "  First Material Column: {}",
        config.layout.first_material_column
    );
    println!();

    println!("Output:");
    println!("  Sheet Name: {}", config.output.sheet_name);
    println!("  File Name: {}", config.output.file_name.display());
    println!();

    println!("Input:");
    println!("  Extension: {}", config.input.extension);
    println!();
}
