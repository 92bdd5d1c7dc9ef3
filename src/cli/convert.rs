//! Convert command: a directory of MTL files into one workbook.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::cli::config::load_config;
use crate::config::Config;
use crate::services::{ConversionOptions, ConversionService};
use clap::Args;
use std::path::PathBuf;

/// Convert every material file in a directory into a spreadsheet
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Directory containing the material files
    #[arg(value_name = "DIR")]
    pub input: PathBuf,

    /// Output workbook (defaults to the configured file name inside DIR)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip files that cannot be loaded instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Worksheet name (overrides the configuration)
    #[arg(long, value_name = "NAME")]
    pub sheet_name: Option<String>,

    /// Print the conversion report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        if !self.input.is_dir() {
            return Err(CliError::validation(format!(
                "Input directory not found: {}",
                self.input.display()
            )));
        }

        let config = self.resolve_config()?;
        let output = self.output_path(&config);

        let mut options = ConversionOptions::from_config(&config);
        options.keep_going = self.keep_going;

        let report = ConversionService::convert_directory(
            &self.input,
            &config.input.extension,
            &output,
            &options,
        )
        .map_err(|e| CliError::io(format!("Conversion failed: {e:#}")))?;

        if self.json {
            return print_json(&report);
        }

        println!(
            "✓ Wrote {} materials and {} parameters to: {}",
            report.materials,
            report.parameters,
            report.output.display()
        );

        for skipped in &report.skipped {
            println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
        }

        Ok(())
    }

    /// Loads the configuration and applies command-line overrides.
    fn resolve_config(&self) -> CliResult<Config> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(sheet_name) = &self.sheet_name {
            config.output.sheet_name.clone_from(sheet_name);
            config
                .validate()
                .map_err(|e| CliError::validation(format!("Invalid --sheet-name: {e}")))?;
        }

        Ok(config)
    }

    /// Output path: explicit `--output`, otherwise the configured file name in the input directory.
    fn output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.join(&config.output.file_name))
    }
}
