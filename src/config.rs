//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::layout::LayoutOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "MTLSHEET_CONFIG_DIR";

/// Characters Excel does not allow in sheet names.
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Input file discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// File extension of material files, without the dot (matched case-insensitively)
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "mtl".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

/// Workbook output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Name of the worksheet
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Workbook file name used when no output path is given
    #[serde(default = "default_file_name")]
    pub file_name: PathBuf,
}

fn default_sheet_name() -> String {
    "Materials".to_string()
}

fn default_file_name() -> PathBuf {
    PathBuf::from("materials.xlsx")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            file_name: default_file_name(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/MtlSheet/config.toml`
/// - macOS: `~/Library/Application Support/MtlSheet/config.toml`
/// - Windows: `%APPDATA%\MtlSheet\config.toml`
///
/// The directory can be overridden with the `MTLSHEET_CONFIG_DIR` environment variable.
///
/// # Validation
///
/// - `first_parameter_row` and `first_material_column` must be at least 4
/// - `sheet_name` must be 1-31 characters without `[ ] : * ? / \`
/// - `extension` must be non-empty and must not contain a dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Spreadsheet placement
    #[serde(default)]
    pub layout: LayoutOptions,
    /// Workbook output
    #[serde(default)]
    pub output: OutputConfig,
    /// Input discovery
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Uses `MTLSHEET_CONFIG_DIR` when set, otherwise the platform directory:
    /// - Linux: `~/.config/MtlSheet/`
    /// - macOS: `~/Library/Application Support/MtlSheet/`
    /// - Windows: `%APPDATA%\MtlSheet\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("MtlSheet");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;

        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;

        let sheet_name = &self.output.sheet_name;
        if sheet_name.is_empty() {
            anyhow::bail!("Sheet name cannot be empty");
        }

        if sheet_name.chars().count() > 31 {
            anyhow::bail!(
                "Sheet name '{sheet_name}' exceeds maximum length of 31 characters (got {})",
                sheet_name.chars().count()
            );
        }

        if let Some(c) = sheet_name.chars().find(|c| INVALID_SHEET_CHARS.contains(c)) {
            anyhow::bail!("Sheet name '{sheet_name}' contains invalid character '{c}'");
        }

        if self.output.file_name.as_os_str().is_empty() {
            anyhow::bail!("Output file name cannot be empty");
        }

        let extension = &self.input.extension;
        if extension.is_empty() || extension.contains('.') {
            anyhow::bail!("Input extension '{extension}' must be non-empty and without a dot");
        }

        Ok(())
    }
}
