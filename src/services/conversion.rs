//! End-to-end conversion of material files into a workbook.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::grid::{MemoryGrid, XlsxWriter};
use crate::layout::{LayoutEngine, LayoutOptions};
use crate::services::MaterialService;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Spreadsheet placement
    pub layout: LayoutOptions,
    /// Worksheet name
    pub sheet_name: String,
    /// Skip files that fail to load instead of aborting the run
    pub keep_going: bool,
}

impl ConversionOptions {
    /// Builds options from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            layout: config.layout,
            sheet_name: config.output.sheet_name.clone(),
            keep_going: false,
        }
    }
}

/// A file left out of the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// The file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Workbook that was written
    pub output: PathBuf,
    /// Files stored in the workbook
    pub materials: usize,
    /// Distinct parameter names (rows)
    pub parameters: usize,
    /// Files that failed to load (only with `keep_going`)
    pub skipped: Vec<SkippedFile>,
}

/// Service running a whole conversion: load, lay out, persist.
pub struct ConversionService;

impl ConversionService {
    /// Converts every material file in `dir` into a workbook at `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, contains no material
    /// files, or if [`convert_files`](Self::convert_files) fails.
    pub fn convert_directory(
        dir: &Path,
        extension: &str,
        output: &Path,
        options: &ConversionOptions,
    ) -> Result<ConversionReport> {
        let files = MaterialService::discover(dir, extension)?;

        if files.is_empty() {
            anyhow::bail!(
                "No .{extension} files found in {}",
                dir.display()
            );
        }

        info!(count = files.len(), dir = %dir.display(), "found material files");
        Self::convert_files(&files, output, options)
    }

    /// Converts the given files, in order, into a workbook at `output`.
    ///
    /// # Errors
    ///
    /// Returns errors for:
    /// - A file that cannot be read or has an invalid numeric default (unless `keep_going`)
    /// - Invalid layout options
    /// - Workbook write failures
    pub fn convert_files(
        files: &[PathBuf],
        output: &Path,
        options: &ConversionOptions,
    ) -> Result<ConversionReport> {
        let mut engine = LayoutEngine::new(MemoryGrid::new(), options.layout)?;
        let mut skipped = Vec::new();

        for path in files {
            match MaterialService::load(path) {
                Ok(material) => engine.store_record(&material),
                Err(err) if options.keep_going => {
                    warn!(path = %path.display(), error = %format!("{err:#}"), "skipping material file");
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: format!("{err:#}"),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let materials = engine.materials_stored();
        let parameters = engine.index().len();
        let grid = engine.finish();

        XlsxWriter::new(&grid, options.sheet_name.as_str())
            .save(output)
            .with_context(|| format!("Failed to save workbook: {}", output.display()))?;

        info!(
            output = %output.display(),
            materials,
            parameters,
            skipped = skipped.len(),
            "wrote workbook"
        );

        Ok(ConversionReport {
            output: output.to_path_buf(),
            materials,
            parameters,
            skipped,
        })
    }
}
