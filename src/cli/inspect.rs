//! Inspect command for showing the parsed content of one material file.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::MaterialRecord;
use crate::parser;
use crate::services::MaterialService;
use clap::Args;
use std::path::PathBuf;

/// Parse a material file and print its identity and parameters
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to the MTL file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long, conflicts_with = "mtl")]
    pub json: bool,

    /// Print the parsed material re-rendered as MTL text
    #[arg(long)]
    pub mtl: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        if !self.file.is_file() {
            return Err(CliError::validation(format!(
                "Material file not found: {}",
                self.file.display()
            )));
        }

        let material = MaterialService::load(&self.file)
            .map_err(|e| CliError::io(format!("Failed to load material: {e:#}")))?;

        if self.json {
            print_json(&material)
        } else if self.mtl {
            print!("{}", parser::render_material(&material));
            Ok(())
        } else {
            print!("{}", format_table(&material));
            Ok(())
        }
    }
}

/// Formats a material as an aligned plain-text table.
fn format_table(material: &MaterialRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("ID:       {}\n", material.material_id));
    out.push_str(&format!("Material: {}\n", material.material_name));
    out.push_str(&format!("Parameters: {}\n", material.parameters.len()));

    if material.parameters.is_empty() {
        return out;
    }

    let rows: Vec<[String; 5]> = material
        .parameters
        .values()
        .map(|p| {
            [
                p.name.clone(),
                p.param_type.to_string(),
                p.default.to_string(),
                p.unit.clone().unwrap_or_default(),
                p.access.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let headers = ["NAME", "TYPE", "DEFAULT", "UNIT", "ACCESS"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    out.push('\n');
    let header: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    for row in std::iter::once(header.as_slice()).chain(rows.iter().map(|r| r.as_slice())) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out
}
