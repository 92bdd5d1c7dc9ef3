//! Spreadsheet layout of materials and their parameters.
//!
//! Every distinct parameter name gets one row for the whole run, assigned the
//! first time the name is seen. Every material name gets a two-column block
//! (default, unit). Materials sharing a parameter therefore line up on the same
//! row regardless of which parameters each one declares.
//!
//! ```text
//!        A          B      C       D          E      F          G
//! 1      ID                        MAT_0042          MAT_0107
//! 2      Material                  BRONZE            STEEL
//! 3      Parameter  Type   Access  Default    Unit   Default    Unit
//! 4      TEMPERATURE Real  Full    0          F      0          F
//! 5      DENSITY    Real   Full                      7.85e-06   kg/mm^3
//! ```

pub mod engine;
pub mod index;

pub use engine::LayoutEngine;
pub use index::{ParameterIndex, ParameterIndexEntry};

use crate::grid::{MAX_COLUMN, MAX_ROW};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Row holding material ids.
pub const ID_ROW: u32 = 1;

/// Row holding material names.
pub const NAME_ROW: u32 = 2;

/// Columns used by each material name: value, unit.
pub const COLUMN_STRIDE: u32 = 2;

/// Label column holding parameter names.
pub const NAME_COLUMN: u32 = 1;

/// Label column holding parameter types.
pub const TYPE_COLUMN: u32 = 2;

/// Label column holding access qualifiers.
pub const ACCESS_COLUMN: u32 = 3;

/// Smallest allowed first parameter row (rows above hold ids, names, captions).
pub const MIN_PARAMETER_ROW: u32 = 4;

/// Smallest allowed first material column (columns to the left hold labels).
pub const MIN_MATERIAL_COLUMN: u32 = 4;

/// Placement of the parameter rows and material columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Row of the first parameter; the row above holds column captions
    #[serde(default = "default_first_parameter_row")]
    pub first_parameter_row: u32,
    /// Column of the first material block
    #[serde(default = "default_first_material_column")]
    pub first_material_column: u32,
}

fn default_first_parameter_row() -> u32 {
    MIN_PARAMETER_ROW
}

fn default_first_material_column() -> u32 {
    MIN_MATERIAL_COLUMN
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            first_parameter_row: default_first_parameter_row(),
            first_material_column: default_first_material_column(),
        }
    }
}

impl LayoutOptions {
    /// Row holding the `Parameter`/`Default`/`Unit` captions.
    pub fn header_row(&self) -> u32 {
        self.first_parameter_row - 1
    }

    /// Checks that the layout leaves room for the header rows and label columns
    /// and that the first parameter and first material block fit on a sheet.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PARAMETER_ROW..=MAX_ROW).contains(&self.first_parameter_row) {
            anyhow::bail!(
                "first_parameter_row must be between {MIN_PARAMETER_ROW} and {MAX_ROW} (got {})",
                self.first_parameter_row
            );
        }

        let max_column = MAX_COLUMN - (COLUMN_STRIDE - 1);
        if !(MIN_MATERIAL_COLUMN..=max_column).contains(&self.first_material_column) {
            anyhow::bail!(
                "first_material_column must be between {MIN_MATERIAL_COLUMN} and {max_column} (got {})",
                self.first_material_column
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LayoutOptions::default();
        assert_eq!(options.first_parameter_row, 4);
        assert_eq!(options.first_material_column, 4);
        assert_eq!(options.header_row(), 3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap_with_labels() {
        let options = LayoutOptions {
            first_parameter_row: 3,
            first_material_column: 4,
        };
        assert!(options.validate().is_err());

        let options = LayoutOptions {
            first_parameter_row: 6,
            first_material_column: 2,
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("first_material_column"));
    }

    #[test]
    fn test_validate_rejects_positions_past_sheet_limits() {
        let options = LayoutOptions {
            first_parameter_row: u32::MAX,
            first_material_column: 4,
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("first_parameter_row"));

        let options = LayoutOptions {
            first_parameter_row: 4,
            first_material_column: 16_384,
        };
        assert!(options.validate().is_err());

        let options = LayoutOptions {
            first_parameter_row: 1_048_576,
            first_material_column: 16_383,
        };
        assert!(options.validate().is_ok());
    }
}
