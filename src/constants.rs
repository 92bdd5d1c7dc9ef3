//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed spreadsheet labels.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "MtlSheet";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "mtlsheet";

/// Identity used for both material id and name when a file has no header.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Caption written above the material id row labels.
pub const ID_LABEL: &str = "ID";

/// Caption written above the material name row labels.
pub const MATERIAL_LABEL: &str = "Material";

/// Captions of the three label columns.
pub const LABEL_HEADERS: [&str; 3] = ["Parameter", "Type", "Access"];

/// Captions of the two columns of every material block.
pub const VALUE_HEADERS: [&str; 2] = ["Default", "Unit"];
