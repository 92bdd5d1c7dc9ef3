//! Service layer for business logic.
//!
//! This module contains services that coordinate the parser, the layout
//! engine and the workbook writer.

pub mod conversion;
pub mod materials;

// Re-export commonly used types and functions
pub use conversion::{ConversionOptions, ConversionReport, ConversionService, SkippedFile};
pub use materials::MaterialService;
