//! Parsing and rendering of MTL material files.
//!
//! This module turns MTL text into [`MaterialRecord`](crate::models::MaterialRecord)s
//! and renders records back into normalized MTL text.

pub mod error;
pub mod mtl;
pub mod mtl_writer;

// Re-export commonly used functions
pub use error::ParseError;
pub use mtl::{parse_mtl_file, parse_mtl_str};
pub use mtl_writer::{render_material, render_parameter_block};
