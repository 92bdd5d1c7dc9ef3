//! Data models for material files and their parameters.
//!
//! These types are produced by the parser and consumed by the layout engine.
//! They carry no knowledge of either.

pub mod material;
pub mod parameter;

// Re-export all model types
pub use material::{MaterialRecord, ParameterTable};
pub use parameter::{ParamType, ParamValue, ParameterRecord};
