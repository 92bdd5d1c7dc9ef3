//! MtlSheet library
//!
//! This library parses MTL material description files into typed parameter
//! tables and lays many materials out side by side in a spreadsheet, one row
//! per distinct parameter and one column block per material.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod grid;
pub mod layout;
pub mod models;
pub mod parser;
pub mod services;
