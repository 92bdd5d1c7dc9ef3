//! Data errors raised while coercing MTL parameter defaults.

use crate::models::ParamType;
use thiserror::Error;

/// Error produced when a parameter's declared type and default disagree.
///
/// Structural problems (missing header, missing blocks, unknown fields) are
/// never errors; they degrade to sentinel or raw values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `Real` or `Integer` default that does not parse as a number.
    #[error("Parameter '{parameter}' declares type {expected} but its default '{value}' is not a valid number")]
    InvalidNumber {
        /// Name of the offending parameter
        parameter: String,
        /// Raw default token
        value: String,
        /// Declared type
        expected: ParamType,
    },
}
