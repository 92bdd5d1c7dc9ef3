//! Parameter records declared inside an MTL material block.

use serde::Serialize;
use std::fmt;

/// Declared type of an MTL parameter.
///
/// Unrecognized type tags are kept verbatim in [`ParamType::Other`] so they can
/// still be shown as the row label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ParamType {
    /// Floating-point value (`Type = Real`)
    Real,
    /// Whole number (`Type = Integer`)
    Integer,
    /// Quoted text (`Type = String`)
    String,
    /// Any other type tag, including a missing one (empty string)
    Other(String),
}

impl ParamType {
    /// Maps a `Type` field token onto a parameter type.
    ///
    /// Matching is exact; MTL files spell the tags with a leading capital.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Real" => Self::Real,
            "Integer" => Self::Integer,
            "String" => Self::String,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the tag as written in MTL files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Real => "Real",
            Self::Integer => "Integer",
            Self::String => "String",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed default value of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Coerced from a `Real` default
    Real(f64),
    /// Coerced from an `Integer` default
    Integer(i64),
    /// String defaults (quotes stripped) and raw tokens of unknown types
    Text(String),
}

impl ParamValue {
    /// Returns the text if this is a [`ParamValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One parameter declared in a material file.
///
/// # Invariants
///
/// - `default` matches `param_type`: `Real` holds [`ParamValue::Real`],
///   `Integer` holds [`ParamValue::Integer`], everything else holds
///   [`ParamValue::Text`]
/// - `unit` is never populated for `String` parameters (see
///   [`crate::parser::mtl`] for the merge rule)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRecord {
    /// Parameter name, unique within its material
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Typed default value
    pub default: ParamValue,
    /// Trailing unit token from the value line (e.g. `F`, `in`)
    pub unit: Option<String>,
    /// Access qualifier (e.g. `Full`)
    pub access: Option<String>,
}

impl ParameterRecord {
    /// Creates a record with no unit and no access qualifier.
    pub fn new(name: impl Into<String>, param_type: ParamType, default: ParamValue) -> Self {
        Self {
            name: name.into(),
            param_type,
            default,
            unit: None,
            access: None,
        }
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the access qualifier.
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access = Some(access.into());
        self
    }
}
