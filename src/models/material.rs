//! Material identity and parameter table parsed from one MTL file.

use crate::constants::UNKNOWN_IDENTITY;
use crate::models::ParameterRecord;
use indexmap::IndexMap;
use serde::Serialize;

/// Parameters of one material keyed by name, in order of first appearance.
pub type ParameterTable = IndexMap<String, ParameterRecord>;

/// The content of one MTL file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRecord {
    /// Leading identifier of the outer block, or [`UNKNOWN_IDENTITY`]
    pub material_id: String,
    /// Human-readable material name, or [`UNKNOWN_IDENTITY`]
    pub material_name: String,
    /// Declared parameters
    pub parameters: ParameterTable,
}

impl MaterialRecord {
    /// Creates an empty record with the given identity.
    pub fn new(material_id: impl Into<String>, material_name: impl Into<String>) -> Self {
        Self {
            material_id: material_id.into(),
            material_name: material_name.into(),
            parameters: ParameterTable::new(),
        }
    }

    /// Creates an empty record carrying the sentinel identity.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_IDENTITY, UNKNOWN_IDENTITY)
    }

    /// Returns true if no outer-block header was found.
    pub fn has_unknown_identity(&self) -> bool {
        self.material_id == UNKNOWN_IDENTITY && self.material_name == UNKNOWN_IDENTITY
    }

    /// Inserts a parameter.
    ///
    /// A duplicate name replaces the earlier record but keeps its position.
    pub fn insert(&mut self, record: ParameterRecord) {
        self.parameters.insert(record.name.clone(), record);
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterRecord> {
        self.parameters.get(name)
    }
}
