//! Global parameter-name to row assignment.

use crate::models::ParamType;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Row bookkeeping for one distinct parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterIndexEntry {
    /// Grid row permanently assigned to the name
    pub row: u32,
    /// Type of the first occurrence
    pub param_type: ParamType,
    /// Access qualifier of the first occurrence
    pub access: Option<String>,
}

/// Assigns each parameter name a row in first-seen order.
///
/// Rows are handed out from `first_row` upwards and never reused. The type and
/// access recorded for a name are those of its first occurrence; later
/// occurrences with different metadata keep the original labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterIndex {
    entries: IndexMap<String, ParameterIndexEntry>,
    next_row: u32,
}

impl ParameterIndex {
    /// Creates an empty index whose first assigned row is `first_row`.
    pub fn new(first_row: u32) -> Self {
        Self {
            entries: IndexMap::new(),
            next_row: first_row,
        }
    }

    /// Returns the row for `name`, assigning the next free row on first sight.
    pub fn assign_or_get(&mut self, name: &str, param_type: &ParamType, access: Option<&str>) -> u32 {
        if let Some(entry) = self.entries.get(name) {
            if entry.param_type != *param_type || entry.access.as_deref() != access {
                debug!(
                    parameter = name,
                    first_type = %entry.param_type,
                    later_type = %param_type,
                    "keeping first-seen metadata for parameter row"
                );
            }
            return entry.row;
        }

        let row = self.next_row;
        self.next_row = self.next_row.saturating_add(1);
        self.entries.insert(
            name.to_string(),
            ParameterIndexEntry {
                row,
                param_type: param_type.clone(),
                access: access.map(str::to_string),
            },
        );
        row
    }

    /// Row assigned to `name`, if seen.
    pub fn row(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|entry| entry.row)
    }

    /// Entry for `name`, if seen.
    pub fn get(&self, name: &str) -> Option<&ParameterIndexEntry> {
        self.entries.get(name)
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterIndexEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of distinct names seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no name has been assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Row the next new name will receive.
    pub fn next_row(&self) -> u32 {
        self.next_row
    }
}
