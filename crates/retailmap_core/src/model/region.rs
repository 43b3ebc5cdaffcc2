//! Region entity: top-level geographic grouping, parent of provinces.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned region identifier.
pub type RegionId = i64;

/// Persisted region row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Short code, unique among regions case-insensitively.
    pub code: String,
    pub name: String,
}

/// Write shape for inserting or overwriting a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDraft {
    pub code: String,
    pub name: String,
}

impl RegionDraft {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Rejects blank fields before the draft reaches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}
