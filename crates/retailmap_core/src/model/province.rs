//! Province entity: geographic subdivision owned by exactly one region.

use super::region::{Region, RegionId};
use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned province identifier.
pub type ProvinceId = i64;

/// Persisted province row with its owning region resolved.
///
/// Reads always join the region; a fetched province never carries a bare
/// foreign key in place of its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    /// Short code, unique among all provinces case-insensitively.
    pub code: String,
    pub name: String,
    pub region: Region,
}

/// Write shape for inserting or overwriting a province.
///
/// Carries the owning region by identifier; the caller resolves and checks
/// the region before handing the draft to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceDraft {
    pub code: String,
    pub name: String,
    pub region_id: RegionId,
}

impl ProvinceDraft {
    pub fn new(code: impl Into<String>, name: impl Into<String>, region_id: RegionId) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            region_id,
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
