//! Supermarket entity: a retail chain referenced by store locations.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned supermarket identifier.
pub type SupermarketId = i64;

/// Persisted supermarket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supermarket {
    pub id: SupermarketId,
    pub name: String,
}

/// Write shape for inserting or overwriting a supermarket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupermarketDraft {
    pub name: String,
}

impl SupermarketDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Rejects a blank name before the draft reaches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}
