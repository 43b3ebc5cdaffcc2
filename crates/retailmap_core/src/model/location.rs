//! Location entity: a physical store tying one supermarket to one province.

use super::province::{Province, ProvinceId};
use super::supermarket::{Supermarket, SupermarketId};
use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned location identifier.
pub type LocationId = i64;

/// Persisted location row with both parents resolved.
///
/// This is the detail read model: the province carries its own region, so
/// the whole Location -> Province -> Region chain is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub address: String,
    pub city: String,
    pub supermarket: Supermarket,
    pub province: Province,
}

/// Write shape for inserting or overwriting a location.
///
/// Parents are referenced by identifier; the caller resolves and checks both
/// before handing the draft to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDraft {
    pub address: String,
    pub city: String,
    pub supermarket_id: SupermarketId,
    pub province_id: ProvinceId,
}

impl LocationDraft {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        supermarket_id: SupermarketId,
        province_id: ProvinceId,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            supermarket_id,
            province_id,
        }
    }

    /// Rejects blank fields before the draft reaches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.address.trim().is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        Ok(())
    }
}
