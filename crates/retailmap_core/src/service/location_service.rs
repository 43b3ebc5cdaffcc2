//! Location use-case service.
//!
//! # Responsibility
//! - Validate location input and pre-check that both referenced parents
//!   (supermarket and province) exist before writes.
//!
//! # Invariants
//! - Listing returns the shallow summary read model; single fetches return
//!   the fully populated Province -> Region chain.

use crate::model::location::{Location, LocationDraft, LocationId};
use crate::model::province::ProvinceId;
use crate::model::supermarket::SupermarketId;
use crate::repo::location_repo::{LocationRepository, LocationSummary};
use crate::repo::province_repo::ProvinceRepository;
use crate::repo::supermarket_repo::SupermarketRepository;
use crate::repo::{Entity, RepoError, RepoResult};
use log::info;

/// Service facade for location CRUD with relational pre-checks.
pub struct LocationService<L: LocationRepository, S: SupermarketRepository, P: ProvinceRepository>
{
    locations: L,
    supermarkets: S,
    provinces: P,
}

impl<L: LocationRepository, S: SupermarketRepository, P: ProvinceRepository>
    LocationService<L, S, P>
{
    pub fn new(locations: L, supermarkets: S, provinces: P) -> Self {
        Self {
            locations,
            supermarkets,
            provinces,
        }
    }

    /// Lists all locations in the shallow summary shape.
    pub fn list_locations(&self) -> RepoResult<Vec<LocationSummary>> {
        self.locations.list_all()
    }

    /// Gets one fully populated location; absence is not an error.
    pub fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        self.locations.get_by_id(id)
    }

    /// Creates a location after checking both parents exist, and returns the
    /// stored row with the full parent chain resolved.
    pub fn create_location(
        &self,
        address: &str,
        city: &str,
        supermarket_id: SupermarketId,
        province_id: ProvinceId,
    ) -> RepoResult<Location> {
        let draft = LocationDraft::new(address.trim(), city.trim(), supermarket_id, province_id);
        draft.validate()?;
        self.ensure_parents_exist(supermarket_id, province_id)?;

        let id = self.locations.insert(&draft)?;
        info!(
            "event=location_create module=service status=ok id={id} supermarket_id={supermarket_id} province_id={province_id}"
        );
        self.read_back(id, "created location missing on read-back")
    }

    /// Overwrites a location after the same parent checks.
    pub fn update_location(
        &self,
        id: LocationId,
        address: &str,
        city: &str,
        supermarket_id: SupermarketId,
        province_id: ProvinceId,
    ) -> RepoResult<Location> {
        let draft = LocationDraft::new(address.trim(), city.trim(), supermarket_id, province_id);
        draft.validate()?;
        self.ensure_parents_exist(supermarket_id, province_id)?;

        self.locations.update(id, &draft)?;
        info!(
            "event=location_update module=service status=ok id={id} supermarket_id={supermarket_id} province_id={province_id}"
        );
        self.read_back(id, "updated location missing on read-back")
    }

    /// Deletes a location. Locations are leaves, so no dependents can block
    /// the removal.
    pub fn delete_location(&self, id: LocationId) -> RepoResult<()> {
        self.locations.delete(id)?;
        info!("event=location_delete module=service status=ok id={id}");
        Ok(())
    }

    fn ensure_parents_exist(
        &self,
        supermarket_id: SupermarketId,
        province_id: ProvinceId,
    ) -> RepoResult<()> {
        if self.supermarkets.get_by_id(supermarket_id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: Entity::Supermarket,
                id: supermarket_id,
            });
        }
        if self.provinces.get_by_id(province_id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: Entity::Province,
                id: province_id,
            });
        }
        Ok(())
    }

    fn read_back(&self, id: LocationId, context: &str) -> RepoResult<Location> {
        self.locations
            .get_by_id(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("{context}: {id}")))
    }
}
