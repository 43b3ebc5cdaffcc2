//! Province use-case service.
//!
//! # Responsibility
//! - Normalize and validate province input, pre-check code uniqueness and
//!   the existence of the owning region.
//! - Guard province deletion against locations still referencing the row.

use crate::model::normalize_code;
use crate::model::province::{Province, ProvinceDraft, ProvinceId};
use crate::model::region::RegionId;
use crate::repo::location_repo::LocationRepository;
use crate::repo::province_repo::ProvinceRepository;
use crate::repo::region_repo::RegionRepository;
use crate::repo::{Entity, RepoError, RepoResult};
use log::{info, warn};

/// Service facade for province CRUD with relational pre-checks.
pub struct ProvinceService<P: ProvinceRepository, R: RegionRepository, L: LocationRepository> {
    provinces: P,
    regions: R,
    locations: L,
}

impl<P: ProvinceRepository, R: RegionRepository, L: LocationRepository> ProvinceService<P, R, L> {
    pub fn new(provinces: P, regions: R, locations: L) -> Self {
        Self {
            provinces,
            regions,
            locations,
        }
    }

    pub fn list_provinces(&self) -> RepoResult<Vec<Province>> {
        self.provinces.list_all()
    }

    /// Gets one province by identifier; absence is not an error.
    pub fn get_province(&self, id: ProvinceId) -> RepoResult<Option<Province>> {
        self.provinces.get_by_id(id)
    }

    /// Creates a province after checking its code is free and its region
    /// exists, and returns the stored row with the region resolved.
    pub fn create_province(
        &self,
        code: &str,
        name: &str,
        region_id: RegionId,
    ) -> RepoResult<Province> {
        let draft = ProvinceDraft::new(normalize_code(code), name.trim(), region_id);
        draft.validate()?;
        self.ensure_region_exists(region_id)?;

        if self.provinces.exists_by_code(&draft.code)? {
            warn!(
                "event=province_create module=service status=conflict code={}",
                draft.code
            );
            return Err(RepoError::CodeConflict {
                entity: Entity::Province,
                detail: format!("code `{}` is already in use", draft.code),
            });
        }

        let id = self.provinces.insert(&draft)?;
        info!(
            "event=province_create module=service status=ok id={id} code={} region_id={region_id}",
            draft.code
        );
        self.read_back(id, "created province missing on read-back")
    }

    /// Overwrites a province after the same checks, excluding the row itself
    /// from the code comparison.
    pub fn update_province(
        &self,
        id: ProvinceId,
        code: &str,
        name: &str,
        region_id: RegionId,
    ) -> RepoResult<Province> {
        let draft = ProvinceDraft::new(normalize_code(code), name.trim(), region_id);
        draft.validate()?;
        self.ensure_region_exists(region_id)?;

        if self.provinces.exists_by_code_excluding_id(&draft.code, id)? {
            warn!(
                "event=province_update module=service status=conflict id={id} code={}",
                draft.code
            );
            return Err(RepoError::CodeConflict {
                entity: Entity::Province,
                detail: format!("code `{}` is already in use", draft.code),
            });
        }

        self.provinces.update(id, &draft)?;
        info!(
            "event=province_update module=service status=ok id={id} code={} region_id={region_id}",
            draft.code
        );
        self.read_back(id, "updated province missing on read-back")
    }

    /// Deletes a province unless locations still reference it.
    pub fn delete_province(&self, id: ProvinceId) -> RepoResult<()> {
        if self.locations.exists_by_province(id)? {
            warn!("event=province_delete module=service status=conflict id={id}");
            return Err(RepoError::ReferentialConflict {
                detail: format!("province {id} is still referenced by one or more locations"),
            });
        }

        self.provinces.delete(id)?;
        info!("event=province_delete module=service status=ok id={id}");
        Ok(())
    }

    fn ensure_region_exists(&self, region_id: RegionId) -> RepoResult<()> {
        if self.regions.get_by_id(region_id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: Entity::Region,
                id: region_id,
            });
        }
        Ok(())
    }

    fn read_back(&self, id: ProvinceId, context: &str) -> RepoResult<Province> {
        self.provinces
            .get_by_id(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("{context}: {id}")))
    }
}
