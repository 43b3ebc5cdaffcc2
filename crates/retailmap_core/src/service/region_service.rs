//! Region use-case service.
//!
//! # Responsibility
//! - Normalize and validate region input, pre-check code uniqueness.
//! - Guard region deletion against provinces still referencing the row.

use crate::model::normalize_code;
use crate::model::region::{Region, RegionDraft, RegionId};
use crate::repo::province_repo::ProvinceRepository;
use crate::repo::region_repo::RegionRepository;
use crate::repo::{Entity, RepoError, RepoResult};
use log::{info, warn};

/// Service facade for region CRUD with relational pre-checks.
pub struct RegionService<R: RegionRepository, P: ProvinceRepository> {
    regions: R,
    provinces: P,
}

impl<R: RegionRepository, P: ProvinceRepository> RegionService<R, P> {
    pub fn new(regions: R, provinces: P) -> Self {
        Self { regions, provinces }
    }

    pub fn list_regions(&self) -> RepoResult<Vec<Region>> {
        self.regions.list_all()
    }

    /// Gets one region by identifier; absence is not an error.
    pub fn get_region(&self, id: RegionId) -> RepoResult<Option<Region>> {
        self.regions.get_by_id(id)
    }

    /// Creates a region after normalizing its code and checking uniqueness,
    /// and returns the stored row.
    pub fn create_region(&self, code: &str, name: &str) -> RepoResult<Region> {
        let draft = RegionDraft::new(normalize_code(code), name.trim());
        draft.validate()?;

        if self.regions.exists_by_code(&draft.code)? {
            warn!(
                "event=region_create module=service status=conflict code={}",
                draft.code
            );
            return Err(RepoError::CodeConflict {
                entity: Entity::Region,
                detail: format!("code `{}` is already in use", draft.code),
            });
        }

        let id = self.regions.insert(&draft)?;
        info!(
            "event=region_create module=service status=ok id={id} code={}",
            draft.code
        );
        self.read_back(id, "created region missing on read-back")
    }

    /// Overwrites a region after the same normalization and uniqueness
    /// checks, excluding the row itself from the code comparison.
    pub fn update_region(&self, id: RegionId, code: &str, name: &str) -> RepoResult<Region> {
        let draft = RegionDraft::new(normalize_code(code), name.trim());
        draft.validate()?;

        if self.regions.exists_by_code_excluding_id(&draft.code, id)? {
            warn!(
                "event=region_update module=service status=conflict id={id} code={}",
                draft.code
            );
            return Err(RepoError::CodeConflict {
                entity: Entity::Region,
                detail: format!("code `{}` is already in use", draft.code),
            });
        }

        self.regions.update(id, &draft)?;
        info!(
            "event=region_update module=service status=ok id={id} code={}",
            draft.code
        );
        self.read_back(id, "updated region missing on read-back")
    }

    /// Deletes a region unless provinces still reference it.
    pub fn delete_region(&self, id: RegionId) -> RepoResult<()> {
        if self.provinces.exists_by_region(id)? {
            warn!("event=region_delete module=service status=conflict id={id}");
            return Err(RepoError::ReferentialConflict {
                detail: format!("region {id} is still referenced by one or more provinces"),
            });
        }

        self.regions.delete(id)?;
        info!("event=region_delete module=service status=ok id={id}");
        Ok(())
    }

    fn read_back(&self, id: RegionId, context: &str) -> RepoResult<Region> {
        self.regions
            .get_by_id(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("{context}: {id}")))
    }
}
