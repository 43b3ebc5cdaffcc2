//! Supermarket use-case service.
//!
//! # Responsibility
//! - Validate supermarket input.
//! - Guard supermarket deletion against locations still referencing the row.

use crate::model::supermarket::{Supermarket, SupermarketDraft, SupermarketId};
use crate::repo::location_repo::LocationRepository;
use crate::repo::supermarket_repo::SupermarketRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Service facade for supermarket CRUD with relational pre-checks.
pub struct SupermarketService<S: SupermarketRepository, L: LocationRepository> {
    supermarkets: S,
    locations: L,
}

impl<S: SupermarketRepository, L: LocationRepository> SupermarketService<S, L> {
    pub fn new(supermarkets: S, locations: L) -> Self {
        Self {
            supermarkets,
            locations,
        }
    }

    pub fn list_supermarkets(&self) -> RepoResult<Vec<Supermarket>> {
        self.supermarkets.list_all()
    }

    /// Gets one supermarket by identifier; absence is not an error.
    pub fn get_supermarket(&self, id: SupermarketId) -> RepoResult<Option<Supermarket>> {
        self.supermarkets.get_by_id(id)
    }

    /// Creates a supermarket and returns the stored row.
    pub fn create_supermarket(&self, name: &str) -> RepoResult<Supermarket> {
        let draft = SupermarketDraft::new(name.trim());
        draft.validate()?;

        let id = self.supermarkets.insert(&draft)?;
        info!("event=supermarket_create module=service status=ok id={id}");
        self.read_back(id, "created supermarket missing on read-back")
    }

    /// Overwrites a supermarket's name and returns the stored row.
    pub fn update_supermarket(&self, id: SupermarketId, name: &str) -> RepoResult<Supermarket> {
        let draft = SupermarketDraft::new(name.trim());
        draft.validate()?;

        self.supermarkets.update(id, &draft)?;
        info!("event=supermarket_update module=service status=ok id={id}");
        self.read_back(id, "updated supermarket missing on read-back")
    }

    /// Deletes a supermarket unless locations still reference it.
    pub fn delete_supermarket(&self, id: SupermarketId) -> RepoResult<()> {
        if self.locations.exists_by_supermarket(id)? {
            warn!("event=supermarket_delete module=service status=conflict id={id}");
            return Err(RepoError::ReferentialConflict {
                detail: format!("supermarket {id} is still referenced by one or more locations"),
            });
        }

        self.supermarkets.delete(id)?;
        info!("event=supermarket_delete module=service status=ok id={id}");
        Ok(())
    }

    fn read_back(&self, id: SupermarketId, context: &str) -> RepoResult<Supermarket> {
        self.supermarkets
            .get_by_id(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("{context}: {id}")))
    }
}
