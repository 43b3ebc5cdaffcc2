//! Data-access core for the retailmap store directory.
//!
//! Maps the Region -> Province and Supermarket -> Location hierarchy to and
//! from relational rows, and upholds the cross-entity rules (code
//! uniqueness, parent existence, deletion safety) that live outside the
//! store's own constraints.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::location::{Location, LocationDraft, LocationId};
pub use model::province::{Province, ProvinceDraft, ProvinceId};
pub use model::region::{Region, RegionDraft, RegionId};
pub use model::supermarket::{Supermarket, SupermarketDraft, SupermarketId};
pub use model::{normalize_code, ValidationError};
pub use repo::location_repo::{
    LocationRepository, LocationSummary, ProvinceSummary, SqliteLocationRepository,
};
pub use repo::province_repo::{ProvinceRepository, SqliteProvinceRepository};
pub use repo::region_repo::{RegionRepository, SqliteRegionRepository};
pub use repo::supermarket_repo::{SqliteSupermarketRepository, SupermarketRepository};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::location_service::LocationService;
pub use service::province_service::ProvinceService;
pub use service::region_service::RegionService;
pub use service::supermarket_service::SupermarketService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
