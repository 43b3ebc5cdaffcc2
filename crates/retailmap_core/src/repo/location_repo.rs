//! Location repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `locations` relation.
//! - Reconstruct joined parent rows into the two read models: a summary for
//!   listings and a fully populated entity for single fetches.
//!
//! # Invariants
//! - `list_all` joins supermarkets and provinces only; the province's region
//!   stays a bare identifier (`ProvinceSummary::region_id`). `get_by_id`
//!   additionally joins regions and returns the full chain. The depth
//!   difference is deliberate: listings never need the region row, and the
//!   summary type makes the shallow reference explicit instead of leaving a
//!   null field.
//! - One mapping function per join shape; every join is many-to-one from the
//!   location's perspective, so each row yields exactly one parent value.

use crate::model::location::{Location, LocationDraft, LocationId};
use crate::model::province::{Province, ProvinceId};
use crate::model::region::{Region, RegionId};
use crate::model::supermarket::{Supermarket, SupermarketId};
use crate::repo::{
    ensure_connection_ready, map_constraint_err, Entity, RepoError, RepoResult, TableRequirement,
};
use rusqlite::{params, Connection, Row};

const LOCATION_LIST_SQL: &str = "SELECT
    l.id AS location_id,
    l.address,
    l.city,
    s.id AS supermarket_id,
    s.name AS supermarket_name,
    p.id AS province_id,
    p.code AS province_code,
    p.name AS province_name,
    p.id_region AS region_id
FROM locations l
INNER JOIN supermarkets s ON s.id = l.supermarket_id
INNER JOIN provinces p ON p.id = l.province_id";

const LOCATION_DETAIL_SQL: &str = "SELECT
    l.id AS location_id,
    l.address,
    l.city,
    s.id AS supermarket_id,
    s.name AS supermarket_name,
    p.id AS province_id,
    p.code AS province_code,
    p.name AS province_name,
    r.id AS region_id,
    r.code AS region_code,
    r.name AS region_name
FROM locations l
INNER JOIN supermarkets s ON s.id = l.supermarket_id
INNER JOIN provinces p ON p.id = l.province_id
INNER JOIN regions r ON r.id = p.id_region";

const REQUIRED_SCHEMA: &[TableRequirement] = &[
    TableRequirement {
        table: "locations",
        columns: &["id", "address", "city", "supermarket_id", "province_id"],
    },
    TableRequirement {
        table: "supermarkets",
        columns: &["id", "name"],
    },
    TableRequirement {
        table: "provinces",
        columns: &["id", "code", "name", "id_region"],
    },
    TableRequirement {
        table: "regions",
        columns: &["id", "code", "name"],
    },
];

/// Province as it appears in location listings: the owning region is a bare
/// identifier, not a resolved row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceSummary {
    pub id: ProvinceId,
    pub code: String,
    pub name: String,
    pub region_id: RegionId,
}

/// Read model for location listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSummary {
    pub id: LocationId,
    pub address: String,
    pub city: String,
    pub supermarket: Supermarket,
    pub province: ProvinceSummary,
}

/// Repository interface for location CRUD operations.
pub trait LocationRepository {
    /// Lists all locations with supermarket and province populated; the
    /// province's region stays a bare identifier.
    fn list_all(&self) -> RepoResult<Vec<LocationSummary>>;
    /// Inserts the draft and returns the store-assigned identifier.
    fn insert(&self, draft: &LocationDraft) -> RepoResult<LocationId>;
    /// Fully overwrites address, city and both parent references.
    fn update(&self, id: LocationId, draft: &LocationDraft) -> RepoResult<()>;
    /// Locations are leaves; delete only reports `NotFound` for absent ids.
    fn delete(&self, id: LocationId) -> RepoResult<()>;
    /// Fetches one location with the full Province -> Region chain resolved.
    fn get_by_id(&self, id: LocationId) -> RepoResult<Option<Location>>;
    /// True when any location references the given supermarket.
    /// Deletion-safety predicate for supermarket removal.
    fn exists_by_supermarket(&self, supermarket_id: SupermarketId) -> RepoResult<bool>;
    /// True when any location references the given province.
    /// Deletion-safety predicate for province removal.
    fn exists_by_province(&self, province_id: ProvinceId) -> RepoResult<bool>;
}

/// SQLite-backed location repository.
pub struct SqliteLocationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocationRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl LocationRepository for SqliteLocationRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<LocationSummary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOCATION_LIST_SQL} ORDER BY l.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut locations = Vec::new();
        while let Some(row) = rows.next()? {
            locations.push(parse_location_summary_row(row)?);
        }
        Ok(locations)
    }

    fn insert(&self, draft: &LocationDraft) -> RepoResult<LocationId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO locations (address, city, supermarket_id, province_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    draft.address,
                    draft.city,
                    draft.supermarket_id,
                    draft.province_id
                ],
            )
            .map_err(|err| map_constraint_err(Entity::Location, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: LocationId, draft: &LocationDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE locations
                 SET address = ?1, city = ?2, supermarket_id = ?3, province_id = ?4
                 WHERE id = ?5;",
                params![
                    draft.address,
                    draft.city,
                    draft.supermarket_id,
                    draft.province_id,
                    id
                ],
            )
            .map_err(|err| map_constraint_err(Entity::Location, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Location,
                id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: LocationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM locations WHERE id = ?1;", params![id])
            .map_err(|err| map_constraint_err(Entity::Location, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Location,
                id,
            });
        }

        Ok(())
    }

    fn get_by_id(&self, id: LocationId) -> RepoResult<Option<Location>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOCATION_DETAIL_SQL} WHERE l.id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_location_row(row)?));
        }
        Ok(None)
    }

    fn exists_by_supermarket(&self, supermarket_id: SupermarketId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM locations WHERE supermarket_id = ?1
            );",
            params![supermarket_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_province(&self, province_id: ProvinceId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM locations WHERE province_id = ?1
            );",
            params![province_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_location_summary_row(row: &Row<'_>) -> RepoResult<LocationSummary> {
    Ok(LocationSummary {
        id: row.get("location_id")?,
        address: row.get("address")?,
        city: row.get("city")?,
        supermarket: Supermarket {
            id: row.get("supermarket_id")?,
            name: row.get("supermarket_name")?,
        },
        province: ProvinceSummary {
            id: row.get("province_id")?,
            code: row.get("province_code")?,
            name: row.get("province_name")?,
            region_id: row.get("region_id")?,
        },
    })
}

fn parse_location_row(row: &Row<'_>) -> RepoResult<Location> {
    Ok(Location {
        id: row.get("location_id")?,
        address: row.get("address")?,
        city: row.get("city")?,
        supermarket: Supermarket {
            id: row.get("supermarket_id")?,
            name: row.get("supermarket_name")?,
        },
        province: Province {
            id: row.get("province_id")?,
            code: row.get("province_code")?,
            name: row.get("province_name")?,
            region: Region {
                id: row.get("region_id")?,
                code: row.get("region_code")?,
                name: row.get("region_name")?,
            },
        },
    })
}
