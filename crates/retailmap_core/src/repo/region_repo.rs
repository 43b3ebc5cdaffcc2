//! Region repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `regions` relation.
//! - Provide the case-insensitive code existence predicates used by the
//!   validation boundary.
//!
//! # Invariants
//! - `list_all` order is pinned (`id ASC`) so reads are deterministic for a
//!   fixed dataset.
//! - Deleting a region still referenced by provinces fails with
//!   `ReferentialConflict`; the row is left unchanged.

use crate::model::region::{Region, RegionDraft, RegionId};
use crate::repo::{
    ensure_connection_ready, map_constraint_err, Entity, RepoError, RepoResult, TableRequirement,
};
use rusqlite::{params, Connection, Row};

const REGION_SELECT_SQL: &str = "SELECT id, code, name FROM regions";

const REQUIRED_SCHEMA: &[TableRequirement] = &[TableRequirement {
    table: "regions",
    columns: &["id", "code", "name"],
}];

/// Repository interface for region CRUD operations.
pub trait RegionRepository {
    fn list_all(&self) -> RepoResult<Vec<Region>>;
    /// Inserts the draft and returns the store-assigned identifier.
    fn insert(&self, draft: &RegionDraft) -> RepoResult<RegionId>;
    /// Fully overwrites code and name for the given identifier.
    fn update(&self, id: RegionId, draft: &RegionDraft) -> RepoResult<()>;
    fn delete(&self, id: RegionId) -> RepoResult<()>;
    fn get_by_id(&self, id: RegionId) -> RepoResult<Option<Region>>;
    /// True when any region carries `code`, compared case-insensitively.
    fn exists_by_code(&self, code: &str) -> RepoResult<bool>;
    /// Like `exists_by_code`, but ignores the row with identifier `id`.
    fn exists_by_code_excluding_id(&self, code: &str, id: RegionId) -> RepoResult<bool>;
}

/// SQLite-backed region repository.
pub struct SqliteRegionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRegionRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl RegionRepository for SqliteRegionRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Region>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REGION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut regions = Vec::new();
        while let Some(row) = rows.next()? {
            regions.push(parse_region_row(row)?);
        }
        Ok(regions)
    }

    fn insert(&self, draft: &RegionDraft) -> RepoResult<RegionId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO regions (code, name) VALUES (?1, ?2);",
                params![draft.code, draft.name],
            )
            .map_err(|err| map_constraint_err(Entity::Region, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: RegionId, draft: &RegionDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE regions SET code = ?1, name = ?2 WHERE id = ?3;",
                params![draft.code, draft.name, id],
            )
            .map_err(|err| map_constraint_err(Entity::Region, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Region,
                id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: RegionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM regions WHERE id = ?1;", params![id])
            .map_err(|err| map_constraint_err(Entity::Region, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Region,
                id,
            });
        }

        Ok(())
    }

    fn get_by_id(&self, id: RegionId) -> RepoResult<Option<Region>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REGION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_region_row(row)?));
        }
        Ok(None)
    }

    fn exists_by_code(&self, code: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM regions WHERE UPPER(code) = UPPER(?1)
            );",
            params![code],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_code_excluding_id(&self, code: &str, id: RegionId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM regions WHERE UPPER(code) = UPPER(?1) AND id != ?2
            );",
            params![code, id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_region_row(row: &Row<'_>) -> RepoResult<Region> {
    Ok(Region {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
    })
}
