//! Province repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `provinces` relation.
//! - Join the owning region on every read so fetched provinces always carry
//!   a fully populated parent.
//!
//! # Invariants
//! - Same-named columns from the joined relations are disambiguated through
//!   aliases; one mapping function covers the single join shape.
//! - The repository does not verify the referenced region exists; that is
//!   the caller's pre-check, with the store's foreign key as backstop.

use crate::model::province::{Province, ProvinceDraft, ProvinceId};
use crate::model::region::{Region, RegionId};
use crate::repo::{
    ensure_connection_ready, map_constraint_err, Entity, RepoError, RepoResult, TableRequirement,
};
use rusqlite::{params, Connection, Row};

const PROVINCE_SELECT_SQL: &str = "SELECT
    p.id AS province_id,
    p.code AS province_code,
    p.name AS province_name,
    r.id AS region_id,
    r.code AS region_code,
    r.name AS region_name
FROM provinces p
INNER JOIN regions r ON r.id = p.id_region";

const REQUIRED_SCHEMA: &[TableRequirement] = &[
    TableRequirement {
        table: "provinces",
        columns: &["id", "code", "name", "id_region"],
    },
    TableRequirement {
        table: "regions",
        columns: &["id", "code", "name"],
    },
];

/// Repository interface for province CRUD operations.
pub trait ProvinceRepository {
    fn list_all(&self) -> RepoResult<Vec<Province>>;
    /// Inserts the draft and returns the store-assigned identifier.
    fn insert(&self, draft: &ProvinceDraft) -> RepoResult<ProvinceId>;
    /// Fully overwrites code, name and owning region for the identifier.
    fn update(&self, id: ProvinceId, draft: &ProvinceDraft) -> RepoResult<()>;
    fn delete(&self, id: ProvinceId) -> RepoResult<()>;
    fn get_by_id(&self, id: ProvinceId) -> RepoResult<Option<Province>>;
    /// True when any province carries `code`, compared case-insensitively.
    fn exists_by_code(&self, code: &str) -> RepoResult<bool>;
    /// Like `exists_by_code`, but ignores the row with identifier `id`.
    fn exists_by_code_excluding_id(&self, code: &str, id: ProvinceId) -> RepoResult<bool>;
    /// True when any province references the given region. Deletion-safety
    /// predicate for region removal.
    fn exists_by_region(&self, region_id: RegionId) -> RepoResult<bool>;
}

/// SQLite-backed province repository.
pub struct SqliteProvinceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProvinceRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl ProvinceRepository for SqliteProvinceRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Province>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROVINCE_SELECT_SQL} ORDER BY p.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut provinces = Vec::new();
        while let Some(row) = rows.next()? {
            provinces.push(parse_province_row(row)?);
        }
        Ok(provinces)
    }

    fn insert(&self, draft: &ProvinceDraft) -> RepoResult<ProvinceId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO provinces (code, name, id_region) VALUES (?1, ?2, ?3);",
                params![draft.code, draft.name, draft.region_id],
            )
            .map_err(|err| map_constraint_err(Entity::Province, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: ProvinceId, draft: &ProvinceDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE provinces SET code = ?1, name = ?2, id_region = ?3 WHERE id = ?4;",
                params![draft.code, draft.name, draft.region_id, id],
            )
            .map_err(|err| map_constraint_err(Entity::Province, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Province,
                id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: ProvinceId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM provinces WHERE id = ?1;", params![id])
            .map_err(|err| map_constraint_err(Entity::Province, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Province,
                id,
            });
        }

        Ok(())
    }

    fn get_by_id(&self, id: ProvinceId) -> RepoResult<Option<Province>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROVINCE_SELECT_SQL} WHERE p.id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_province_row(row)?));
        }
        Ok(None)
    }

    fn exists_by_code(&self, code: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM provinces WHERE UPPER(code) = UPPER(?1)
            );",
            params![code],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_code_excluding_id(&self, code: &str, id: ProvinceId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM provinces WHERE UPPER(code) = UPPER(?1) AND id != ?2
            );",
            params![code, id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_region(&self, region_id: RegionId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM provinces WHERE id_region = ?1
            );",
            params![region_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_province_row(row: &Row<'_>) -> RepoResult<Province> {
    Ok(Province {
        id: row.get("province_id")?,
        code: row.get("province_code")?,
        name: row.get("province_name")?,
        region: Region {
            id: row.get("region_id")?,
            code: row.get("region_code")?,
            name: row.get("region_name")?,
        },
    })
}
