//! Repository layer: storage contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts and keep SQL inside this
//!   boundary.
//! - Translate store-level constraint failures into the shared error
//!   taxonomy.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Repositories assume referential validity was pre-checked by the caller;
//!   unique/foreign-key failures from the store are still surfaced as
//!   `CodeConflict`/`ReferentialConflict` so races cannot slip through as
//!   generic faults.
//! - Expected absence (`get_by_id` miss) is `Ok(None)`; `NotFound` is
//!   reserved for mutations that target an absent identifier.

use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::{ffi, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod location_repo;
pub mod province_repo;
pub mod region_repo;
pub mod supermarket_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity kind carried by repository errors for caller-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Region,
    Province,
    Supermarket,
    Location,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Province => "province",
            Self::Supermarket => "supermarket",
            Self::Location => "location",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy shared by repositories and the service validation boundary.
#[derive(Debug)]
pub enum RepoError {
    /// Field-level draft validation failed; nothing was written.
    Validation(ValidationError),
    /// A mutation targeted an identifier that does not exist.
    NotFound { entity: Entity, id: i64 },
    /// A case-insensitive code uniqueness rule would be or was broken.
    CodeConflict { entity: Entity, detail: String },
    /// A delete would orphan dependents, or a write referenced a missing
    /// parent row.
    ReferentialConflict { detail: String },
    /// Persisted state cannot be reconstructed into a valid read model.
    InvalidData(String),
    /// Connection or statement failure unrelated to data invariants.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::CodeConflict { entity, detail } => {
                write!(f, "{entity} code conflict: {detail}")
            }
            Self::ReferentialConflict { detail } => {
                write!(f, "referential conflict: {detail}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "repository requires column `{column}` in table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Classifies a write-statement failure.
///
/// Unique and foreign-key constraint failures become the matching conflict
/// variant; everything else passes through as a store fault. Used on every
/// INSERT/UPDATE/DELETE so the store stays the final authority behind the
/// service pre-checks.
pub(crate) fn map_constraint_err(entity: Entity, err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return RepoError::CodeConflict {
                    entity,
                    detail: message
                        .clone()
                        .unwrap_or_else(|| "UNIQUE constraint failed".to_string()),
                };
            }
            // A plain FK violation (e.g. insert against a missing parent)
            // reports SQLITE_CONSTRAINT_FOREIGNKEY, while an `ON DELETE
            // RESTRICT` violation is reported as SQLITE_CONSTRAINT_TRIGGER;
            // both carry the "FOREIGN KEY constraint failed" message and are
            // referential conflicts. The schema defines no user triggers.
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY | ffi::SQLITE_CONSTRAINT_TRIGGER => {
                return RepoError::ReferentialConflict {
                    detail: message
                        .clone()
                        .unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string()),
                };
            }
            _ => {}
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

/// One table the repository needs, with the columns it reads or writes.
pub(crate) struct TableRequirement {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

/// Verifies a connection is migrated and exposes the tables/columns the
/// repository depends on. Called by every repository constructor.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required: &[TableRequirement],
) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for requirement in required {
        if !table_exists(conn, requirement.table)? {
            return Err(RepoError::MissingRequiredTable(requirement.table));
        }
        for &column in requirement.columns {
            if !table_has_column(conn, requirement.table, column)? {
                return Err(RepoError::MissingRequiredColumn {
                    table: requirement.table,
                    column,
                });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
