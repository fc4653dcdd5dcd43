//! Keyed local listing repository on SQLite.
//!
//! # Responsibility
//! - Store each listing as its own row keyed by a generated UUID.
//! - Serve the same `fetch`/`append` contract as the remote document.
//!
//! # Invariants
//! - `append` is a single INSERT; concurrent writers never overwrite each
//!   other's listings.
//! - `fetch` returns listings in insertion order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, DbError};
use crate::model::listing::{CompanyRole, JobListing, Location};
use crate::model::table::Table;
use crate::repo::listing_repo::{ListingRepository, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

const LISTING_SELECT_SQL: &str = "SELECT
    company_name,
    phone_number,
    location,
    role,
    cyber_security,
    python_backend,
    net_backend,
    ai_developer
FROM listings
ORDER BY seq ASC";

/// SQLite-backed keyed listing repository.
pub struct SqliteListingRepository {
    conn: Connection,
}

impl SqliteListingRepository {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - Returns `Db(UnsupportedSchemaVersion)` for a newer schema.
    /// - Returns `InvalidData` when migrations were not applied.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let version = current_user_version(&conn)?;
        let latest = latest_version();
        if version > latest {
            return Err(RepoError::Db(DbError::UnsupportedSchemaVersion {
                db_version: version,
                latest_supported: latest,
            }));
        }
        if version < latest {
            return Err(RepoError::InvalidData(format!(
                "connection schema version {version} is not migrated to {latest}"
            )));
        }
        Ok(Self { conn })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Inserts one listing and returns its generated key.
    pub fn insert(&self, entry: &JobListing) -> RepoResult<Uuid> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO listings (
                uuid,
                company_name,
                phone_number,
                location,
                role,
                cyber_security,
                python_backend,
                net_backend,
                ai_developer
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                id.to_string(),
                entry.company_name.as_str(),
                entry.phone_number.as_str(),
                entry.location.as_str(),
                entry.role.as_str(),
                entry.cyber_security,
                entry.python_backend,
                entry.net_backend,
                entry.ai_developer,
            ],
        )?;
        Ok(id)
    }

    /// Lists stored listings in insertion order.
    pub fn list(&self) -> RepoResult<Vec<JobListing>> {
        let mut stmt = self.conn.prepare(LISTING_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next()? {
            listings.push(parse_listing_row(row)?);
        }
        Ok(listings)
    }
}

impl ListingRepository for SqliteListingRepository {
    fn fetch(&self) -> RepoResult<Table> {
        let started_at = Instant::now();
        let listings = self.list()?;
        info!(
            "event=listing_fetch module=repo backend=sqlite status=ok rows={} duration_ms={}",
            listings.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Table::from_listings(&listings))
    }

    fn append(&self, entry: &JobListing) -> RepoResult<bool> {
        let started_at = Instant::now();
        self.insert(entry)?;
        info!(
            "event=listing_append module=repo backend=sqlite status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(true)
    }
}

fn parse_listing_row(row: &Row<'_>) -> RepoResult<JobListing> {
    let location_text: String = row.get("location")?;
    let location = location_text.parse::<Location>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid location `{location_text}` in listings.location"
        ))
    })?;

    let role_text: String = row.get("role")?;
    let role = role_text.parse::<CompanyRole>().map_err(|_| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in listings.role"))
    })?;

    Ok(JobListing {
        company_name: row.get("company_name")?,
        phone_number: row.get("phone_number")?,
        location,
        role,
        cyber_security: row.get("cyber_security")?,
        python_backend: row.get("python_backend")?,
        net_backend: row.get("net_backend")?,
        ai_developer: row.get("ai_developer")?,
    })
}
