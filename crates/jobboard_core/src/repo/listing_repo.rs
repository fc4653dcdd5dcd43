//! Listing repository contract and error taxonomy.
//!
//! # Responsibility
//! - Define the `fetch`/`append` contract every listing store implements.
//! - Name the failures callers must be able to tell apart.
//!
//! # Invariants
//! - `fetch` returns an empty table, not an error, when nothing is stored.
//! - `append` reports a rejected write as `Ok(false)`, never as an error.

use crate::db::DbError;
use crate::model::listing::JobListing;
use crate::model::table::{MissingField, Table};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for listing reads and writes.
#[derive(Debug)]
pub enum RepoError {
    /// The store could not be reached.
    RemoteUnavailable(StoreError),
    /// A stored record lacks one of the projected fields.
    SchemaMismatch { index: usize, field: &'static str },
    /// The store answered 200 with a body that is not JSON.
    InvalidDocument(serde_json::Error),
    /// A record could not be encoded for writing.
    Serialization(serde_json::Error),
    Db(DbError),
    /// Local persisted row could not be decoded.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemoteUnavailable(err) => write!(f, "{err}"),
            Self::SchemaMismatch { index, field } => {
                write!(f, "stored record #{index} is missing field `{field}`")
            }
            Self::InvalidDocument(err) => write!(f, "remote document is not valid JSON: {err}"),
            Self::Serialization(err) => write!(f, "failed to encode listing: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted listing data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RemoteUnavailable(err) => Some(err),
            Self::InvalidDocument(err) | Self::Serialization(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::SchemaMismatch { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::RemoteUnavailable(value)
    }
}

impl From<MissingField> for RepoError {
    fn from(value: MissingField) -> Self {
        Self::SchemaMismatch {
            index: value.index,
            field: value.field,
        }
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

/// Repository interface for listing storage.
pub trait ListingRepository {
    /// Reads every stored listing as a projected table.
    fn fetch(&self) -> RepoResult<Table>;
    /// Stores one more listing. Returns whether the store accepted it.
    fn append(&self, entry: &JobListing) -> RepoResult<bool>;
}

impl<R: ListingRepository + ?Sized> ListingRepository for Box<R> {
    fn fetch(&self) -> RepoResult<Table> {
        (**self).fetch()
    }

    fn append(&self, entry: &JobListing) -> RepoResult<bool> {
        (**self).append(entry)
    }
}
