//! Listing repositories.
//!
//! # Responsibility
//! - Define the storage-agnostic `fetch`/`append` contract.
//! - Provide the whole-document remote implementation and the keyed local
//!   implementation.
//! - Open whichever backend configuration selects.

pub mod document;
pub mod listing_repo;
pub mod remote_repo;
pub mod sqlite_repo;

use crate::config::Backend;
use crate::store::HttpDocumentStore;
use listing_repo::{ListingRepository, RepoResult};
use remote_repo::RemoteListingRepository;
use sqlite_repo::SqliteListingRepository;

/// Opens the repository for `backend` behind the shared contract.
pub fn open_repository(backend: &Backend) -> RepoResult<Box<dyn ListingRepository>> {
    match backend {
        Backend::Remote { url, timeout } => {
            let store = HttpDocumentStore::new(url.as_str(), *timeout)?;
            Ok(Box::new(RemoteListingRepository::new(store)))
        }
        Backend::Local { db_path } => Ok(Box::new(SqliteListingRepository::open(db_path)?)),
    }
}
