//! Listing repository over one whole remote JSON document.
//!
//! # Responsibility
//! - Read the full document and project it for display.
//! - Append by read-modify-write of the full document.
//!
//! # Invariants
//! - Every write replaces the whole document; there is no merge.
//! - `append` is not atomic against the store: two overlapping appends can
//!   read the same state, and the later write discards the earlier record.
//!   `SqliteListingRepository` is the keyed alternative without this race.

use crate::model::listing::JobListing;
use crate::model::table::Table;
use crate::repo::document::RemoteDocument;
use crate::repo::listing_repo::{ListingRepository, RepoError, RepoResult};
use crate::store::{DocumentStore, STATUS_OK};
use log::{error, info, warn};
use serde_json::Value;
use std::time::Instant;

/// Whole-document listing repository.
pub struct RemoteListingRepository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> RemoteListingRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the raw document as an array to extend.
    ///
    /// Non-200 reads and non-array documents yield an empty array; `null`
    /// holes are preserved so a rewrite keeps them.
    pub fn load_document(&self) -> RepoResult<Vec<Value>> {
        let response = self.store.get()?;
        if !response.is_success() {
            warn!(
                "event=document_load module=repo status=fallback reason=http_status http_status={}",
                response.status
            );
            return Ok(Vec::new());
        }

        let document = RemoteDocument::parse(&response.body).map_err(RepoError::InvalidDocument)?;
        if !matches!(document, RemoteDocument::Sequence(_) | RemoteDocument::Absent) {
            warn!("event=document_load module=repo status=fallback reason=not_an_array");
        }
        Ok(document.into_sequence())
    }

    /// Writes `records` as the whole document. Returns whether the store
    /// answered 200.
    pub fn replace_document(&self, records: &[Value]) -> RepoResult<bool> {
        let body = serde_json::to_string(records).map_err(RepoError::Serialization)?;
        let status = self.store.put(body)?;
        if status != STATUS_OK {
            warn!(
                "event=document_replace module=repo status=rejected http_status={} records={}",
                status,
                records.len()
            );
            return Ok(false);
        }
        Ok(true)
    }
}

impl<S: DocumentStore> ListingRepository for RemoteListingRepository<S> {
    fn fetch(&self) -> RepoResult<Table> {
        let started_at = Instant::now();
        let response = self.store.get()?;
        if !response.is_success() {
            info!(
                "event=listing_fetch module=repo status=empty reason=http_status http_status={} duration_ms={}",
                response.status,
                started_at.elapsed().as_millis()
            );
            return Ok(Table::empty());
        }

        let records = RemoteDocument::parse(&response.body)
            .map_err(RepoError::InvalidDocument)?
            .into_records();
        match Table::from_records(&records) {
            Ok(table) => {
                info!(
                    "event=listing_fetch module=repo status=ok rows={} duration_ms={}",
                    table.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(table)
            }
            Err(missing) => {
                error!(
                    "event=listing_fetch module=repo status=error error_code=schema_mismatch index={} field={}",
                    missing.index, missing.field
                );
                Err(missing.into())
            }
        }
    }

    fn append(&self, entry: &JobListing) -> RepoResult<bool> {
        let started_at = Instant::now();
        let mut records = self.load_document()?;
        records.push(serde_json::to_value(entry).map_err(RepoError::Serialization)?);
        let accepted = self.replace_document(&records)?;
        info!(
            "event=listing_append module=repo status={} records={} duration_ms={}",
            if accepted { "ok" } else { "rejected" },
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteListingRepository;
    use crate::model::listing::{CompanyRole, JobListing, Location};
    use crate::repo::listing_repo::ListingRepository;
    use crate::store::MemoryDocumentStore;
    use serde_json::json;

    #[test]
    fn append_discards_keyed_document_and_starts_a_new_array() {
        let store = MemoryDocumentStore::with_document(&json!({"x": {"companyName": "Old"}}));
        let repo = RemoteListingRepository::new(&store);

        let listing = JobListing::new("New", "1", Location::Chennai, CompanyRole::Freelance);
        assert!(repo.append(&listing).unwrap());

        let document = store.document().unwrap();
        assert_eq!(document.as_array().map(Vec::len), Some(1));
        assert_eq!(document[0]["companyName"], "New");
    }

    #[test]
    fn append_keeps_null_holes_in_existing_array() {
        let store = MemoryDocumentStore::with_document(&json!([null]));
        let repo = RemoteListingRepository::new(&store);

        let listing = JobListing::new("Acme", "1", Location::Bengaluru, CompanyRole::ProductBased);
        repo.append(&listing).unwrap();

        let document = store.document().unwrap();
        assert_eq!(document[0], serde_json::Value::Null);
        assert_eq!(document[1]["role"], "Product Based");
    }
}
