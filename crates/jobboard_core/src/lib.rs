//! Core domain logic for the job board.
//! This crate is the single source of truth for listing storage rules.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{Backend, ConfigError, JobBoardConfig};
pub use export::{read_table, save_table, write_table, ExportError, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::listing::{CompanyRole, JobListing, ListingValidationError, Location};
pub use model::table::{Cell, Table, COLUMNS};
pub use repo::listing_repo::{ListingRepository, RepoError, RepoResult};
pub use repo::open_repository;
pub use repo::remote_repo::RemoteListingRepository;
pub use repo::sqlite_repo::SqliteListingRepository;
pub use service::listing_service::{ListingForm, ListingService, ListingServiceError};
pub use store::{DocumentStore, HttpDocumentStore, MemoryDocumentStore, StoreError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
