//! Listing use-case service.
//!
//! # Responsibility
//! - Apply the entry form's presence rules before anything is stored.
//! - Turn repository outcomes into submit/view/export results.
//!
//! # Invariants
//! - Invalid form input never reaches the repository.
//! - A rejected write is an error here, while repositories report it as
//!   `Ok(false)`.
//! - Service layer remains storage-agnostic.

use crate::export::{save_table, write_table, ExportError};
use crate::model::listing::{CompanyRole, JobListing, ListingValidationError, Location};
use crate::model::table::Table;
use crate::repo::listing_repo::{ListingRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Notice shown after a successful submit.
pub const UPLOAD_OK_NOTICE: &str = "Data uploaded successfully.";
/// Notice shown when the store rejected the write.
pub const UPLOAD_FAILED_NOTICE: &str = "Failed to upload data.";
/// Notice shown when the required text fields are blank.
pub const MISSING_FIELDS_NOTICE: &str = "Please enter both Company Name and Phone Number.";
/// Notice shown instead of an empty table.
pub const NO_DATA_NOTICE: &str = "No data found.";

/// Service error for listing use-cases.
#[derive(Debug)]
pub enum ListingServiceError {
    /// Form input failed presence checks.
    Validation(ListingValidationError),
    /// The store answered the write with a non-success status.
    WriteRejected,
    /// Nothing stored, so there is nothing to export.
    NoData,
    Repo(RepoError),
    Export(ExportError),
}

impl ListingServiceError {
    /// Short user-facing notice for this failure.
    pub fn notice(&self) -> String {
        match self {
            Self::Validation(
                ListingValidationError::EmptyCompanyName | ListingValidationError::EmptyPhoneNumber,
            ) => MISSING_FIELDS_NOTICE.to_string(),
            Self::WriteRejected => UPLOAD_FAILED_NOTICE.to_string(),
            Self::NoData => NO_DATA_NOTICE.to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for ListingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::WriteRejected => write!(f, "listing store rejected the write"),
            Self::NoData => write!(f, "no listings to export"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::WriteRejected | Self::NoData => None,
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<ListingValidationError> for ListingServiceError {
    fn from(value: ListingValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ListingServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for ListingServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Raw entry form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingForm {
    pub company_name: String,
    pub phone_number: String,
    pub location: Location,
    pub role: CompanyRole,
    pub cyber_security: bool,
    pub python_backend: bool,
    pub net_backend: bool,
    pub ai_developer: bool,
}

impl ListingForm {
    /// Trims text fields and checks presence rules.
    pub fn into_listing(self) -> Result<JobListing, ListingValidationError> {
        let listing = JobListing {
            company_name: self.company_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            location: self.location,
            role: self.role,
            cyber_security: self.cyber_security,
            python_backend: self.python_backend,
            net_backend: self.net_backend,
            ai_developer: self.ai_developer,
        };
        listing.validate()?;
        Ok(listing)
    }
}

/// Listing service facade over repository implementations.
pub struct ListingService<R: ListingRepository> {
    repo: R,
}

impl<R: ListingRepository> ListingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the form and appends the listing.
    ///
    /// Returns the stored listing on success.
    pub fn submit(&self, form: ListingForm) -> Result<JobListing, ListingServiceError> {
        let listing = match form.into_listing() {
            Ok(listing) => listing,
            Err(err) => {
                warn!("event=listing_submit module=service status=invalid reason={err}");
                return Err(err.into());
            }
        };

        if !self.repo.append(&listing)? {
            warn!("event=listing_submit module=service status=rejected");
            return Err(ListingServiceError::WriteRejected);
        }
        info!("event=listing_submit module=service status=ok");
        Ok(listing)
    }

    /// Loads the projected listing table.
    pub fn load_table(&self) -> RepoResult<Table> {
        self.repo.fetch()
    }

    /// Loads the table and encodes it as an `.xlsx` workbook.
    ///
    /// Fails with `NoData` when nothing is stored.
    pub fn export_bytes(&self) -> Result<Vec<u8>, ListingServiceError> {
        let table = self.exportable_table()?;
        Ok(write_table(&table)?)
    }

    /// Loads the table and writes it to `path`. Returns the exported row count.
    ///
    /// Fails with `NoData` when nothing is stored; no file is written then.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<usize, ListingServiceError> {
        let table = self.exportable_table()?;
        save_table(&table, path)?;
        Ok(table.len())
    }

    fn exportable_table(&self) -> Result<Table, ListingServiceError> {
        let table = self.repo.fetch()?;
        if table.is_empty() {
            info!("event=listing_export module=service status=empty");
            return Err(ListingServiceError::NoData);
        }
        Ok(table)
    }
}
