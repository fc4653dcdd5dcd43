//! Job listing domain model.
//!
//! # Responsibility
//! - Define the canonical record submitted by the entry form.
//! - Own the wire naming used by the remote JSON document.
//!
//! # Invariants
//! - The wire shape is a flat object with exactly eight camelCase keys.
//! - `location` and `role` serialize as their display text.
//! - `validate()` only checks presence of the two free-text fields.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// City a listing is located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Coimbatore,
    Hyderabad,
    Bengaluru,
    Chennai,
}

impl Location {
    /// All selectable locations, in form order.
    pub const ALL: [Location; 4] = [
        Location::Coimbatore,
        Location::Hyderabad,
        Location::Bengaluru,
        Location::Chennai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coimbatore => "Coimbatore",
            Self::Hyderabad => "Hyderabad",
            Self::Bengaluru => "Bengaluru",
            Self::Chennai => "Chennai",
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ListingValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ListingValidationError::UnknownLocation(normalized.to_string()))
    }
}

/// Kind of company offering the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyRole {
    Freelance,
    #[serde(rename = "Product Based")]
    ProductBased,
    #[serde(rename = "Service Based")]
    ServiceBased,
}

impl CompanyRole {
    /// All selectable company roles, in form order.
    pub const ALL: [CompanyRole; 3] = [
        CompanyRole::Freelance,
        CompanyRole::ProductBased,
        CompanyRole::ServiceBased,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freelance => "Freelance",
            Self::ProductBased => "Product Based",
            Self::ServiceBased => "Service Based",
        }
    }
}

impl Display for CompanyRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanyRole {
    type Err = ListingValidationError;

    /// Accepts the display text (`Product Based`) as well as dashed or
    /// compact spellings (`product-based`, `productbased`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let compact: String = normalized
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        Self::ALL
            .into_iter()
            .find(|candidate| {
                let expected: String = candidate
                    .as_str()
                    .chars()
                    .filter(|ch| ch.is_ascii_alphanumeric())
                    .collect();
                expected.eq_ignore_ascii_case(&compact)
            })
            .ok_or_else(|| ListingValidationError::UnknownRole(normalized.to_string()))
    }
}

/// Validation failures for listing input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingValidationError {
    /// `companyName` is empty or whitespace only.
    EmptyCompanyName,
    /// `phoneNumber` is empty or whitespace only.
    EmptyPhoneNumber,
    UnknownLocation(String),
    UnknownRole(String),
}

impl Display for ListingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCompanyName => write!(f, "company name must not be empty"),
            Self::EmptyPhoneNumber => write!(f, "phone number must not be empty"),
            Self::UnknownLocation(value) => write!(
                f,
                "unknown location `{value}`; expected Coimbatore|Hyderabad|Bengaluru|Chennai"
            ),
            Self::UnknownRole(value) => write!(
                f,
                "unknown company role `{value}`; expected Freelance|Product Based|Service Based"
            ),
        }
    }
}

impl Error for ListingValidationError {}

/// One job-listing entry as stored in the remote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub company_name: String,
    pub phone_number: String,
    pub location: Location,
    pub role: CompanyRole,
    pub cyber_security: bool,
    pub python_backend: bool,
    pub net_backend: bool,
    pub ai_developer: bool,
}

impl JobListing {
    /// Creates a listing with all skill flags cleared.
    pub fn new(
        company_name: impl Into<String>,
        phone_number: impl Into<String>,
        location: Location,
        role: CompanyRole,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            phone_number: phone_number.into(),
            location,
            role,
            cyber_security: false,
            python_backend: false,
            net_backend: false,
            ai_developer: false,
        }
    }

    /// Checks the presence rules the entry form enforces before submitting.
    ///
    /// Repositories never call this; they store whatever they are given.
    pub fn validate(&self) -> Result<(), ListingValidationError> {
        if self.company_name.trim().is_empty() {
            return Err(ListingValidationError::EmptyCompanyName);
        }
        if self.phone_number.trim().is_empty() {
            return Err(ListingValidationError::EmptyPhoneNumber);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CompanyRole, JobListing, ListingValidationError, Location};

    #[test]
    fn role_parses_display_and_dashed_spellings() {
        assert_eq!(
            "Product Based".parse::<CompanyRole>().unwrap(),
            CompanyRole::ProductBased
        );
        assert_eq!(
            "service-based".parse::<CompanyRole>().unwrap(),
            CompanyRole::ServiceBased
        );
        assert!("Remote".parse::<CompanyRole>().is_err());
    }

    #[test]
    fn location_parse_is_case_insensitive() {
        assert_eq!(" chennai ".parse::<Location>().unwrap(), Location::Chennai);
        let err = "Pune".parse::<Location>().unwrap_err();
        assert_eq!(err, ListingValidationError::UnknownLocation("Pune".into()));
    }

    #[test]
    fn validate_requires_company_and_phone() {
        let mut listing = JobListing::new("  ", "555", Location::Hyderabad, CompanyRole::Freelance);
        assert_eq!(
            listing.validate().unwrap_err(),
            ListingValidationError::EmptyCompanyName
        );

        listing.company_name = "Acme".into();
        listing.phone_number = String::new();
        assert_eq!(
            listing.validate().unwrap_err(),
            ListingValidationError::EmptyPhoneNumber
        );
    }
}
