//! Domain model for job listings and their tabular projection.
//!
//! # Responsibility
//! - Define the listing record submitted by the entry form.
//! - Define the fixed-column table used for display and export.
//!
//! # Invariants
//! - Listings carry no identifier; position in the document is incidental.

pub mod listing;
pub mod table;
