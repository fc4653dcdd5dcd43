//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into form/view/export use-cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod listing_service;
