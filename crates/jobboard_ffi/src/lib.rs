//! FFI crate for Flutter bridge integration.
//!
//! # Responsibility
//! - Expose listing use-cases from `jobboard_core` through FRB.
//! - Keep FFI signatures simple and stable for codegen.

pub mod api;
