//! Whole-document transport to the remote JSON store.
//!
//! # Responsibility
//! - Abstract "GET the full document" and "PUT the full document" behind
//!   one trait so repositories stay independent of the HTTP client.
//! - Report transport failures separately from HTTP status outcomes.
//!
//! # Invariants
//! - A store never interprets the document body; it moves raw JSON text.
//! - Only HTTP 200 counts as success.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod http;
mod memory;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

/// Status code the remote store uses for a successful read or write.
pub const STATUS_OK: u16 = 200;

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport-level failure: the store could not be reached or answered
/// with an unreadable response.
#[derive(Debug)]
pub enum StoreError {
    Http(reqwest::Error),
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "remote store request failed: {err}"),
            Self::Unavailable(reason) => write!(f, "remote store unavailable: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Raw response of a whole-document read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: String,
}

impl StoreResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Whole-document read/write contract.
pub trait DocumentStore {
    /// Reads the full document.
    fn get(&self) -> StoreResult<StoreResponse>;
    /// Replaces the full document with `body` and returns the status code.
    fn put(&self, body: String) -> StoreResult<u16>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn get(&self) -> StoreResult<StoreResponse> {
        (**self).get()
    }

    fn put(&self, body: String) -> StoreResult<u16> {
        (**self).put(body)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn get(&self) -> StoreResult<StoreResponse> {
        (**self).get()
    }

    fn put(&self, body: String) -> StoreResult<u16> {
        (**self).put(body)
    }
}
