//! In-process document store.
//!
//! Holds the document text in memory and answers like the remote store:
//! an absent document reads back as `null`, a rejected write leaves the
//! stored text untouched.

use super::{DocumentStore, StoreError, StoreResponse, StoreResult, STATUS_OK};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct MemoryState {
    body: Option<String>,
    read_status: u16,
    write_status: u16,
    unavailable: bool,
    writes: usize,
}

/// Mutex-guarded document store living in the current process.
#[derive(Debug)]
pub struct MemoryDocumentStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    /// Creates a store with no document.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                body: None,
                read_status: STATUS_OK,
                write_status: STATUS_OK,
                unavailable: false,
                writes: 0,
            }),
        }
    }

    /// Creates a store already holding `document`.
    pub fn with_document(document: &Value) -> Self {
        let store = Self::new();
        store.set_raw_body(document.to_string());
        store
    }

    /// Replaces the stored text verbatim, bypassing the write counter.
    pub fn set_raw_body(&self, body: impl Into<String>) {
        self.lock().body = Some(body.into());
    }

    /// Stored document parsed as JSON (`None` when absent or not JSON).
    pub fn document(&self) -> Option<Value> {
        let state = self.lock();
        state
            .body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }

    /// Makes subsequent reads answer with `status` instead of 200.
    pub fn set_read_status(&self, status: u16) {
        self.lock().read_status = status;
    }

    /// Makes subsequent writes answer with `status`; non-200 writes are dropped.
    pub fn set_write_status(&self, status: u16) {
        self.lock().write_status = status;
    }

    /// Simulates an unreachable store for both reads and writes.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of accepted writes.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-call;
        // the state itself is still a plain value.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self) -> StoreResult<StoreResponse> {
        let state = self.lock();
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(StoreResponse {
            status: state.read_status,
            body: state.body.clone().unwrap_or_else(|| "null".to_string()),
        })
    }

    fn put(&self, body: String) -> StoreResult<u16> {
        let mut state = self.lock();
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        if state.write_status == STATUS_OK {
            state.body = Some(body);
            state.writes += 1;
        }
        Ok(state.write_status)
    }
}
