//! Shared application state for the Cohort API server.
//!
//! [`AppState`] owns the [`RecordStore`] that every handler reads from.
//! It is constructed by the caller and injected into the router, so each
//! server (or test) gets its own isolated snapshot.

use cohort_core::RecordStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Default)]
pub struct AppState {
    /// The current snapshot of ingested people.
    pub store: RecordStore,
}

impl AppState {
    /// Create a new application state with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an application state around an existing store.
    pub const fn with_store(store: RecordStore) -> Self {
        Self { store }
    }
}
