//! In-memory record store holding the current snapshot of people.
//!
//! The snapshot is an immutable `Arc<[Person]>` behind a read-write lock.
//! Ingestion validates a whole batch and then swaps the `Arc` under the
//! write lock; readers clone the `Arc` under the read lock and aggregate
//! outside it. A reader therefore sees either the previous snapshot or the
//! new one, never a mix of both.

use std::sync::Arc;

use cohort_types::Person;
use tokio::sync::RwLock;
use tracing::{info, warn};
use validator::Validate;

use crate::error::CoreError;

/// Owned, injectable holder of the current snapshot.
///
/// Starts empty. Queries against an empty store fail with
/// [`CoreError::EmptyStore`]; an ingested empty batch is a valid (empty)
/// snapshot.
#[derive(Debug, Default)]
pub struct RecordStore {
    snapshot: RwLock<Option<Arc<[Person]>>>,
}

impl RecordStore {
    /// Create a store with no snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `records` and, if every record passes, replace the
    /// snapshot with them. Returns the number of records stored.
    ///
    /// On failure the previous snapshot is left untouched.
    pub async fn replace_all(&self, records: Vec<Person>) -> Result<usize, CoreError> {
        if let Err(e) = validate_batch(&records) {
            warn!(error = %e, batch_size = records.len(), "ingestion rejected");
            return Err(e);
        }

        let count = records.len();
        let snapshot: Arc<[Person]> = Arc::from(records);
        *self.snapshot.write().await = Some(snapshot);

        info!(count, "snapshot replaced");
        Ok(count)
    }

    /// Return the current snapshot.
    pub async fn read_all(&self) -> Result<Arc<[Person]>, CoreError> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(Arc::clone)
            .ok_or(CoreError::EmptyStore)
    }
}

/// Check every record, reporting the first failure with its position.
fn validate_batch(records: &[Person]) -> Result<(), CoreError> {
    for (index, person) in records.iter().enumerate() {
        person.validate().map_err(|e| CoreError::Validation {
            index,
            message: e.to_string(),
        })?;
    }
    Ok(())
}
