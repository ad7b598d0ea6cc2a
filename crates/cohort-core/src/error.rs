//! Error types for the `cohort-core` crate.
//!
//! All fallible store and aggregation operations return [`CoreError`].

/// Errors raised by the record store and the aggregators.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record in an ingestion batch failed validation. The whole batch
    /// is rejected and the previous snapshot is kept.
    #[error("record {index} failed validation: {message}")]
    Validation {
        /// Zero-based position of the first invalid record in the batch.
        index: usize,
        /// Human-readable description of the failure.
        message: String,
    },

    /// A query ran before any snapshot was ingested.
    #[error("no people cached")]
    EmptyStore,

    /// A query parameter was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
