//! Record store and aggregation engine for the Cohort analytics API.
//!
//! # Architecture
//!
//! - [`store`] -- The [`RecordStore`]: one validated snapshot of people,
//!   replaced wholesale on every ingestion.
//! - [`aggregate`] -- Pure computations over a snapshot (superusers, top
//!   countries, team insights, logins per day).
//! - [`grouping`] -- Insertion-ordered grouping shared by the aggregators.
//! - [`timing`] -- Wall-clock measurement and rounding for reports.
//!
//! # Usage
//!
//! ```
//! use cohort_core::{RecordStore, aggregate};
//!
//! # async fn run() -> Result<(), cohort_core::CoreError> {
//! let store = RecordStore::new();
//! store.replace_all(Vec::new()).await?;
//!
//! let snapshot = store.read_all().await?;
//! let report = aggregate::superusers(&snapshot);
//! assert_eq!(report.total, 0);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod grouping;
pub mod store;
pub mod timing;

// Re-export primary types at crate root.
pub use aggregate::TeamAccumulator;
pub use error::CoreError;
pub use grouping::OrderedGroups;
pub use store::RecordStore;
