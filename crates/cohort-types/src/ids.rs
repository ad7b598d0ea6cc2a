//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Person records arrive with client-generated identifiers. The wrapper
//! keeps them from being mixed with other UUIDs and carries the version
//! check used during ingestion.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifier of an ingested person record.
///
/// Not unique across a snapshot: two records may share an id and are
/// both kept in ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PersonId(pub Uuid);

impl PersonId {
    /// Create a new random (version 4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether the identifier is a version 4 (random) UUID.
    pub const fn is_v4(self) -> bool {
        self.0.get_version_num() == 4
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PersonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PersonId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<PersonId> for Uuid {
    fn from(id: PersonId) -> Self {
        id.0
    }
}
