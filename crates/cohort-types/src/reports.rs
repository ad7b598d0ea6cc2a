//! Result rows and the response envelope returned by the query endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Envelope shared by every aggregation endpoint.
///
/// `total` is always `data.len()`; it is carried separately because
/// clients read it without walking the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Report<T> {
    /// Wall-clock time spent computing `data`, in milliseconds rounded to
    /// two decimal places.
    pub processing_time_ms: f64,
    /// Number of rows in `data`.
    pub total: usize,
    /// The computed rows.
    pub data: Vec<T>,
}

/// Number of high-score people in a country.
///
/// Serialized as a two-element array: `["BR", 2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CountryCount(pub String, pub usize);

impl CountryCount {
    /// The country key.
    pub fn country(&self) -> &str {
        &self.0
    }

    /// How many qualifying people were counted for the country.
    pub const fn count(&self) -> usize {
        self.1
    }
}

/// Per-team statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TeamInsight {
    /// Team name as it appears on member records.
    pub team_name: String,
    /// Members counted under this team name.
    #[serde(rename = "total_membros")]
    pub total_members: usize,
    /// Members flagged as team leader.
    #[serde(rename = "lideres")]
    pub leaders: usize,
    /// Completed projects summed across every member's project list.
    #[serde(rename = "projetos_concluidos")]
    pub completed_projects: usize,
    /// Share of active members, 0 to 100 with two decimals.
    #[serde(rename = "percentagem_ativos")]
    pub active_percentage: f64,
}

/// Number of login entries recorded on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DailyLogins {
    /// The calendar day.
    #[serde(rename = "data")]
    pub date: NaiveDate,
    /// Login entries on that day.
    pub logins: usize,
}
