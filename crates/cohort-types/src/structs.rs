//! Ingested record structs: [`Person`] and its nested [`Team`],
//! [`Project`], and [`LogEntry`].
//!
//! Wire keys follow the established API payloads (`nome`, `equipe`,
//! `acao`, ...). English field names are accepted as aliases on input
//! so clients can send either form.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::ids::PersonId;

/// Log action that counts a person as active on a given day.
pub const LOGIN_ACTION: &str = "login";

/// A project carried by a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Project {
    /// Project name.
    #[serde(rename = "nome", alias = "name")]
    #[ts(rename = "nome")]
    pub name: String,
    /// Whether the project has been completed.
    #[serde(rename = "concluido", alias = "completed")]
    #[ts(rename = "concluido")]
    pub completed: bool,
}

/// The team a person belongs to, as seen from that person's record.
///
/// Team data is denormalized: every member carries their own copy of the
/// team name, leader flag, and project list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Team {
    /// Team name, used as the grouping key for team insights.
    #[serde(rename = "nome", alias = "name")]
    #[ts(rename = "nome")]
    pub name: String,
    /// Whether this member leads the team.
    #[serde(rename = "lider", alias = "isLeader", alias = "is_leader")]
    #[ts(rename = "lider")]
    pub is_leader: bool,
    /// Projects as listed on this member's record.
    #[serde(rename = "projetos", alias = "projects")]
    #[ts(rename = "projetos")]
    pub projects: Vec<Project>,
}

impl Team {
    /// Number of projects on this record marked completed.
    pub fn completed_projects(&self) -> usize {
        self.projects.iter().filter(|p| p.completed).count()
    }
}

/// A single activity log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Calendar day of the action (`YYYY-MM-DD`).
    #[serde(rename = "data", alias = "date")]
    #[ts(rename = "data")]
    pub date: NaiveDate,
    /// Free-form action name, e.g. `login` or `logout`.
    #[serde(rename = "acao", alias = "action")]
    #[ts(rename = "acao")]
    pub action: String,
}

impl LogEntry {
    /// Whether this entry records a login.
    pub fn is_login(&self) -> bool {
        self.action == LOGIN_ACTION
    }
}

/// A person record as ingested through `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct Person {
    /// Client-assigned identifier. Must be a version 4 UUID.
    #[validate(custom(function = "validate_person_id"))]
    pub id: PersonId,
    /// Display name.
    #[serde(rename = "nome", alias = "name")]
    #[ts(rename = "nome")]
    pub name: String,
    /// Age in years.
    #[serde(rename = "idade", alias = "age")]
    #[ts(rename = "idade", type = "number")]
    pub age: i64,
    /// Engagement score.
    #[ts(type = "number")]
    pub score: i64,
    /// Whether the person is currently active.
    #[serde(rename = "ativo", alias = "active")]
    #[ts(rename = "ativo")]
    pub active: bool,
    /// Country name or code, used verbatim as a grouping key.
    #[serde(rename = "pais", alias = "country")]
    #[ts(rename = "pais")]
    pub country: String,
    /// Team membership.
    #[serde(rename = "equipe", alias = "team")]
    #[ts(rename = "equipe")]
    pub team: Team,
    /// Activity log in recorded order.
    pub logs: Vec<LogEntry>,
}

/// Reject identifiers that are not random (version 4) UUIDs.
fn validate_person_id(id: &PersonId) -> Result<(), ValidationError> {
    if id.is_v4() {
        Ok(())
    } else {
        Err(ValidationError::new("uuid_version")
            .with_message(Cow::Owned(format!("{id} is not a version 4 UUID"))))
    }
}
