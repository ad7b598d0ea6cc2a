//! Shared type definitions for the Cohort analytics API.
//!
//! This crate is the single source of truth for the record and report
//! types used across the workspace. Types flow to `TypeScript` via
//! `ts-rs` for API clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for person identifiers
//! - [`structs`] -- Ingested records (`Person`, `Team`, `Project`, `LogEntry`)
//! - [`reports`] -- Aggregation result rows and the [`Report`] envelope

pub mod ids;
pub mod reports;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::PersonId;
pub use reports::{CountryCount, DailyLogins, Report, TeamInsight};
pub use structs::{LOGIN_ACTION, LogEntry, Person, Project, Team};
