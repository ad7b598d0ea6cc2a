//! Read-only aggregations over a snapshot of people.
//!
//! Every aggregator takes the snapshot as a slice, never mutates it, and
//! returns a [`Report`] stamped with the time spent computing it. Group
//! outputs follow the order in which each key first appears in the
//! snapshot.
//!
//! | Aggregator | Filter | Grouping |
//! |------------|--------|----------|
//! | [`superusers`] | `score >= 900` and active | none |
//! | [`top_countries`] | `score > 800` | country, top 5 by count |
//! | [`team_insights`] | none | team name |
//! | [`active_users_per_day`] | action is `login` | log date, optional minimum |

use chrono::NaiveDate;
use cohort_types::{CountryCount, DailyLogins, Person, Report, TeamInsight};
use tracing::debug;

use crate::error::CoreError;
use crate::grouping::OrderedGroups;
use crate::timing::{measure, round_hundredths};

/// Minimum score (inclusive) for a superuser.
pub const SUPERUSER_MIN_SCORE: i64 = 900;

/// Score a person must exceed to count towards their country.
pub const TOP_COUNTRY_SCORE_FLOOR: i64 = 800;

/// Number of countries returned by [`top_countries`].
pub const TOP_COUNTRIES_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Superusers
// ---------------------------------------------------------------------------

/// Whether a person qualifies as a superuser.
pub const fn is_superuser(person: &Person) -> bool {
    person.score >= SUPERUSER_MIN_SCORE && person.active
}

/// Active people with a score of at least 900, in snapshot order.
pub fn superusers(people: &[Person]) -> Report<Person> {
    let report = measure(|| people.iter().filter(|p| is_superuser(p)).cloned().collect());
    debug!(
        total = report.total,
        processing_time_ms = report.processing_time_ms,
        "superusers computed"
    );
    report
}

// ---------------------------------------------------------------------------
// Top countries
// ---------------------------------------------------------------------------

/// The five countries with the most people scoring above 800.
///
/// Sorted by descending count; ties keep the order in which the countries
/// first appear in the snapshot.
pub fn top_countries(people: &[Person]) -> Report<CountryCount> {
    let report = measure(|| {
        let mut counts: OrderedGroups<&str, usize> = OrderedGroups::new();
        for person in people.iter().filter(|p| p.score > TOP_COUNTRY_SCORE_FLOOR) {
            let count = counts.entry(person.country.as_str());
            *count = count.saturating_add(1);
        }

        let mut ranked = counts.into_ordered();
        // Stable sort: equal counts stay in first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(TOP_COUNTRIES_LIMIT);

        ranked
            .into_iter()
            .map(|(country, count)| CountryCount(country.to_owned(), count))
            .collect()
    });
    debug!(
        total = report.total,
        processing_time_ms = report.processing_time_ms,
        "top countries computed"
    );
    report
}

// ---------------------------------------------------------------------------
// Team insights
// ---------------------------------------------------------------------------

/// Running totals for one team.
///
/// The default value is an empty team: every counter at zero, which
/// yields an active percentage of 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamAccumulator {
    /// Members counted so far.
    pub members: usize,
    /// Members flagged as leader.
    pub leaders: usize,
    /// Completed projects summed over every member's project list.
    pub completed_projects: usize,
    /// Members flagged as active.
    pub active: usize,
}

impl TeamAccumulator {
    /// Fold one member's record into the totals.
    pub fn record(&mut self, person: &Person) {
        self.members = self.members.saturating_add(1);
        if person.team.is_leader {
            self.leaders = self.leaders.saturating_add(1);
        }
        self.completed_projects = self
            .completed_projects
            .saturating_add(person.team.completed_projects());
        if person.active {
            self.active = self.active.saturating_add(1);
        }
    }

    /// Active members as a percentage of all members, two decimals.
    /// Returns 0 for an empty team.
    pub fn active_percentage(&self) -> f64 {
        if self.members == 0 {
            return 0.0;
        }
        // Counts are bounded by the snapshot size; safe to represent as f64.
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.active as f64 / self.members as f64;
        round_hundredths(ratio * 100.0)
    }

    /// Build the output row for this team.
    pub fn into_insight(self, team_name: String) -> TeamInsight {
        TeamInsight {
            team_name,
            total_members: self.members,
            leaders: self.leaders,
            completed_projects: self.completed_projects,
            active_percentage: self.active_percentage(),
        }
    }
}

/// Per-team member, leader, completed-project, and activity statistics.
pub fn team_insights(people: &[Person]) -> Report<TeamInsight> {
    let report = measure(|| {
        let mut teams: OrderedGroups<&str, TeamAccumulator> = OrderedGroups::new();
        for person in people {
            teams.entry(person.team.name.as_str()).record(person);
        }

        teams
            .into_ordered()
            .into_iter()
            .map(|(name, totals)| totals.into_insight(name.to_owned()))
            .collect()
    });
    debug!(
        total = report.total,
        processing_time_ms = report.processing_time_ms,
        "team insights computed"
    );
    report
}

// ---------------------------------------------------------------------------
// Active users per day
// ---------------------------------------------------------------------------

/// Validate the optional `min` filter for [`active_users_per_day`].
///
/// Negative values are rejected before any computation happens.
pub fn parse_min_logins(raw: Option<i64>) -> Result<Option<usize>, CoreError> {
    raw.map(|value| {
        usize::try_from(value).map_err(|e| {
            CoreError::InvalidParameter(format!("min must be a non-negative integer, got {value}: {e}"))
        })
    })
    .transpose()
}

/// Login entries per day across every person's log.
///
/// With `min_logins`, only days with at least that many logins are kept.
/// Without it, every day with at least one login is returned.
pub fn active_users_per_day(people: &[Person], min_logins: Option<usize>) -> Report<DailyLogins> {
    let report = measure(|| {
        let mut days: OrderedGroups<NaiveDate, usize> = OrderedGroups::new();
        for entry in people
            .iter()
            .flat_map(|p| p.logs.iter())
            .filter(|entry| entry.is_login())
        {
            let logins = days.entry(entry.date);
            *logins = logins.saturating_add(1);
        }

        days.into_ordered()
            .into_iter()
            .filter(|(_, logins)| min_logins.is_none_or(|min| *logins >= min))
            .map(|(date, logins)| DailyLogins { date, logins })
            .collect()
    });
    debug!(
        total = report.total,
        min_logins,
        processing_time_ms = report.processing_time_ms,
        "active users per day computed"
    );
    report
}
