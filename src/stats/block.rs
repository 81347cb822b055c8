use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{GhStatsError, Result};

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The "today" snapshot a whole run is measured against.
///
/// Captured once at run start so a slow multi-minute pagination does not
/// have its year/month/day boundary shift mid-run. All comparisons are in
/// UTC, matching the feed's `created_at` timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ReferenceDate {
    /// Snapshot of the current UTC date.
    #[must_use]
    pub fn today() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Abbreviated month name ("Jan" .. "Dec").
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_ABBREV.get(i))
            .copied()
            .unwrap_or("???")
    }

    #[must_use]
    pub fn matches_year(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp.year() == self.year
    }

    /// Full year+month comparison. Month-only comparison would double-count
    /// events from the same month of a previous year.
    #[must_use]
    pub fn matches_month(&self, timestamp: DateTime<Utc>) -> bool {
        self.matches_year(timestamp) && timestamp.month() == self.month
    }

    /// Full calendar-date comparison.
    #[must_use]
    pub fn matches_day(&self, timestamp: DateTime<Utc>) -> bool {
        self.matches_month(timestamp) && timestamp.day() == self.day
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Aggregated activity statistics for one run.
///
/// Owned exclusively by the [`Aggregator`](super::Aggregator) while the
/// event stream is folded, mutated monotonically (increments only), and
/// handed to the presentation layer once pagination ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatBlock {
    /// Cumulative weight of all recognized events in the reference year.
    pub total_count: u64,
    /// Cumulative weight restricted to the reference calendar month.
    pub month_count: u64,
    /// Cumulative weight restricted to the reference calendar day.
    pub daily_count: u64,
    /// Cumulative weight per repository, all in-year events.
    /// Insertion-ordered so most-active ties resolve deterministically.
    pub per_repo: IndexMap<String, u64>,
    /// Cumulative weight per repository, restricted to today.
    pub daily_per_repo: IndexMap<String, u64>,
    /// `CreateEvent`s with `ref_type == "repository"`, in-year.
    pub new_repo_count: u64,
    /// Occurrence count per recognized event type, restricted to today.
    /// Each event counts once regardless of weight.
    pub events_by_type: IndexMap<String, u64>,
    /// The snapshot every date predicate was evaluated against.
    pub reference: ReferenceDate,
    /// True iff the run was cancelled between pages and this block holds
    /// a prefix of the year's events.
    pub partial: bool,
}

impl StatBlock {
    #[must_use]
    pub fn new(reference: ReferenceDate) -> Self {
        Self {
            total_count: 0,
            month_count: 0,
            daily_count: 0,
            per_repo: IndexMap::new(),
            daily_per_repo: IndexMap::new(),
            new_repo_count: 0,
            events_by_type: IndexMap::new(),
            reference,
            partial: false,
        }
    }

    /// The `(name, count)` pair with the maximum per-repo count.
    ///
    /// Ties resolve to the first-encountered repository (insertion order).
    ///
    /// # Errors
    /// Returns `EmptyAggregate` when no repository recorded any weight.
    pub fn most_active_repo(&self) -> Result<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (name, &count) in &self.per_repo {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((name, count)),
            }
        }
        best.ok_or(GhStatsError::EmptyAggregate)
    }
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
