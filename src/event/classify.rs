use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::Result;

use super::model::{EventKind, RawEvent, RefType};

/// Event type names counted as activity even without a numeric payload.
///
/// `PushEvent` is deliberately absent: its weight comes from the payload
/// commit count, not from set membership.
pub const RECOGNIZED_EVENTS: [&str; 11] = [
    "CommitCommentEvent", // Commit via the web UI
    "CreateEvent",
    "DeleteEvent",
    "ForkEvent",
    "IssueCommentEvent",
    "IssuesEvent",
    "PullRequestEvent",
    "PullRequestReviewEvent",
    "PullRequestReviewCommentEvent",
    "ReleaseEvent", // Publish a release
    "WatchEvent",   // Star a repo
];

/// A classified event: structural kind plus the derived counting facts.
///
/// All counting decisions are made once here; the aggregator only reads
/// them back.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub repo_name: String,
    weight: u64,
    recognized: bool,
}

impl Event {
    /// Commit-equivalent contribution of this event.
    #[must_use]
    pub const fn weight(&self) -> u64 {
        self.weight
    }

    /// Whether the event type counts as activity at all.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        self.recognized
    }

    /// Whether this event marks the creation of a new repository.
    #[must_use]
    pub const fn is_new_repo(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Create {
                ref_type: RefType::Repository
            }
        )
    }
}

/// Pure per-event classification against a recognized-type allowlist.
///
/// The allowlist is injected at construction so tests can run synthetic
/// event vocabularies; [`Classifier::new`] uses [`RECOGNIZED_EVENTS`].
#[derive(Debug, Clone)]
pub struct Classifier {
    recognized: HashSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self::with_recognized(RECOGNIZED_EVENTS.iter().map(ToString::to_string))
    }

    #[must_use]
    pub fn with_recognized<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            recognized: names.into_iter().collect(),
        }
    }

    /// Classifies one raw event.
    ///
    /// # Errors
    /// Returns `MalformedEvent` when a declared type carries a payload that
    /// violates its contract; nothing is ever defaulted silently.
    pub fn classify(&self, raw: RawEvent) -> Result<Event> {
        let kind = EventKind::parse(&raw.event_type, &raw.payload)?;

        // Commit-bearing kinds are recognized regardless of the allowlist.
        let recognized = matches!(
            kind,
            EventKind::Push { .. } | EventKind::PullRequest { .. }
        ) || self.recognized.contains(&raw.event_type);

        let weight = match kind {
            EventKind::Push { commits } | EventKind::PullRequest { commits } => commits,
            _ if recognized => 1,
            _ => 0,
        };

        Ok(Event {
            kind,
            type_name: raw.event_type,
            created_at: raw.created_at,
            repo_name: raw.repo.name,
            weight,
            recognized,
        })
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
