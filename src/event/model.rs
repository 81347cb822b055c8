use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GhStatsError, Result};

/// One record of the public event feed, as served on the wire.
///
/// `payload` stays raw JSON: its shape depends on `type` and is only
/// interpreted during classification.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: DateTime<Utc>,
    pub repo: RepoRef,
    #[serde(default)]
    pub payload: Value,
}

/// Repository reference attached to every feed event.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRef {
    pub name: String,
}

/// What a `CreateEvent` created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefType {
    Repository,
    Branch,
    Tag,
    /// Catch-all for ref types the feed may add.
    Other,
}

impl RefType {
    fn from_wire(s: &str) -> Self {
        match s {
            "repository" => Self::Repository,
            "branch" => Self::Branch,
            "tag" => Self::Tag,
            _ => Self::Other,
        }
    }
}

/// Structural classification of one event: one variant per platform type
/// whose payload carries data we count, payload-less variants for the rest
/// of the recognized set, and an explicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push { commits: u64 },
    PullRequest { commits: u64 },
    Create { ref_type: RefType },
    CommitComment,
    Delete,
    Fork,
    IssueComment,
    Issues,
    PullRequestReview,
    PullRequestReviewComment,
    Release,
    Watch,
    Unrecognized,
}

impl EventKind {
    /// Parses the type/payload pair of a raw event.
    ///
    /// # Errors
    /// Returns `MalformedEvent` when a declared type is missing the payload
    /// field its contract requires (e.g. `payload.size` on a `PushEvent`).
    pub fn parse(event_type: &str, payload: &Value) -> Result<Self> {
        match event_type {
            "PushEvent" => Ok(Self::Push {
                commits: require_u64(payload, &["size"], event_type)?,
            }),
            "PullRequestEvent" => Ok(Self::PullRequest {
                commits: require_u64(payload, &["pull_request", "commits"], event_type)?,
            }),
            "CreateEvent" => Ok(Self::Create {
                ref_type: RefType::from_wire(require_str(payload, &["ref_type"], event_type)?),
            }),
            "CommitCommentEvent" => Ok(Self::CommitComment),
            "DeleteEvent" => Ok(Self::Delete),
            "ForkEvent" => Ok(Self::Fork),
            "IssueCommentEvent" => Ok(Self::IssueComment),
            "IssuesEvent" => Ok(Self::Issues),
            "PullRequestReviewEvent" => Ok(Self::PullRequestReview),
            "PullRequestReviewCommentEvent" => Ok(Self::PullRequestReviewComment),
            "ReleaseEvent" => Ok(Self::Release),
            "WatchEvent" => Ok(Self::Watch),
            _ => Ok(Self::Unrecognized),
        }
    }
}

fn lookup<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(payload, |value, key| value.get(key))
}

fn require_u64(payload: &Value, path: &[&str], event_type: &str) -> Result<u64> {
    lookup(payload, path)
        .and_then(Value::as_u64)
        .ok_or_else(|| GhStatsError::MalformedEvent {
            event_type: event_type.to_string(),
            reason: format!("missing or non-integer payload.{}", path.join(".")),
        })
}

fn require_str<'a>(payload: &'a Value, path: &[&str], event_type: &str) -> Result<&'a str> {
    lookup(payload, path)
        .and_then(Value::as_str)
        .ok_or_else(|| GhStatsError::MalformedEvent {
            event_type: event_type.to_string(),
            reason: format!("missing or non-string payload.{}", path.join(".")),
        })
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
