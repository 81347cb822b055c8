use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhStatsError {
    #[error("Malformed {event_type} payload: {reason}")]
    MalformedEvent { event_type: String, reason: String },

    #[error("Transient fetch failure: {0}")]
    TransientFetch(String),

    #[error("Failed to fetch event feed: {0}")]
    HardFetch(String),

    #[error("No repository activity to rank")]
    EmptyAggregate,

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl GhStatsError {
    /// Whether the caller may retry the whole run and expect it to succeed.
    ///
    /// Only network-level failures (timeouts, connection errors, rate
    /// limiting) qualify. Malformed upstream data never does.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFetch(_))
    }
}

pub type Result<T> = std::result::Result<T, GhStatsError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
