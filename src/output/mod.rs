mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::FetchProgress;
pub use text::TextFormatter;

use crate::error::Result;
use crate::stats::StatBlock;

/// Trait for rendering the final statistics block.
pub trait ReportFormatter {
    /// Format the aggregated statistics into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, stats: &StatBlock) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
