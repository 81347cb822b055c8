use serde::Serialize;

use crate::error::Result;
use crate::stats::StatBlock;

use super::ReportFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    block: &'a StatBlock,
    /// Pre-resolved so consumers don't re-implement the tie-breaking rule.
    most_active_repo: Option<MostActiveRepo<'a>>,
}

#[derive(Serialize)]
struct MostActiveRepo<'a> {
    name: &'a str,
    interactions: u64,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, stats: &StatBlock) -> Result<String> {
        let most_active_repo = stats
            .most_active_repo()
            .ok()
            .map(|(name, interactions)| MostActiveRepo { name, interactions });

        let report = JsonReport {
            block: stats,
            most_active_repo,
        };

        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
