use std::fmt::Write;

use crate::error::Result;
use crate::stats::StatBlock;

use super::ReportFormatter;

/// Renders the report as the terminal user reads it.
///
/// The short form is one line of yearly interactions; `extended` adds the
/// monthly, per-repo and daily breakdowns.
pub struct TextFormatter {
    extended: bool,
}

impl TextFormatter {
    #[must_use]
    pub const fn new(extended: bool) -> Self {
        Self { extended }
    }

    fn write_extended(output: &mut String, stats: &StatBlock) {
        let _ = writeln!(
            output,
            "Monthly interactions ({}): {}",
            stats.reference.month_name(),
            stats.month_count
        );

        // An empty aggregate is "no activity", not a failure.
        match stats.most_active_repo() {
            Ok((name, count)) => {
                let _ = writeln!(output, "Most active repo ({name}): {count}");
            }
            Err(_) => {
                let _ = writeln!(output, "Most active repo: no public activity");
            }
        }

        let _ = writeln!(output, "Repos created this year: {}", stats.new_repo_count);
        let _ = writeln!(output, "Interactions today: {}", stats.daily_count);

        if !stats.daily_per_repo.is_empty() {
            let _ = writeln!(output, "Today by repo:");
            for (name, count) in &stats.daily_per_repo {
                let _ = writeln!(output, "  {name}: {count}");
            }
        }

        if !stats.events_by_type.is_empty() {
            let _ = writeln!(output, "Today by event type:");
            for (name, count) in &stats.events_by_type {
                let _ = writeln!(output, "  {name}: {count}");
            }
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, stats: &StatBlock) -> Result<String> {
        let mut output = String::new();

        let _ = writeln!(output, "====== {} ======", stats.reference);
        if stats.partial {
            let _ = writeln!(output, "(partial: the run was cancelled mid-pagination)");
        }
        let _ = writeln!(output, "GitHub interactions: {}", stats.total_count);

        if self.extended {
            Self::write_extended(&mut output, stats);
        }

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
