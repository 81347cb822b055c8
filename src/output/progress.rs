use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while the feed is being paginated.
///
/// Automatically disabled in quiet mode or when stderr is not a TTY, so
/// piped output never sees control sequences.
pub struct FetchProgress {
    spinner: ProgressBar,
}

impl FetchProgress {
    #[must_use]
    pub fn new(username: &str, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(username, quiet, is_tty)
    }

    fn new_with_visibility(username: &str, quiet: bool, is_tty: bool) -> Self {
        let spinner = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    // SAFETY: Template is a static string with valid format specifiers
                    .expect("valid template"),
            );
            pb.set_message(format!("Fetching activity for {username}..."));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };

        Self { spinner }
    }

    /// Removes the spinner from the terminal.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
