use clap::Parser;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "gh-stats")]
#[command(author, version, about = "GitHub activity statistics from the public event feed")]
#[command(long_about = "Aggregates a GitHub user's current-year activity by paginating the\n\
    public event feed.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Transient failure (network or rate limit, retry later)\n  \
    2 - Hard failure (bad response, credentials, or usage error)")]
pub struct Cli {
    /// GitHub account to report on
    #[arg(short, long, required_unless_present = "register_token")]
    pub username: Option<String>,

    /// Show extended statistics (monthly, per-repo and daily breakdowns)
    #[arg(short, long)]
    pub extend: bool,

    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Dump the parsed flags for debugging purposes
    #[arg(short, long)]
    pub flags: bool,

    /// Output format [possible values: text, json]
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Store a bearer token for authenticated requests, then exit
    #[arg(long, value_name = "TOKEN")]
    pub register_token: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
