use clap::Parser;
use log::{info, warn};

use gh_stats::cli::Cli;
use gh_stats::credential::{CredentialStore, FileCredentialStore};
use gh_stats::feed::{self, CancelToken, FeedConfig, ReqwestTransport};
use gh_stats::output::{
    FetchProgress, JsonFormatter, OutputFormat, ReportFormatter, TextFormatter,
};
use gh_stats::stats::ReferenceDate;
use gh_stats::{EXIT_ERROR, EXIT_RETRYABLE_ERROR, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.flags {
        eprintln!("{cli:#?}");
    }

    let exit_code = match (&cli.register_token, &cli.username) {
        (Some(token), _) => run_register_token(token),
        (None, Some(username)) => run_report(username, &cli),
        // clap enforces one of the two, but don't panic on a future slip.
        (None, None) => {
            eprintln!("Error: --username is required");
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run_register_token(token: &str) -> i32 {
    match FileCredentialStore::new().save(token) {
        Ok(()) => {
            println!("Token stored for future runs.");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

fn run_report(username: &str, cli: &Cli) -> i32 {
    match run_report_impl(username, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_retryable() {
                EXIT_RETRYABLE_ERROR
            } else {
                EXIT_ERROR
            }
        }
    }
}

fn run_report_impl(username: &str, cli: &Cli) -> gh_stats::Result<()> {
    // 1. Load the stored credential; a missing token is only a warning
    let token = load_token();

    // 2. Snapshot the reference date once for the whole run
    let reference = ReferenceDate::today();
    info!("aggregating {username}'s activity for {reference}");

    // 3. Paginate and aggregate
    let progress = FetchProgress::new(username, cli.quiet);
    let result = feed::run(
        username,
        &ReqwestTransport,
        token.as_deref(),
        reference,
        &CancelToken::new(),
        &FeedConfig::default(),
    );
    progress.finish();
    let stats = result?;

    // 4. Render
    let formatter: Box<dyn ReportFormatter> = match cli.format {
        OutputFormat::Text => Box::new(TextFormatter::new(cli.extend)),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    let output = formatter.format(&stats)?;
    print!("{output}");

    Ok(())
}

fn load_token() -> Option<String> {
    match FileCredentialStore::new().load() {
        Ok(Some(token)) => {
            info!("using stored token for authenticated requests");
            Some(token)
        }
        Ok(None) => {
            warn!("no token configured; proceeding unauthenticated at the lower rate limit");
            None
        }
        Err(e) => {
            warn!("failed to load stored token ({e}); proceeding unauthenticated");
            None
        }
    }
}
