mod driver;
mod page;
mod transport;

pub use driver::{CancelToken, PaginationDriver};
pub use page::{Cursor, EventPage, PageFetcher};
pub use transport::{ReqwestTransport, Transport, TransportResponse};

use crate::error::Result;
use crate::event::Classifier;
use crate::stats::{ReferenceDate, StatBlock};

/// Provider maximum page size; one request returns at most this many events.
pub const DEFAULT_PAGE_SIZE: usize = 100;

const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// Feed endpoint configuration.
///
/// The defaults target the public GitHub API; tests point `api_root` at a
/// fake and shrink `page_size` to exercise the stopping rule cheaply.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub api_root: String,
    pub page_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FeedConfig {
    /// Start-of-feed cursor for a user's public event feed.
    #[must_use]
    pub fn first_page_url(&self, username: &str) -> Cursor {
        format!(
            "{}/users/{username}/events?per_page={}",
            self.api_root.trim_end_matches('/'),
            self.page_size
        )
    }
}

/// Runs one full aggregation: paginate the user's feed, classify and fold
/// every event of the reference year, and hand back the finished block.
///
/// This is the single entry point the CLI (and tests) call; everything
/// else in this module is plumbing behind it.
///
/// # Errors
/// Propagates fetch and classification failures; see
/// [`GhStatsError`](crate::GhStatsError) for the taxonomy.
pub fn run<T: Transport>(
    username: &str,
    transport: &T,
    token: Option<&str>,
    reference: ReferenceDate,
    cancel: &CancelToken,
    config: &FeedConfig,
) -> Result<StatBlock> {
    let fetcher = PageFetcher::new(transport, token);
    let driver = PaginationDriver::new(fetcher, Classifier::new(), config.page_size, cancel.clone());
    driver.run(config.first_page_url(username), reference)
}
