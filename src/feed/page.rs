use log::debug;

use crate::error::{GhStatsError, Result};
use crate::event::RawEvent;

use super::transport::{Transport, TransportResponse};

/// Opaque pagination token: the absolute URL of one feed page.
pub type Cursor = String;

/// One decoded page of the event feed, newest-first.
#[derive(Debug, Clone)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub next: Option<Cursor>,
}

/// Retrieves and decodes single feed pages; holds no pagination state.
pub struct PageFetcher<'a, T: Transport> {
    transport: &'a T,
    token: Option<&'a str>,
}

impl<'a, T: Transport> PageFetcher<'a, T> {
    #[must_use]
    pub const fn new(transport: &'a T, token: Option<&'a str>) -> Self {
        Self { transport, token }
    }

    /// Fetches one page at `cursor`.
    ///
    /// # Errors
    /// Propagates transport failures; a body that is not a JSON event array
    /// is a `HardFetch` (the feed contract is broken, retrying won't help).
    pub fn fetch(&self, cursor: &str) -> Result<EventPage> {
        debug!("fetching feed page: {cursor}");
        let TransportResponse { body, next } = self.transport.get(cursor, self.token)?;

        let events: Vec<RawEvent> = serde_json::from_str(&body)
            .map_err(|e| GhStatsError::HardFetch(format!("malformed feed page: {e}")))?;

        debug!("page decoded: {} event(s), next={:?}", events.len(), next);
        Ok(EventPage { events, next })
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
