use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::error::Result;
use crate::event::{Classifier, Event, RawEvent};
use crate::stats::{Aggregator, ReferenceDate, StatBlock};

use super::page::{Cursor, PageFetcher};
use super::transport::Transport;

/// Cooperative cancellation flag, checked between pages only so a
/// partially folded page can never leak into the returned block.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Why the driver stopped paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopCause {
    /// An event older than the reference year appeared; everything after
    /// it is strictly older still.
    YearBoundary,
    /// The provider returned fewer events than the page size, i.e. its
    /// last available page.
    ShortPage,
    /// The provider advertised no further page.
    NoCursor,
}

/// Sequential pagination over the event feed.
///
/// Fetches are strictly ordered: each depends on the cursor returned by
/// the previous fetch, and the decision to fetch again depends on having
/// classified the prior page in full. Fetching is the expensive,
/// rate-limited operation, so the driver stops the moment the reference
/// year is exhausted and not one page later.
pub struct PaginationDriver<'a, T: Transport> {
    fetcher: PageFetcher<'a, T>,
    classifier: Classifier,
    page_size: usize,
    cancel: CancelToken,
}

impl<'a, T: Transport> PaginationDriver<'a, T> {
    #[must_use]
    pub const fn new(
        fetcher: PageFetcher<'a, T>,
        classifier: Classifier,
        page_size: usize,
        cancel: CancelToken,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            page_size,
            cancel,
        }
    }

    /// Paginates from `start` until the reference year is exhausted and
    /// returns the aggregated block.
    ///
    /// A cancellation between pages returns the block folded so far,
    /// marked partial.
    ///
    /// # Errors
    /// Any fetch or classification failure aborts the run; no error is
    /// swallowed and no partially classified page is applied.
    pub fn run(self, start: Cursor, reference: ReferenceDate) -> Result<StatBlock> {
        let mut aggregator = Aggregator::new(reference);
        let mut cursor = Some(start);
        let mut pages = 0usize;

        while let Some(current) = cursor {
            if self.cancel.is_cancelled() {
                info!("run cancelled after {pages} page(s)");
                aggregator.mark_partial();
                return Ok(aggregator.into_block());
            }

            let page = self.fetcher.fetch(&current)?;
            let fetched = page.events.len();
            pages += 1;

            // The whole page classifies before any of it folds, so a
            // malformed event cannot leave a half-applied page behind.
            let (batch, crossed) = self.classify_page(page.events, reference)?;
            aggregator.fold_page(&batch);
            debug!(
                "page {pages}: folded {} of {fetched} event(s)",
                batch.len()
            );

            let stop = if crossed {
                Some(StopCause::YearBoundary)
            } else if fetched < self.page_size {
                Some(StopCause::ShortPage)
            } else if page.next.is_none() {
                Some(StopCause::NoCursor)
            } else {
                None
            };

            if let Some(cause) = stop {
                info!("pagination done after {pages} page(s): {cause:?}");
                break;
            }
            cursor = page.next;
        }

        Ok(aggregator.into_block())
    }

    /// Classifies one page in returned (newest-first) order, truncating at
    /// the first event outside the reference year.
    ///
    /// Returns the classified prefix and whether the year boundary was hit.
    fn classify_page(
        &self,
        events: Vec<RawEvent>,
        reference: ReferenceDate,
    ) -> Result<(Vec<Event>, bool)> {
        let mut batch = Vec::with_capacity(events.len());
        for raw in events {
            if !reference.matches_year(raw.created_at) {
                return Ok((batch, true));
            }
            batch.push(self.classifier.classify(raw)?);
        }
        Ok((batch, false))
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
