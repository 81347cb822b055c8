use crate::error::Result;
use crate::event::Event;

use super::block::{ReferenceDate, StatBlock};

/// Folds a stream of classified events into one [`StatBlock`].
///
/// The aggregator owns the block for the duration of a run; callers get it
/// back through [`Aggregator::into_block`] once pagination ends. Feeding
/// only in-year events is the pagination driver's responsibility — the
/// year gate lives in the stopping rule, not here.
#[derive(Debug)]
pub struct Aggregator {
    block: StatBlock,
}

impl Aggregator {
    #[must_use]
    pub fn new(reference: ReferenceDate) -> Self {
        Self {
            block: StatBlock::new(reference),
        }
    }

    /// Folds one event into the running statistics.
    pub fn fold(&mut self, event: &Event) {
        let weight = event.weight();
        let reference = self.block.reference;

        self.block.total_count += weight;
        // Zero-weight events must not create noise keys.
        if weight > 0 {
            *self
                .block
                .per_repo
                .entry(event.repo_name.clone())
                .or_insert(0) += weight;
        }

        if reference.matches_month(event.created_at) {
            self.block.month_count += weight;
        }

        if reference.matches_day(event.created_at) {
            self.block.daily_count += weight;
            if weight > 0 {
                *self
                    .block
                    .daily_per_repo
                    .entry(event.repo_name.clone())
                    .or_insert(0) += weight;
            }
            if event.is_recognized() {
                // Occurrence count, not weight.
                *self
                    .block
                    .events_by_type
                    .entry(event.type_name.clone())
                    .or_insert(0) += 1;
            }
        }

        if event.is_new_repo() {
            self.block.new_repo_count += 1;
        }
    }

    /// Folds a whole classified page.
    pub fn fold_page(&mut self, events: &[Event]) {
        for event in events {
            self.fold(event);
        }
    }

    /// Terminal accessor for the most-active repository.
    ///
    /// # Errors
    /// Returns `EmptyAggregate` when no repository recorded any weight.
    pub fn most_active_repo(&self) -> Result<(&str, u64)> {
        self.block.most_active_repo()
    }

    #[must_use]
    pub const fn block(&self) -> &StatBlock {
        &self.block
    }

    /// Marks the run as cancelled before completion.
    pub const fn mark_partial(&mut self) {
        self.block.partial = true;
    }

    /// Finishes the run and hands the block to the caller.
    #[must_use]
    pub fn into_block(self) -> StatBlock {
        self.block
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
