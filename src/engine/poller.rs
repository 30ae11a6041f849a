use std::time::{Duration, Instant};

use crate::market::Marketplace;
use crate::model::{CatalogItem, Vendor};

use super::error::{FetchFailure, FetchStage};

/// What the user is looking at, as far as polling is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowseContext {
    Home,
    Vendor { name: String },
}

impl BrowseContext {
    pub fn vendor(&self) -> Option<&str> {
        match self {
            BrowseContext::Home => None,
            BrowseContext::Vendor { name } => Some(name),
        }
    }
}

/// Identifies one mounted browsing context. A fresh id is issued on every
/// navigation, so results tagged with an old id can be recognized and
/// dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u64);

/// One fetch cycle, detached from the poller so it can run elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleRequest {
    pub context_id: ContextId,
    pub context: BrowseContext,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    Refreshed {
        vendors: Vec<Vendor>,
        items: Vec<CatalogItem>,
    },
    /// The vendor being viewed is gone or closed. Items were not fetched.
    VendorClosed { vendor: String },
    Failed(FetchFailure),
}

impl CycleRequest {
    pub fn run<M: Marketplace + ?Sized>(&self, market: &M) -> CycleOutcome {
        match &self.context {
            BrowseContext::Home => {
                let vendors = match market.list_vendors() {
                    Ok(v) => v,
                    Err(err) => return CycleOutcome::Failed(FetchFailure::new(FetchStage::Catalog, &err)),
                };
                let items = match market.list_items() {
                    Ok(i) => i,
                    Err(err) => return CycleOutcome::Failed(FetchFailure::new(FetchStage::Catalog, &err)),
                };
                CycleOutcome::Refreshed { vendors, items }
            }
            BrowseContext::Vendor { name } => {
                // The open-state check gates the item fetch.
                let vendors = match market.list_vendors() {
                    Ok(v) => v,
                    Err(err) => {
                        return CycleOutcome::Failed(FetchFailure::new(FetchStage::VendorStatus, &err));
                    }
                };
                let open = vendors.iter().any(|v| &v.name == name && v.is_open);
                if !open {
                    return CycleOutcome::VendorClosed {
                        vendor: name.clone(),
                    };
                }
                let items = match market.list_items() {
                    Ok(i) => i,
                    Err(err) => return CycleOutcome::Failed(FetchFailure::new(FetchStage::Items, &err)),
                };
                CycleOutcome::Refreshed { vendors, items }
            }
        }
    }
}

/// Fixed-interval schedule for one browsing context. The first cycle is due
/// immediately; afterwards one is due every `interval` whether the previous
/// one succeeded or not. Dropping the poller ends the schedule.
#[derive(Debug)]
pub struct Poller {
    context_id: ContextId,
    context: BrowseContext,
    interval: Duration,
    next_due: Instant,
    in_flight: bool,
}

impl Poller {
    pub fn start(
        context_id: ContextId,
        context: BrowseContext,
        interval: Duration,
        now: Instant,
    ) -> Self {
        tracing::debug!(context = ?context, id = context_id.0, "poller started");
        Self {
            context_id,
            context,
            interval: interval.max(Duration::from_millis(1)),
            next_due: now,
            in_flight: false,
        }
    }

    pub fn context(&self) -> &BrowseContext {
        &self.context
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Hands out the next cycle if one is due. Slots that pass while a cycle
    /// is still running are skipped rather than queued.
    pub fn begin(&mut self, now: Instant) -> Option<CycleRequest> {
        if now < self.next_due {
            return None;
        }
        while self.next_due <= now {
            self.next_due += self.interval;
        }
        if self.in_flight {
            tracing::debug!(id = self.context_id.0, "poll slot skipped, cycle in flight");
            return None;
        }
        self.in_flight = true;
        Some(CycleRequest {
            context_id: self.context_id,
            context: self.context.clone(),
        })
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        tracing::debug!(id = self.context_id.0, "poller stopped");
    }
}

#[cfg(test)]
#[path = "../tests/engine/poller_tests.rs"]
mod tests;
