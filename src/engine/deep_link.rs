use std::time::{Duration, Instant};

use crate::model::ItemId;

use super::poller::ContextId;

/// Scroll target handed over by navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeepLink {
    pub item: ItemId,
    pub context_id: ContextId,
}

/// Waits for a deep-linked item to be rendered, lets layout settle, then
/// asks for one scroll. Each (item, context) pair scrolls at most once no
/// matter how many refreshes follow.
#[derive(Debug)]
pub struct DeepLinkResolver {
    settle: Duration,
    target: Option<DeepLink>,
    fire_at: Option<Instant>,
    fired: Option<DeepLink>,
}

impl DeepLinkResolver {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            target: None,
            fire_at: None,
            fired: None,
        }
    }

    pub fn arm(&mut self, link: DeepLink) {
        if self.fired.as_ref() == Some(&link) || self.target.as_ref() == Some(&link) {
            return;
        }
        self.target = Some(link);
        self.fire_at = None;
    }

    pub fn pending(&self) -> Option<&DeepLink> {
        self.target.as_ref()
    }

    /// Starts the settle timer the first time the target is among the
    /// rendered items.
    pub fn observe<'a>(&mut self, rendered: impl IntoIterator<Item = &'a ItemId>, now: Instant) {
        let Some(target) = &self.target else {
            return;
        };
        if self.fire_at.is_some() {
            return;
        }
        if rendered.into_iter().any(|id| id == &target.item) {
            self.fire_at = Some(now + self.settle);
        }
    }

    /// Returns the item to scroll to once the settle delay has passed.
    pub fn poll(&mut self, now: Instant) -> Option<ItemId> {
        match self.fire_at {
            Some(at) if now >= at => {
                self.fire_at = None;
                let link = self.target.take()?;
                let item = link.item.clone();
                self.fired = Some(link);
                Some(item)
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.fire_at
    }

    /// Drops the target and any running settle timer.
    pub fn cancel(&mut self) {
        self.target = None;
        self.fire_at = None;
    }
}

#[cfg(test)]
#[path = "../tests/engine/deep_link_tests.rs"]
mod tests;
