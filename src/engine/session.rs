use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::market::Marketplace;
use crate::model::{BrowseConfig, Cart, CatalogItem, ItemId};

use super::cart::{CartCoordinator, PendingReplacement};
use super::deep_link::{DeepLink, DeepLinkResolver};
use super::error::{CartError, FetchFailure};
use super::expansion::CategoryExpansion;
use super::notify::{Notification, NotificationKind, NotificationQueue};
use super::poller::{BrowseContext, ContextId, CycleOutcome, CycleRequest, Poller};
use super::snapshot::{CatalogSnapshot, SnapshotStore};
use super::view::{
    CatalogView, CategoryFilter, HomeView, VendorView, build, home_view, vendor_categories,
    vendor_view,
};
use super::{MSG_HOME_FETCH_FAILED, MSG_ITEM_UNAVAILABLE, MSG_VENDOR_CLOSED};

const GUEST_NAME: &str = "Guest";

/// A notification handed to the next context by navigation. It is shown
/// once, when that context mounts, and then gone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavNotice {
    pub message: String,
    pub kind: NotificationKind,
}

/// Things the caller may want to react to (redraw, move the cursor).
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Navigated { to: BrowseContext },
    /// The vendor being viewed closed or vanished; the session went home.
    Redirected { vendor: String },
    SnapshotReplaced { generation: u64 },
    FetchFailed(FetchFailure),
    ScrollTo(ItemId),
}

/// One user's browsing session: the mounted context, its poller, the
/// catalog snapshot, the cart, and transient UI state. The session is the
/// single owner of all of it; nothing here is global.
pub struct Session<M> {
    market: M,
    browse: BrowseConfig,
    snapshots: SnapshotStore,
    cart: CartCoordinator,
    notices: NotificationQueue,
    poller: Option<Poller>,
    context_seq: u64,
    nav_notice: Option<NavNotice>,
    fetch_error: Option<FetchFailure>,
    add_error: Option<String>,
    loading: bool,
    query: String,
    category: CategoryFilter,
    expansion: CategoryExpansion,
    deep_link: DeepLinkResolver,
    display_name: Option<String>,
}

impl<M: Marketplace> Session<M> {
    pub fn new(market: M, cart: Cart, browse: BrowseConfig) -> Self {
        Self {
            market,
            notices: NotificationQueue::new(browse.notice_ttl()),
            deep_link: DeepLinkResolver::new(browse.deep_link_settle()),
            browse,
            snapshots: SnapshotStore::default(),
            cart: CartCoordinator::new(cart),
            poller: None,
            context_seq: 0,
            nav_notice: None,
            fetch_error: None,
            add_error: None,
            loading: false,
            query: String::new(),
            category: CategoryFilter::All,
            expansion: CategoryExpansion::default(),
            display_name: None,
        }
    }

    pub fn market(&self) -> &M {
        &self.market
    }

    // ---- navigation ----

    pub fn context(&self) -> Option<&BrowseContext> {
        self.poller.as_ref().map(|p| p.context())
    }

    pub fn context_id(&self) -> Option<ContextId> {
        self.poller.as_ref().map(|p| p.context_id())
    }

    pub fn open_home(&mut self, now: Instant) -> Vec<SessionEvent> {
        self.mount(BrowseContext::Home, now);
        if let Some(notice) = self.nav_notice.take() {
            self.notices.show(notice.message, notice.kind, now);
        }
        vec![SessionEvent::Navigated {
            to: BrowseContext::Home,
        }]
    }

    /// Enters a vendor's detail context. Without a vendor there is nothing to
    /// show, so the session goes home instead.
    pub fn open_vendor(
        &mut self,
        vendor: Option<&str>,
        scroll_to: Option<ItemId>,
        now: Instant,
    ) -> Vec<SessionEvent> {
        let Some(name) = vendor else {
            return self.open_home(now);
        };
        let context = BrowseContext::Vendor {
            name: name.to_string(),
        };
        let context_id = self.mount(context.clone(), now);
        if let Some(item) = scroll_to {
            self.deep_link.arm(DeepLink { item, context_id });
        }
        vec![SessionEvent::Navigated { to: context }]
    }

    /// Tears down the current context (poller, settle timer, per-view
    /// state) and mounts a new one with a fresh id.
    fn mount(&mut self, context: BrowseContext, now: Instant) -> ContextId {
        self.poller = None;
        self.deep_link.cancel();
        self.expansion.reset();
        self.query.clear();
        self.category = CategoryFilter::All;
        self.add_error = None;
        self.fetch_error = None;
        self.loading = true;

        self.context_seq += 1;
        let id = ContextId(self.context_seq);
        self.poller = Some(Poller::start(
            id,
            context,
            self.browse.poll_interval(),
            now,
        ));
        id
    }

    pub fn click_vendor(&mut self, name: &str, now: Instant) -> Vec<SessionEvent> {
        let open = self
            .snapshots
            .load()
            .vendor(name)
            .is_some_and(|v| v.is_open);
        if open {
            self.open_vendor(Some(name), None, now)
        } else {
            self.notices
                .show(MSG_VENDOR_CLOSED, NotificationKind::Error, now);
            Vec::new()
        }
    }

    /// Selecting an item: unavailable items only warn. From home, an
    /// available item opens its vendor and scrolls to it, unless the vendor
    /// is closed.
    pub fn click_item(&mut self, id: &ItemId, now: Instant) -> Result<Vec<SessionEvent>, CartError> {
        let snap = self.snapshots.load();
        let item = snap
            .item(id)
            .ok_or_else(|| CartError::UnknownItem(id.clone()))?;
        if !item.is_available {
            self.notices
                .show(MSG_ITEM_UNAVAILABLE, NotificationKind::Error, now);
            return Ok(Vec::new());
        }
        if self.context() != Some(&BrowseContext::Home) {
            return Ok(Vec::new());
        }
        match snap.vendor(&item.vendor) {
            Some(v) if v.is_open => Ok(self.open_vendor(Some(&v.name), Some(id.clone()), now)),
            Some(_) => {
                self.notices
                    .show(MSG_VENDOR_CLOSED, NotificationKind::Error, now);
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    // ---- cart ----

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn pending_replacement(&self) -> Option<&PendingReplacement> {
        self.cart.pending()
    }

    pub fn add_item(&mut self, id: &ItemId, quantity: u32, now: Instant) -> Result<(), CartError> {
        let item: CatalogItem = self
            .snapshots
            .load()
            .item(id)
            .cloned()
            .ok_or_else(|| CartError::UnknownItem(id.clone()))?;
        let res = self
            .cart
            .add_item(&self.market, &item, quantity, &mut self.notices, now);
        if let Err(CartError::RemoteMutation { message, .. }) = &res {
            self.add_error = Some(message.clone());
        }
        res
    }

    pub fn resolve_replacement(&mut self, accept: bool, now: Instant) -> Result<(), CartError> {
        self.cart
            .resolve_replacement(&self.market, accept, &mut self.notices, now)
    }

    /// Replaces the local cart with the backend's current one.
    pub fn load_cart(&mut self) -> Result<()> {
        let cart = self.market.get_cart().context("load cart")?;
        self.cart.reset(cart);
        Ok(())
    }

    // ---- identity ----

    /// Looks up the display name. Failure is logged and leaves the
    /// placeholder in place.
    pub fn load_profile(&mut self) -> &str {
        match self.market.profile() {
            Ok(p) => self.display_name = Some(p.name),
            Err(err) => tracing::warn!("profile lookup failed: {:#}", err),
        }
        self.display_name()
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(GUEST_NAME)
    }

    // ---- filters ----

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Clears the search and the inline add error with it.
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.add_error = None;
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn expansion(&self) -> &CategoryExpansion {
        &self.expansion
    }

    pub fn toggle_category(&mut self, category: &str) -> bool {
        self.expansion.toggle(category)
    }

    // ---- polling ----

    pub fn begin_cycle(&mut self, now: Instant) -> Option<CycleRequest> {
        self.poller.as_mut()?.begin(now)
    }

    /// Applies a cycle's result if its context is still the mounted one;
    /// otherwise the result is dropped.
    pub fn apply_cycle(
        &mut self,
        context_id: ContextId,
        outcome: CycleOutcome,
        now: Instant,
    ) -> Vec<SessionEvent> {
        let context = match self.poller.as_mut() {
            Some(p) if p.context_id() == context_id => {
                p.finish();
                p.context().clone()
            }
            _ => {
                tracing::debug!(id = context_id.0, "discarding cycle result for unmounted context");
                return Vec::new();
            }
        };
        self.loading = false;

        match outcome {
            CycleOutcome::Refreshed { vendors, items } => {
                self.fetch_error = None;
                let snap = self.snapshots.replace(vendors, items);
                if let Some(vendor) = context.vendor() {
                    self.expansion
                        .sync(vendor, &vendor_categories(&snap.items, vendor));
                }
                vec![SessionEvent::SnapshotReplaced {
                    generation: snap.generation,
                }]
            }
            CycleOutcome::VendorClosed { vendor } => {
                tracing::info!(%vendor, "vendor closed while being viewed");
                self.nav_notice = Some(NavNotice {
                    message: format!("{} is currently closed.", vendor),
                    kind: NotificationKind::Error,
                });
                let mut events = vec![SessionEvent::Redirected { vendor }];
                events.extend(self.open_home(now));
                events
            }
            CycleOutcome::Failed(failure) => {
                tracing::warn!(stage = ?failure.stage, "catalog refresh failed: {}", failure.cause);
                if context == BrowseContext::Home {
                    self.notices
                        .show(MSG_HOME_FETCH_FAILED, NotificationKind::Error, now);
                }
                self.fetch_error = Some(failure.clone());
                vec![SessionEvent::FetchFailed(failure)]
            }
        }
    }

    /// Expires the notification and fires a settled deep link.
    pub fn advance_timers(&mut self, now: Instant) -> Vec<SessionEvent> {
        self.notices.expire(now);
        if self.deep_link.pending().is_none() {
            return Vec::new();
        }
        if let Some(view) = self.vendor_view() {
            let rendered: Vec<ItemId> = view.item_ids().cloned().collect();
            self.deep_link.observe(&rendered, now);
        }
        self.deep_link
            .poll(now)
            .map(SessionEvent::ScrollTo)
            .into_iter()
            .collect()
    }

    /// Runs a due cycle inline, then advances timers.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if let Some(req) = self.begin_cycle(now) {
            let outcome = req.run(&self.market);
            events.extend(self.apply_cycle(req.context_id, outcome, now));
        }
        events.extend(self.advance_timers(now));
        events
    }

    /// Earliest instant at which `tick` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.poller
                .as_ref()
                .filter(|p| !p.in_flight())
                .map(|p| p.next_due()),
            self.notices.deadline(),
            self.deep_link.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // ---- read side ----

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notices.current(now)
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notices.dismiss()
    }

    /// Persistent banner for the last failed refresh, cleared by the next
    /// successful one.
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_ref().map(|f| f.banner())
    }

    pub fn add_error(&self) -> Option<&str> {
        self.add_error.as_deref()
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshots.load()
    }

    pub fn home_view(&self) -> HomeView {
        home_view(&self.snapshots.load(), &self.query)
    }

    pub fn vendor_view(&self) -> Option<VendorView> {
        let vendor = self.context()?.vendor()?;
        Some(vendor_view(
            &self.snapshots.load(),
            vendor,
            &self.query,
            &self.category,
        ))
    }

    pub fn view(&self) -> Option<CatalogView> {
        let context = self.context()?;
        Some(build(
            &self.snapshots.load(),
            context,
            &self.query,
            &self.category,
        ))
    }
}

#[cfg(test)]
#[path = "../tests/engine/session_tests.rs"]
mod tests;
