//! Cart consistency and live catalog synchronization.
//!
//! Everything here is single-threaded and clock-injected: operations take
//! the current `Instant` instead of reading it, and the only suspension
//! points are the `Marketplace` calls and the deadlines the caller checks
//! on each tick.

mod cart;
mod deep_link;
mod error;
mod expansion;
mod notify;
mod poller;
mod session;
mod snapshot;
mod view;

pub use self::cart::{CartCoordinator, PendingReplacement};
pub use self::deep_link::{DeepLink, DeepLinkResolver};
pub use self::error::{CartError, FetchFailure, FetchStage, MutationOp};
pub use self::expansion::CategoryExpansion;
pub use self::notify::{Notification, NotificationKind, NotificationQueue};
pub use self::poller::{BrowseContext, ContextId, CycleOutcome, CycleRequest, Poller};
pub use self::session::{NavNotice, Session, SessionEvent};
pub use self::snapshot::{CatalogSnapshot, SnapshotStore};
pub use self::view::{
    ALL_CATEGORIES, CatalogView, CategoryFilter, CategorySection, HomeView, POPULAR_LIMIT,
    VendorView, build as build_view, home_view, matching_vendors, matches_query, popular_items,
    vendor_categories, vendor_view,
};

pub(crate) const MSG_ITEM_UNAVAILABLE: &str = "This item is temporarily not available.";
pub(crate) const MSG_VENDOR_CLOSED: &str = "This food court is currently closed.";
pub(crate) const MSG_ADD_OK: &str = "Item added to cart successfully!";
pub(crate) const MSG_ADD_FAILED: &str = "Failed to add item to cart";
pub(crate) const MSG_REPLACE_OK: &str = "Cart updated with new food court items";
pub(crate) const MSG_REPLACE_FAILED: &str = "Failed to replace items in cart";
pub(crate) const MSG_HOME_FETCH_FAILED: &str = "Failed to load food courts or items";

#[cfg(test)]
#[path = "tests/engine/fake_market.rs"]
pub(crate) mod fake_market;
