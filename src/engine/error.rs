use crate::model::ItemId;

/// Which cart mutation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOp {
    Add,
    Clear,
    /// The add that follows a successful clear during a replacement. The
    /// cart is empty when this one fails.
    ReplaceAdd,
}

impl std::fmt::Display for MutationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MutationOp::Add => "add to cart",
            MutationOp::Clear => "clear cart",
            MutationOp::ReplaceAdd => "add after clearing cart",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    /// Rejected before any network call.
    #[error("item {item} is temporarily not available")]
    ItemUnavailable { item: ItemId },

    /// The add was suspended; `resolve_replacement` decides what happens.
    #[error("cart holds items from {cart_vendor}; adding from {item_vendor} requires replacing it")]
    VendorConflict {
        cart_vendor: String,
        item_vendor: String,
        pending: ItemId,
    },

    /// The backend refused or could not be reached. Never retried.
    #[error("{op} failed: {message}")]
    RemoteMutation { op: MutationOp, message: String },

    #[error("item {0} is not in the current catalog")]
    UnknownItem(ItemId),

    #[error("no cart replacement is pending")]
    NoPendingReplacement,
}

/// Which step of a poll cycle failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStage {
    /// Home context: vendors and items together.
    Catalog,
    /// Vendor context: the open-state check.
    VendorStatus,
    /// Vendor context: the item listing after the check passed.
    Items,
}

/// A poll cycle that could not refresh the snapshot. The next tick retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage:?} fetch failed: {cause}")]
pub struct FetchFailure {
    pub stage: FetchStage,
    pub cause: String,
}

impl FetchFailure {
    pub fn new(stage: FetchStage, err: &anyhow::Error) -> Self {
        Self {
            stage,
            cause: format!("{:#}", err),
        }
    }

    /// Persistent inline text for this failure.
    pub fn banner(&self) -> &'static str {
        match self.stage {
            FetchStage::Catalog => "Failed to load food courts or items. Please try again later.",
            FetchStage::VendorStatus => {
                "Failed to verify food court status. Please try again later."
            }
            FetchStage::Items => "Failed to load food items. Please try again later.",
        }
    }
}
