use clap::Args;

#[derive(Args)]
pub(crate) struct VendorsArgs {
    /// Match food court names or any of their item names
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ItemsArgs {
    /// Restrict to one food court
    #[arg(long)]
    pub(crate) vendor: Option<String>,
    /// Case-insensitive name filter
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Restrict to one category ("All Categories" for every category)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct PopularArgs {
    /// Search all items by name instead of ranking
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
