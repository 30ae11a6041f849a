use clap::Args;

#[derive(Args)]
pub(crate) struct CartArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    pub(crate) item_id: String,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) quantity: u32,
    /// If the cart holds another food court's items, clear it and add one of this item
    #[arg(long)]
    pub(crate) replace: bool,
}
