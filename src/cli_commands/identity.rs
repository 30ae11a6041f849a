use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Backend base URL
    #[arg(long, default_value = courtcart::model::DEFAULT_BASE_URL)]
    pub(crate) url: String,
    #[arg(long)]
    pub(crate) token: String,
    /// Re-initialize .courtcart if it already exists
    #[arg(long)]
    pub(crate) force: bool,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
