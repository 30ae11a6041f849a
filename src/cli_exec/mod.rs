use anyhow::{Context, Result};

use courtcart::remote::RemoteClient;
use courtcart::store::LocalStore;

use crate::Commands;

mod cart;
mod catalog;
mod dispatch;
mod identity;
mod store;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    dispatch::handle_command(command)
}
