use super::cart::{handle_add_command, handle_cart_command, handle_clear_command};
use super::catalog::{handle_items_command, handle_popular_command, handle_vendors_command};
use super::identity::{handle_login_command, handle_whoami_command};
use super::store::with_client;
use super::*;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(args.url, args.token, args.force)?,
        Commands::Whoami(args) => with_client(|client| handle_whoami_command(client, args.json))?,
        Commands::Vendors(args) => {
            with_client(|client| handle_vendors_command(client, args.query, args.json))?
        }
        Commands::Items(args) => with_client(|client| {
            handle_items_command(client, args.vendor, args.query, args.category, args.json)
        })?,
        Commands::Popular(args) => {
            with_client(|client| handle_popular_command(client, args.query, args.json))?
        }
        Commands::Cart(args) => with_client(|client| handle_cart_command(client, args.json))?,
        Commands::Add(args) => with_client(|client| {
            handle_add_command(client, args.item_id, args.quantity, args.replace)
        })?,
        Commands::Clear => with_client(handle_clear_command)?,
    }

    Ok(())
}
