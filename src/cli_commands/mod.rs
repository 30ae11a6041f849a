use clap::Subcommand;

pub(crate) mod cart;
pub(crate) mod catalog;
pub(crate) mod identity;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Point the client at a backend and store the bearer token
    Login(identity::LoginArgs),

    /// Show the signed-in profile
    Whoami(identity::WhoamiArgs),

    /// List food courts
    Vendors(catalog::VendorsArgs),

    /// List food items, optionally for one food court
    Items(catalog::ItemsArgs),

    /// Show the popular-items list
    Popular(catalog::PopularArgs),

    /// Show the cart
    Cart(cart::CartArgs),

    /// Add an item to the cart
    Add(cart::AddArgs),

    /// Empty the cart
    Clear,
}
