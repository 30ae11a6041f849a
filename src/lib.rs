pub mod engine;
pub mod market;
pub mod model;
pub mod remote;
pub mod store;
pub mod tui;

mod tui_shell;
