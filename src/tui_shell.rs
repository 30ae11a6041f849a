use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::engine::{BrowseContext, CatalogView, Session, SessionEvent};
use crate::market::Marketplace;
use crate::model::{CatalogItem, ItemId, Vendor};

mod app;
use app::{App, Mode};

mod input;
use input::Input;

mod keys;
mod modal;
use modal::ReplaceModal;

mod render;

mod rows;
use rows::Row;

mod runtime;
mod trace;
mod worker;

pub(crate) fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    runtime::run(opts)
}

fn context_label(context: Option<&BrowseContext>) -> String {
    match context {
        Some(BrowseContext::Home) | None => "home".to_string(),
        Some(BrowseContext::Vendor { name }) => format!("vendor:{}", name),
    }
}
