use std::path::PathBuf;

use crossterm::event::KeyEvent;
use ratatui::widgets::ListState;

use crate::engine::CartError;
use crate::model::Cart;
use crate::remote::RemoteClient;
use crate::store::LocalStore;

use super::rows::{build_rows, first_selectable, position_of_item, position_of_key, step};
use super::trace::SessionTrace;
use super::worker::Worker;
use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Mode {
    Browse,
    Search,
}

pub(super) struct App {
    pub(super) session: Session<RemoteClient>,
    pub(super) worker: Worker,
    pub(super) mode: Mode,
    pub(super) input: Input,
    pub(super) selected: usize,
    pub(super) list_state: ListState,
    /// Set by a deep link; the next draw scrolls the selection to the middle.
    pub(super) center_pending: bool,
    pub(super) modal: Option<ReplaceModal>,
    /// Local problems that are not session notifications (e.g. cart reload).
    pub(super) status: Option<String>,
    pub(super) quit: bool,
    trace: Option<SessionTrace>,
    route: String,
    nav_reason: Option<&'static str>,
    last_notice: Option<(String, Instant)>,
}

impl App {
    pub(super) fn load(opts: crate::tui::TuiRunOptions) -> Result<Self> {
        let cwd = std::env::current_dir().context("get current dir")?;
        let store = LocalStore::discover(&cwd)?;
        let cfg = store.read_config()?;
        let (remote, token) = store.remote_and_token()?;
        let base_url = remote.base_url.clone();
        let client = RemoteClient::new(remote, token)?;
        let worker = Worker::spawn(client.clone())?;

        let mut session = Session::new(client, Cart::default(), cfg.browse);
        let mut status = None;
        if let Err(err) = session.load_cart() {
            tracing::warn!("initial cart load failed: {:#}", err);
            status = Some(format!("{:#}", err));
        }
        session.load_profile();

        let mut app = App {
            session,
            worker,
            mode: Mode::Browse,
            input: Input::default(),
            selected: 0,
            list_state: ListState::default(),
            center_pending: false,
            modal: None,
            status,
            quit: false,
            trace: None,
            route: context_label(None),
            nav_reason: None,
            last_notice: None,
        };
        app.enable_trace(opts.trace, &base_url);

        let now = Instant::now();
        app.nav_reason = Some("startup");
        let events = app.session.open_home(now);
        app.handle_events(events, now);
        Ok(app)
    }

    fn enable_trace(&mut self, path: Option<PathBuf>, base_url: &str) {
        let Some(path) = path else {
            return;
        };
        match SessionTrace::open(&path) {
            Ok(mut trace) => {
                if let Err(err) = trace.session_start(base_url, self.session.display_name()) {
                    self.status = Some(format!("trace disabled: {:#}", err));
                    return;
                }
                self.trace = Some(trace);
            }
            Err(err) => {
                self.status = Some(format!("trace disabled: {:#}", err));
            }
        }
    }

    fn with_trace<F>(&mut self, f: F)
    where
        F: FnOnce(&mut SessionTrace) -> Result<()>,
    {
        let Some(trace) = self.trace.as_mut() else {
            return;
        };
        if let Err(err) = f(trace) {
            tracing::warn!("session trace disabled: {:#}", err);
            self.trace = None;
        }
    }

    pub(super) fn trace_key(&mut self, key: &KeyEvent) {
        let route = self.route.clone();
        self.with_trace(|t| t.user_action(key, &route));
    }

    pub(super) fn trace_end(&mut self, reason: &str) {
        self.with_trace(|t| t.session_end(reason));
    }

    pub(super) fn rows(&self) -> Vec<Row> {
        build_rows(&self.session)
    }

    pub(super) fn selected_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.selected)
    }

    pub(super) fn in_vendor(&self) -> bool {
        matches!(self.session.context(), Some(BrowseContext::Vendor { .. }))
    }

    // ---- polling ----

    /// Hands a due cycle to the worker, applies whatever came back, then
    /// advances the session's timers.
    pub(super) fn pump(&mut self, now: Instant) -> Result<()> {
        if let Some(req) = self.session.begin_cycle(now) {
            self.worker.submit(req)?;
        }
        for done in self.worker.drain() {
            let events = self.session.apply_cycle(done.context_id, done.outcome, now);
            self.handle_events(events, now);
        }
        let events = self.session.advance_timers(now);
        self.handle_events(events, now);
        Ok(())
    }

    pub(super) fn handle_events(&mut self, events: Vec<SessionEvent>, now: Instant) {
        let before = self.selected_row().and_then(|r| r.key());
        for event in events {
            match event {
                SessionEvent::Navigated { to } => {
                    let from = std::mem::replace(&mut self.route, context_label(Some(&to)));
                    let to = self.route.clone();
                    let reason = self.nav_reason.take().unwrap_or("navigate");
                    self.with_trace(|t| t.route_change(&from, &to, reason));
                    self.mode = Mode::Browse;
                    self.input.clear();
                    self.modal = None;
                    self.selected = first_selectable(&self.rows());
                    self.list_state = ListState::default();
                }
                SessionEvent::Redirected { .. } => {
                    self.nav_reason = Some("vendor_closed");
                }
                SessionEvent::SnapshotReplaced { .. } => {
                    self.reselect(before.as_deref());
                }
                SessionEvent::FetchFailed(_) => {}
                SessionEvent::ScrollTo(id) => {
                    if let Some(at) = position_of_item(&self.rows(), &id) {
                        self.selected = at;
                        self.center_pending = true;
                    }
                }
            }
        }
        self.trace_notification_if_new(now);
    }

    fn reselect(&mut self, key: Option<&str>) {
        let rows = self.rows();
        let current = self.selected;
        self.selected = key
            .and_then(|k| position_of_key(&rows, k))
            .unwrap_or_else(|| {
                if rows.get(current).is_some_and(Row::selectable) {
                    current
                } else {
                    first_selectable(&rows)
                }
            });
    }

    fn trace_notification_if_new(&mut self, now: Instant) {
        let Some(notice) = self.session.notification(now).cloned() else {
            return;
        };
        let sig = (notice.message.clone(), notice.expires_at);
        if self.last_notice.as_ref() == Some(&sig) {
            return;
        }
        self.last_notice = Some(sig);
        let route = self.route.clone();
        self.with_trace(|t| t.notification(&notice, &route));
    }

    // ---- actions ----

    pub(super) fn move_selection(&mut self, down: bool) {
        self.selected = step(&self.rows(), self.selected, down);
    }

    pub(super) fn activate(&mut self, now: Instant) {
        let events = match self.selected_row() {
            Some(Row::Vendor(v)) => {
                self.nav_reason = Some("vendor_click");
                self.session.click_vendor(&v.name, now)
            }
            Some(Row::Category { name, .. }) => {
                self.session.toggle_category(&name);
                Vec::new()
            }
            Some(Row::Item(item)) => {
                self.nav_reason = Some("item_click");
                match self.session.click_item(&item.id, now) {
                    Ok(events) => events,
                    Err(err) => {
                        self.status = Some(err.to_string());
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        };
        self.handle_events(events, now);
    }

    pub(super) fn add_selected(&mut self, now: Instant) {
        let Some(Row::Item(item)) = self.selected_row() else {
            return;
        };
        match self.session.add_item(&item.id, 1, now) {
            Ok(()) => {}
            Err(CartError::VendorConflict {
                cart_vendor,
                item_vendor,
                ..
            }) => {
                self.modal = Some(ReplaceModal {
                    cart_vendor,
                    item_name: item.name.clone(),
                    item_vendor,
                });
            }
            // Unavailable and failed adds already raised a notification.
            Err(CartError::ItemUnavailable { .. }) | Err(CartError::RemoteMutation { .. }) => {}
            Err(err) => self.status = Some(err.to_string()),
        }
        self.handle_events(Vec::new(), now);
    }

    pub(super) fn resolve_replacement(&mut self, accept: bool, now: Instant) {
        self.modal = None;
        if let Err(err) = self.session.resolve_replacement(accept, now) {
            tracing::warn!("cart replacement failed: {}", err);
        }
        self.handle_events(Vec::new(), now);
    }

    pub(super) fn go_back(&mut self, now: Instant) {
        if self.in_vendor() {
            self.nav_reason = Some("back");
            let events = self.session.open_home(now);
            self.handle_events(events, now);
        } else {
            self.quit = true;
        }
    }

    /// All, then each of the vendor's categories in order, then All again.
    pub(super) fn cycle_category(&mut self) {
        let Some(view) = self.session.vendor_view() else {
            return;
        };
        let next = match self.session.category() {
            crate::engine::CategoryFilter::All => view.categories.first().cloned(),
            crate::engine::CategoryFilter::Only(current) => view
                .categories
                .iter()
                .position(|c| c == current)
                .and_then(|i| view.categories.get(i + 1))
                .cloned(),
        };
        let filter = match next {
            Some(c) => crate::engine::CategoryFilter::Only(c),
            None => crate::engine::CategoryFilter::All,
        };
        self.session.select_category(filter);
        self.selected = first_selectable(&self.rows());
    }

    pub(super) fn reload_cart(&mut self) {
        self.status = match self.session.load_cart() {
            Ok(()) => None,
            Err(err) => Some(format!("{:#}", err)),
        };
    }

    pub(super) fn start_search(&mut self) {
        self.mode = Mode::Search;
        let query = self.session.query().to_string();
        self.input.set(&query);
    }

    pub(super) fn search_changed(&mut self) {
        self.session.set_query(self.input.buf.clone());
        self.selected = first_selectable(&self.rows());
    }

    pub(super) fn finish_search(&mut self, keep: bool) {
        self.mode = Mode::Browse;
        if !keep {
            self.input.clear();
            self.session.clear_query();
            self.selected = first_selectable(&self.rows());
        }
    }
}
