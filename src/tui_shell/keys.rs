use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;

pub(super) fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    app.trace_key(&key);

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }
    if app.modal.is_some() {
        modal::handle_modal_key(app, key, now);
        return;
    }

    match app.mode {
        Mode::Search => handle_search_key(app, key),
        Mode::Browse => handle_browse_key(app, key, now),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.finish_search(false),
        KeyCode::Enter => app.finish_search(true),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Backspace => {
            app.input.backspace();
            app.search_changed();
        }
        KeyCode::Delete => {
            app.input.delete();
            app.search_changed();
        }
        KeyCode::Char(c) => {
            app.input.insert_char(c);
            app.search_changed();
        }
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Esc | KeyCode::Backspace => app.go_back(now),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(false),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(true),
        KeyCode::Enter | KeyCode::Right => app.activate(now),
        KeyCode::Char('a') | KeyCode::Char('+') => app.add_selected(now),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('x') => app.finish_search(false),
        KeyCode::Char('c') => app.cycle_category(),
        KeyCode::Char('r') => app.reload_cart(),
        KeyCode::Char('d') => {
            app.session.dismiss_notification();
        }
        _ => {}
    }
}
