use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::*;

/// Confirmation shown when an add hits the one-vendor-per-cart rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct ReplaceModal {
    pub(super) cart_vendor: String,
    pub(super) item_name: String,
    pub(super) item_vendor: String,
}

impl ReplaceModal {
    pub(super) fn lines(&self) -> Vec<String> {
        vec![
            format!("Your cart holds items from {}.", self.cart_vendor),
            format!("{} is from {}.", self.item_name, self.item_vendor),
            String::new(),
            "Add items from the same food court or do you want to replace the items?".to_string(),
        ]
    }
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('r') | KeyCode::Enter => app.resolve_replacement(true, now),
        KeyCode::Char('n') | KeyCode::Char('c') | KeyCode::Esc => app.resolve_replacement(false, now),
        _ => {}
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &ReplaceModal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 70);
    let h = area.height.saturating_sub(6).clamp(8, 10);
    let box_area = Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    };

    frame.render_widget(Clear, box_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title("Replace cart?");
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let lines: Vec<Line> = modal.lines().into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[0]);

    let buttons = Line::from(vec![
        Span::styled(
            " [y] Replace ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(" [n] Cancel ", Style::default().fg(Color::Black).bg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(buttons), parts[1]);
}
