use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::engine::NotificationKind;

use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &mut App) {
    let now = Instant::now();
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    // Header
    let title = match app.session.context() {
        Some(BrowseContext::Vendor { name }) => name.clone(),
        _ => "Food courts".to_string(),
    };
    let cart = app.session.cart();
    let cart_label = match cart.vendor() {
        Some(v) => format!("Cart: {} ({})", cart.item_count(), v),
        None => "Cart: 0".to_string(),
    };
    let header = Line::from(vec![
        Span::styled(
            "CourtCart",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(title, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(cart_label, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            app.session.display_name().to_string(),
            Style::default().fg(Color::Green),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    // Filters and persistent errors
    let mut filter_spans = vec![Span::styled("search: ", Style::default().fg(Color::Gray))];
    if app.mode == Mode::Search {
        filter_spans.push(Span::styled(
            format!("{}_", app.input.buf),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    } else if app.session.query().is_empty() {
        filter_spans.push(Span::styled("(none)", Style::default().fg(Color::DarkGray)));
    } else {
        filter_spans.push(Span::raw(app.session.query().to_string()));
    }
    if app.in_vendor() {
        filter_spans.push(Span::styled("  category: ", Style::default().fg(Color::Gray)));
        filter_spans.push(Span::raw(app.session.category().label().to_string()));
    }
    let mut status_spans = Vec::new();
    if app.session.is_loading() {
        status_spans.push(Span::styled("Loading...", Style::default().fg(Color::Gray)));
    }
    if let Some(err) = app.session.fetch_error() {
        status_spans.push(Span::styled(err.to_string(), Style::default().fg(Color::Red)));
    }
    if let Some(err) = app.session.add_error() {
        status_spans.push(Span::raw("  "));
        status_spans.push(Span::styled(err.to_string(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(
        Paragraph::new(vec![Line::from(filter_spans), Line::from(status_spans)]),
        chunks[1],
    );

    // Browse list
    let rows = app.rows();
    let selected = app.selected.min(rows.len().saturating_sub(1));
    let items: Vec<ListItem> = rows.iter().map(row_item).collect();
    app.list_state.select(rows.get(selected).filter(|r| r.selectable()).map(|_| selected));
    if app.center_pending {
        let visible = chunks[2].height.saturating_sub(2) as usize;
        *app.list_state.offset_mut() = selected.saturating_sub(visible / 2);
        app.center_pending = false;
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[2], &mut app.list_state);

    // Notification
    let line = match app.session.notification(now) {
        Some(n) => {
            let color = match n.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Error => Color::Red,
            };
            Line::from(Span::styled(n.message.clone(), Style::default().fg(color)))
        }
        None => match app.status.as_deref() {
            Some(s) => Line::from(Span::styled(s.to_string(), Style::default().fg(Color::Red))),
            None => Line::from(""),
        },
    };
    frame.render_widget(
        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        chunks[3],
    );

    // Key help
    let help = match (app.mode, app.in_vendor()) {
        (Mode::Search, _) => "type to search  enter keep  esc clear",
        (Mode::Browse, false) => "j/k move  enter open  a add  / search  r reload cart  q quit",
        (Mode::Browse, true) => {
            "j/k move  enter toggle  a add  / search  c category  esc back  q quit"
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::Gray))),
        chunks[4],
    );

    if let Some(modal) = &app.modal {
        modal::draw_modal(frame, modal);
    }
}

fn row_item(row: &Row) -> ListItem<'static> {
    match row {
        Row::Heading(text) => ListItem::new(Line::from(Span::styled(
            text.clone(),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))),
        Row::Note(text) => ListItem::new(Line::from(Span::styled(
            format!("  {}", text),
            Style::default().fg(Color::DarkGray),
        ))),
        Row::Vendor(v) => {
            let (state, color) = if v.is_open {
                ("open", Color::Green)
            } else {
                ("closed", Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<28}", v.name)),
                Span::styled(format!("{:<7}", state), Style::default().fg(color)),
                Span::styled(format!("{:.1}  ", v.rating), Style::default().fg(Color::Yellow)),
                Span::styled(v.address.clone(), Style::default().fg(Color::Gray)),
            ]))
        }
        Row::Category {
            name,
            expanded,
            count,
        } => {
            let marker = if *expanded { "v" } else { ">" };
            ListItem::new(Line::from(Span::styled(
                format!("{} {} ({})", marker, name, count),
                Style::default().fg(Color::Cyan),
            )))
        }
        Row::Item(item) => {
            let mut spans = vec![
                Span::raw(format!("  {:<30}", item.name)),
                Span::raw(format!("{:>8.2}  ", item.price)),
                Span::styled(format!("{:.1}  ", item.rating), Style::default().fg(Color::Yellow)),
                Span::styled(item.vendor.clone(), Style::default().fg(Color::Gray)),
            ];
            if !item.is_available {
                spans.push(Span::styled(
                    "  unavailable",
                    Style::default().fg(Color::Red),
                ));
            }
            ListItem::new(Line::from(spans))
        }
    }
}
