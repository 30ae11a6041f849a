use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;
use serde_json::json;

use crate::engine::Notification;

use super::*;

#[derive(Debug, Default)]
pub(super) struct TraceStats {
    pub(super) user_actions: u64,
    pub(super) route_changes: u64,
    pub(super) notifications: u64,
}

/// Append-only JSONL log of what the user did and what they were shown.
#[derive(Debug)]
pub(super) struct SessionTrace {
    out: BufWriter<File>,
    path: PathBuf,
    seq: u64,
    stats: TraceStats,
}

impl SessionTrace {
    pub(super) fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "create parent directories for trace path {}",
                    path.display()
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
            seq: 0,
            stats: TraceStats::default(),
        })
    }

    pub(super) fn write_event<T: Serialize>(&mut self, event: &str, payload: T) -> Result<()> {
        self.seq += 1;
        let line = json!({
            "seq": self.seq,
            "ts": now_ts(),
            "event": event,
            "payload": payload
        });
        serde_json::to_writer(&mut self.out, &line).context("serialize trace event")?;
        self.out.write_all(b"\n").context("write trace newline")?;
        self.out.flush().context("flush trace event")?;
        Ok(())
    }

    pub(super) fn session_start(&mut self, base_url: &str, profile: &str) -> Result<()> {
        self.write_event(
            "session_start",
            json!({
                "cwd": std::env::current_dir().ok().map(|p| p.display().to_string()),
                "base_url": base_url,
                "profile": profile,
            }),
        )
    }

    pub(super) fn user_action(&mut self, key: &KeyEvent, route: &str) -> Result<()> {
        self.stats.user_actions += 1;
        self.write_event(
            "user_action",
            json!({
                "source": "keyboard",
                "key": key_to_string(key),
                "route": route,
            }),
        )
    }

    pub(super) fn route_change(&mut self, from: &str, to: &str, reason: &str) -> Result<()> {
        self.stats.route_changes += 1;
        self.write_event(
            "route_change",
            json!({
                "from": from,
                "to": to,
                "reason": reason,
            }),
        )
    }

    pub(super) fn notification(&mut self, notice: &Notification, route: &str) -> Result<()> {
        self.stats.notifications += 1;
        self.write_event(
            "notification",
            json!({
                "message": notice.message,
                "kind": notice.kind,
                "route": route,
            }),
        )
    }

    pub(super) fn session_end(&mut self, reason: &str) -> Result<()> {
        let stats = json!({
            "user_actions": self.stats.user_actions,
            "route_changes": self.stats.route_changes,
            "notifications": self.stats.notifications,
        });
        let path = self.path.display().to_string();
        self.write_event(
            "session_end",
            json!({
                "reason": reason,
                "stats": stats,
                "trace_path": path,
            }),
        )
    }
}

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(super) fn key_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt".to_string());
    }
    let code = match key.code {
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => "other".to_string(),
    };
    parts.push(code);
    parts.join("+")
}

#[cfg(test)]
#[path = "../tests/tui_shell/trace_tests.rs"]
mod tests;
