use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

/// Holds at most one transient message. A newer one always replaces the
/// current one, expired or not.
#[derive(Debug)]
pub struct NotificationQueue {
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        tracing::debug!(kind = kind.label(), %message, "notification");
        self.current = Some(Notification {
            message,
            kind,
            expires_at: now + self.ttl,
        });
    }

    /// Manual close. The auto-dismiss deadline goes with it.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.current.take()
    }

    /// Drops the notification once its deadline has passed. Returns true
    /// when something was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(n) if now >= n.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// The live notification, if any, as of `now`.
    pub fn current(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| now < n.expires_at)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|n| n.expires_at)
    }
}

#[cfg(test)]
#[path = "../tests/engine/notify_tests.rs"]
mod tests;
