//! Ephemeral toast notifications.
//!
//! Any component may push a notification; `util::session::notify` schedules its removal
//! once `duration_ms` elapses. A `None` duration stays until dismissed.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

pub const DEFAULT_NOTIFICATION_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "toast toast--info",
            Self::Success => "toast toast--success",
            Self::Warning => "toast toast--warning",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    pub duration_ms: Option<u32>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            message: None,
            duration_ms: Some(DEFAULT_NOTIFICATION_MS),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Keep the notification until it is dismissed explicitly.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.duration_ms = None;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Ordered list of visible notifications, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Append `notification` and return its id.
    pub fn push(&mut self, notification: Notification) -> String {
        let id = notification.id.clone();
        self.items.push(notification);
        id
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
