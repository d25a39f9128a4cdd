use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::StorageError;

/// Default duration for notifications.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(4);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// Short lowercase name, used as a prefix in terminal output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A transient user notification.
///
/// # Example
///
/// ```
/// use ventures_lib::notify::{Notification, Notifier};
///
/// let notifier = Notifier::new();
/// notifier.push(Notification::success("Inquiry accepted"));
/// notifier.push(Notification::error("Connection failed"));
///
/// let shown: Vec<_> = notifier.drain().into_iter().map(|n| n.message).collect();
/// assert_eq!(shown, ["Inquiry accepted", "Connection failed"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Text shown to the user.
    pub message: String,
    /// How long to show the notification.
    pub duration: Duration,
}

impl Notification {
    fn with_level(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Create an info notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(Level::Info, message)
    }

    /// Create a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(Level::Success, message)
    }

    /// Create a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(Level::Warning, message)
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(Level::Error, message)
    }

    /// Error notification for a failed upload: the storage message when it
    /// has one, a generic message otherwise.
    pub fn upload_failed(error: &StorageError) -> Self {
        Self::error(error.user_message())
    }

    /// Set a custom duration for this notification.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Notification {
    fn from(message: String) -> Self {
        Notification::info(message)
    }
}

impl From<&str> for Notification {
    fn from(message: &str) -> Self {
        Notification::info(message)
    }
}

/// Shared queue of pending notifications.
///
/// Cheap to clone; clones push to and drain from the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<(Instant, Notification)>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification.
    pub fn push(&self, notification: impl Into<Notification>) {
        let notification = notification.into();
        log::debug!(
            "Notification ({}): {}",
            notification.level.as_str(),
            notification.message
        );
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back((Instant::now(), notification));
        }
    }

    /// Notifications still within their display duration at `now`, oldest
    /// first. Expired ones are discarded.
    pub fn visible_at(&self, now: Instant) -> Vec<Notification> {
        let Ok(mut queue) = self.queue.lock() else {
            return Vec::new();
        };
        queue.retain(|(shown, n)| now.saturating_duration_since(*shown) < n.duration);
        queue.iter().map(|(_, n)| n.clone()).collect()
    }

    /// Removes and returns every queued notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .map(|mut queue| queue.drain(..).map(|(_, n)| n).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
