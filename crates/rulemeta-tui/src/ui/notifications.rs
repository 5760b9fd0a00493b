// Status-bar notifications: a small priority queue with auto-dismiss

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notification priority levels (higher = more important)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Glyph shown before the message in the status bar
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

/// A single status-bar message
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// How long it stays up once shown
    pub duration: Duration,
    /// Set when it first reaches the status bar
    pub shown_at: Option<Instant>,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration: Duration::from_secs(secs),
            shown_at: None,
        }
    }

    /// Info notification, shown for 3 seconds
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    /// Success notification, shown for 3 seconds
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    /// Warning notification, shown for 4 seconds
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 4)
    }

    /// Error notification, shown for 5 seconds
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 5)
    }

    /// Override how long this notification stays up
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True once it has been shown for its full duration
    pub fn is_expired(&self) -> bool {
        self.shown_at
            .map(|shown| shown.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    /// Start the display clock; later calls keep the first timestamp
    pub fn mark_shown(&mut self) {
        if self.shown_at.is_none() {
            self.shown_at = Some(Instant::now());
        }
    }
}

/// Notifications waiting for the status bar, highest priority first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    /// Pending, front is shown next
    queue: VecDeque<Notification>,
    /// On screen now
    current: Option<Notification>,
}

impl NotificationQueue {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification. A repeat of the one on screen is dropped.
    /// Higher priority notifications replace the current one outright;
    /// everything else waits in priority order.
    pub fn push(&mut self, notification: Notification) {
        if let Some(current) = &self.current {
            if current.message == notification.message && current.level == notification.level {
                return;
            }
            if notification.level > current.level {
                let mut n = notification;
                n.mark_shown();
                self.current = Some(n);
                return;
            }
        }

        if self.current.is_none() {
            let mut n = notification;
            n.mark_shown();
            self.current = Some(n);
        } else {
            let pos = self
                .queue
                .iter()
                .position(|n| n.level < notification.level)
                .unwrap_or(self.queue.len());
            self.queue.insert(pos, notification);
        }
    }

    /// The notification on screen, if any
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Drop the notification on screen and show the next one
    pub fn dismiss(&mut self) {
        self.current = None;
        self.advance();
    }

    /// Advance past the current notification once it has expired
    pub fn tick(&mut self) {
        if self.current.as_ref().is_some_and(Notification::is_expired) {
            self.current = None;
            self.advance();
        }
    }

    /// Promote the next pending notification when nothing is on screen
    fn advance(&mut self) {
        if self.current.is_none() {
            if let Some(mut next) = self.queue.pop_front() {
                next.mark_shown();
                self.current = Some(next);
            }
        }
    }

    /// True when nothing is on screen or pending
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::info("test");
        assert_eq!(n.level, NotificationLevel::Info);
        assert_eq!(n.duration, Duration::from_secs(3));

        let n = Notification::error("error").duration(Duration::from_secs(10));
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.duration, Duration::from_secs(10));
    }

    #[test]
    fn test_queue_basic() {
        let mut q = NotificationQueue::new();
        assert!(q.is_empty());

        q.push(Notification::info("first"));
        assert_eq!(q.current().unwrap().message, "first");

        q.dismiss();
        assert!(q.is_empty());
    }

    #[test]
    fn test_higher_priority_replaces_current() {
        let mut q = NotificationQueue::new();
        q.push(Notification::info("Filtering rules"));
        q.push(Notification::error("Could not load tags"));
        assert_eq!(q.current().unwrap().message, "Could not load tags");

        q.dismiss();
        assert!(q.current().is_none());
    }

    #[test]
    fn test_lower_priority_waits() {
        let mut q = NotificationQueue::new();
        q.push(Notification::warning("first"));
        q.push(Notification::info("second"));
        assert_eq!(q.current().unwrap().message, "first");

        q.dismiss();
        assert_eq!(q.current().unwrap().message, "second");
    }

    #[test]
    fn test_duplicate_of_current_is_dropped() {
        let mut q = NotificationQueue::new();
        q.push(Notification::error("boom"));
        q.push(Notification::error("boom"));
        q.dismiss();
        assert!(q.is_empty());
    }

    #[test]
    fn test_tick_expires() {
        let mut q = NotificationQueue::new();
        q.push(Notification::info("gone").duration(Duration::ZERO));
        q.push(Notification::info("next"));
        q.tick();
        assert_eq!(q.current().unwrap().message, "next");
    }
}
