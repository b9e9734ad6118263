//! Toast notifications

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Toast notification level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// A toast notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Title to display (single line)
    pub title: String,
    /// Optional body text (can be multi-line)
    pub body: Option<String>,
    /// Toast level (affects styling)
    pub level: ToastLevel,
    /// How long to show the toast
    pub duration: Duration,
}

impl Toast {
    /// Create a simple info toast
    pub fn info(title: impl Into<String>) -> Self {
        Self::with_level(title, ToastLevel::Info, Duration::from_secs(3))
    }

    /// Create an error toast
    pub fn error(title: impl Into<String>) -> Self {
        Self::with_level(title, ToastLevel::Error, Duration::from_secs(5))
    }

    /// Create a success toast
    pub fn success(title: impl Into<String>) -> Self {
        Self::with_level(title, ToastLevel::Success, Duration::from_secs(3))
    }

    /// Create a warning toast
    pub fn warning(title: impl Into<String>) -> Self {
        Self::with_level(title, ToastLevel::Warning, Duration::from_secs(4))
    }

    fn with_level(title: impl Into<String>, level: ToastLevel, duration: Duration) -> Self {
        Self {
            title: title.into(),
            body: None,
            level,
            duration,
        }
    }

    /// Add a body to the toast
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set custom duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Shared queue of pending toasts.
///
/// Producers push from any task; the front end drains and shows them.
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast.
    pub fn push(&self, toast: impl Into<Toast>) {
        let toast = toast.into();
        log::debug!("Toast [{}]: {}", toast.level, toast.title);
        if let Ok(mut guard) = self.inner.lock() {
            guard.push(toast);
        }
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.inner
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Number of queued toasts.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_and_durations() {
        assert_eq!(Toast::error("x").duration, Duration::from_secs(5));
        assert_eq!(Toast::warning("x").level, ToastLevel::Warning);
        assert_eq!(Toast::from("saved").level, ToastLevel::Info);
        assert_eq!(
            Toast::success("Saved").with_body("Order #12").body.as_deref(),
            Some("Order #12")
        );
    }

    #[test]
    fn test_queue_drains_in_order() {
        let queue = ToastQueue::new();
        let producer = queue.clone();
        producer.push(Toast::info("first"));
        producer.push("second");
        assert_eq!(queue.len(), 2);

        let titles: Vec<String> = queue.drain().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["first", "second"]);
        assert!(queue.is_empty());
    }
}
