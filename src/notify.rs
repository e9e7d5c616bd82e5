//! Notifications
//!
//! User-visible notices and the busy indicator. The data layer only sees the
//! [`Notifier`] trait; [`ToastQueue`] is the reactive implementation the UI
//! renders.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::Info => "toast info",
            Level::Success => "toast success",
            Level::Warning => "toast warning",
            Level::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }
}

/// Sink for user-visible notices and busy state
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    /// Called with `true` when a request starts and `false` when it settles
    fn set_busy(&self, _busy: bool) {}
}

/// Marks the notifier busy until dropped
pub struct BusyGuard<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> BusyGuard<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        notifier.set_busy(true);
        Self { notifier }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.notifier.set_busy(false);
    }
}

/// A notice currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Reactive toast list plus in-flight request counter
#[derive(Clone, Copy)]
pub struct ToastQueue {
    toasts: RwSignal<Vec<Toast>>,
    in_flight: RwSignal<u32>,
    next_id: StoredValue<u64>,
    duration_ms: u32,
}

impl ToastQueue {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            in_flight: RwSignal::new(0),
            next_id: StoredValue::new(0),
            duration_ms,
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    pub fn is_busy(&self) -> Signal<bool> {
        let in_flight = self.in_flight;
        Signal::derive(move || in_flight.get() > 0)
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    /// Add a toast without scheduling its expiry
    fn enqueue(&self, notice: Notice) -> u64 {
        let id = self.next_id.with_value(|id| *id);
        self.next_id.update_value(|id| *id += 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, notice }));
        id
    }

    fn push(&self, notice: Notice) {
        let id = self.enqueue(notice);
        let queue = *self;
        let duration_ms = self.duration_ms;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            queue.dismiss(id);
        });
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notice: Notice) {
        match notice.level {
            Level::Error => tracing::error!("notice: {}", notice.message),
            Level::Warning => tracing::warn!("notice: {}", notice.message),
            Level::Info | Level::Success => tracing::info!("notice: {}", notice.message),
        }
        self.push(notice);
    }

    fn set_busy(&self, busy: bool) {
        self.in_flight.update(|n| {
            *n = if busy { *n + 1 } else { n.saturating_sub(1) };
        });
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    /// Records every notice for assertions
    #[derive(Default)]
    pub struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
        busy: AtomicI32,
        busy_peak: AtomicI32,
    }

    impl RecordingNotifier {
        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }

        pub fn count(&self, level: Level) -> usize {
            self.notices().iter().filter(|n| n.level == level).count()
        }

        pub fn busy(&self) -> i32 {
            self.busy.load(Ordering::SeqCst)
        }

        pub fn busy_peak(&self) -> i32 {
            self.busy_peak.load(Ordering::SeqCst)
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }

        fn set_busy(&self, busy: bool) {
            let now = if busy {
                self.busy.fetch_add(1, Ordering::SeqCst) + 1
            } else {
                self.busy.fetch_sub(1, Ordering::SeqCst) - 1
            };
            self.busy_peak.fetch_max(now, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_busy_guard_balances() {
        let notifier = RecordingNotifier::default();
        {
            let _outer = BusyGuard::new(&notifier);
            let _inner = BusyGuard::new(&notifier);
            assert_eq!(notifier.busy(), 2);
        }
        assert_eq!(notifier.busy(), 0);
        assert_eq!(notifier.busy_peak(), 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        Owner::new().with(|| {
            let queue = ToastQueue::new(4000);
            let first = queue.enqueue(Notice::warning("offline"));
            let second = queue.enqueue(Notice::error("server error"));
            assert_ne!(first, second);

            queue.dismiss(first);
            queue.dismiss(first);

            let remaining = queue.toasts().get_untracked();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].id, second);
            assert_eq!(remaining[0].notice.level, Level::Error);
        });
    }

    #[test]
    fn test_busy_counts_in_flight_requests() {
        Owner::new().with(|| {
            let queue = ToastQueue::new(4000);
            let busy = queue.is_busy();
            queue.set_busy(true);
            queue.set_busy(true);
            queue.set_busy(false);
            assert!(busy.get_untracked());
            queue.set_busy(false);
            queue.set_busy(false);
            assert!(!busy.get_untracked());
        });
    }
}
