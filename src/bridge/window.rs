use std::sync::atomic::{AtomicU64, Ordering};

/// The host window that `focusWindow` targets.
pub trait WindowHost: Send + Sync {
    fn focus(&self);
}

/// Window host for a shell without a native window. Focus requests are
/// logged and counted.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    focus_requests: AtomicU64,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_requests(&self) -> u64 {
        self.focus_requests.load(Ordering::Relaxed)
    }
}

impl WindowHost for HeadlessWindow {
    fn focus(&self) {
        let n = self.focus_requests.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(requests = n, "window focus requested");
    }
}
