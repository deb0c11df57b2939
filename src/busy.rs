use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Caller-supplied spinner toggled around a single call.
pub trait LocalSpinner: Send + Sync {
    fn turn_on(&self);
    fn turn_off(&self);
}

/// Process-wide busy counter behind the global loading indicator.
///
/// Every call that raises the counter must lower it on every exit path,
/// which [`BusyGuard`] enforces through `Drop`.
#[derive(Debug, Default)]
pub struct BusyTracker {
    count: AtomicUsize,
}

impl BusyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls currently in flight with the lock-screen flag set.
    pub fn active(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.active() > 0
    }

    pub fn acquire(
        self: &Arc<Self>,
        lock_screen: bool,
        spinner: Option<Arc<dyn LocalSpinner>>,
    ) -> BusyGuard {
        if lock_screen {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
        if let Some(spinner) = &spinner {
            spinner.turn_on();
        }
        BusyGuard {
            tracker: lock_screen.then(|| Arc::clone(self)),
            spinner,
        }
    }
}

/// Scoped hold on [`BusyTracker`]; releases on drop, panics included.
pub struct BusyGuard {
    tracker: Option<Arc<BusyTracker>>,
    spinner: Option<Arc<dyn LocalSpinner>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Some(tracker) = &self.tracker {
            tracker.count.fetch_sub(1, Ordering::SeqCst);
        }
        if let Some(spinner) = &self.spinner {
            spinner.turn_off();
        }
    }
}
