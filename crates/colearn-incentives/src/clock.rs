use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time, injected so tests can simulate elapsed time.
///
/// Implementations report seconds since the Unix epoch and are expected to be
/// non-decreasing across operations; the core rejects observed inversions
/// rather than assuming them away.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall-clock time from the host environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Manually-advanced clock for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
