//! Interval wait between the two snapshots.

use crate::errors::{ExError, ExErrorKind, Result, SamplerError};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Suspends the sampling thread for the sampling window
pub trait IntervalWait {
    /// Block for `window`
    ///
    /// # Errors
    ///
    /// - `Cancelled` — the wait was interrupted
    fn wait(&self, window: Duration) -> Result<()>;

    /// True once the wait can no longer complete normally
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Plain `thread::sleep`; cannot be interrupted
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl IntervalWait for ThreadSleep {
    fn wait(&self, window: Duration) -> Result<()> {
        std::thread::sleep(window);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// Shared flag that interrupts a [`CancellableWait`]
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark cancelled and wake any waiter
    pub fn cancel(&self) {
        if let Ok(mut cancelled) = self.state.cancelled.lock() {
            *cancelled = true;
        }
        self.state.wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.lock().map(|c| *c).unwrap_or(true)
    }
}

/// Condvar-backed wait that returns `Cancelled` as soon as its token fires
#[derive(Debug, Clone)]
pub struct CancellableWait {
    token: CancelToken,
}

impl CancellableWait {
    pub fn new(token: CancelToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

fn poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("interval_wait")
        .with_message("cancel token mutex poisoned")
}

impl IntervalWait for CancellableWait {
    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn wait(&self, window: Duration) -> Result<()> {
        let deadline = Instant::now() + window;
        let state = &self.token.state;
        let mut cancelled = state.cancelled.lock().map_err(|_| poisoned())?;
        loop {
            if *cancelled {
                return Err(SamplerError::Cancelled.into());
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            // Spurious wakeups just loop back to the checks above.
            let (guard, _) = state
                .wake
                .wait_timeout(cancelled, deadline - now)
                .map_err(|_| poisoned())?;
            cancelled = guard;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncancelled_wait_runs_to_deadline() {
        let wait = CancellableWait::new(CancelToken::new());
        let start = Instant::now();
        wait.wait(Duration::from_millis(20)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_pre_cancelled_wait_returns_immediately() {
        let token = CancelToken::new();
        token.cancel();
        let wait = CancellableWait::new(token);
        let err = wait.wait(Duration::from_secs(30)).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Cancelled);
    }

    #[test]
    fn test_cancel_from_other_thread_interrupts() {
        let token = CancelToken::new();
        let wait = CancellableWait::new(token.clone());
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            token.cancel();
        });
        let start = Instant::now();
        let err = wait.wait(Duration::from_secs(30)).unwrap_err();
        canceller.join().unwrap();
        assert_eq!(err.kind(), ExErrorKind::Cancelled);
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
