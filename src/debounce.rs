//! # Debounce Module
//!
//! ## Purpose
//! Delays filter work until input has been quiet for the configured window.
//! Each new call cancels the pending one, so only the last value in a burst
//! is ever acted on.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Trailing-edge debouncer. `call` schedules the action after the delay and
/// aborts whatever was previously scheduled.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pending: None,
        }
    }

    /// Schedule `action` to run after the quiet window, cancelling any
    /// previously scheduled action.
    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Cancel without scheduling anything new
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_only_last_call_in_a_burst_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(30);

        for value in 1..=5 {
            let fired = Arc::clone(&fired);
            debouncer.call(async move {
                fired.store(value, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_spaced_calls_all_fire() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(10);

        for _ in 0..3 {
            let count = Arc::clone(&count);
            debouncer.call(async move {
                count.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(10);

        let flag = Arc::clone(&fired);
        debouncer.call(async move {
            flag.store(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
