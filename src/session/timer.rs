//! Elapsed-time counter for the recording session
//!
//! The counter value lives in an atomic so readers never contend with the
//! ticker task. The ticker itself is an owned resource: starting while a
//! ticker is already running replaces it, and dropping the timer (or the
//! guard) aborts the task, so a stale ticker can never double-count.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;

/// Render whole seconds as HH:MM:SS
///
/// The hour field widens past two digits instead of rolling over.
pub fn format_hms(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60
    )
}

/// Aborts the ticker task when dropped
struct TickerGuard(JoinHandle<()>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// One-second recording counter
pub struct RecordingTimer {
    seconds: Arc<AtomicU64>,
    ticker: Option<TickerGuard>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self {
            seconds: Arc::new(AtomicU64::new(0)),
            ticker: None,
        }
    }

    /// Reset to zero and begin ticking
    pub fn start(&mut self) {
        self.seconds.store(0, Ordering::SeqCst);
        self.spawn_ticker();
    }

    /// Stop ticking, keep the current value
    pub fn pause(&mut self) {
        self.ticker = None;
    }

    /// Continue ticking from the current value
    pub fn resume(&mut self) {
        self.spawn_ticker();
    }

    /// Stop ticking and clear the value
    pub fn reset(&mut self) {
        self.ticker = None;
        self.seconds.store(0, Ordering::SeqCst);
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }

    pub fn display(&self) -> String {
        format_hms(self.elapsed_secs())
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    fn spawn_ticker(&mut self) {
        // drop any previous ticker first so two can never run at once
        self.ticker = None;

        let seconds = Arc::clone(&self.seconds);
        let handle = tokio::spawn(async move {
            let mut ticks = time::interval(Duration::from_secs(1));
            // the first tick completes immediately
            ticks.tick().await;
            loop {
                ticks.tick().await;
                seconds.fetch_add(1, Ordering::SeqCst);
            }
        });

        self.ticker = Some(TickerGuard(handle));
    }
}

impl Default for RecordingTimer {
    fn default() -> Self {
        Self::new()
    }
}
