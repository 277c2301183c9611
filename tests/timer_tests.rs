// Tests for the recording timer and its HH:MM:SS formatting
//
// All timing runs on tokio's paused test clock, so these tests are
// deterministic and complete immediately.

use std::time::Duration;
use tokio::task;
use tokio::time;
use viewfinder::session::{format_hms, RecordingTimer};

/// Advance the paused clock one second at a time, letting the ticker task
/// run after each step
async fn tick_secs(n: u64) {
    task::yield_now().await;
    for _ in 0..n {
        time::advance(Duration::from_secs(1)).await;
        task::yield_now().await;
    }
}

#[test]
fn test_format_hms_zero() {
    assert_eq!(format_hms(0), "00:00:00");
}

#[test]
fn test_format_hms_basic() {
    assert_eq!(format_hms(5), "00:00:05");
    assert_eq!(format_hms(65), "00:01:05");
    assert_eq!(format_hms(3725), "01:02:05");
}

#[test]
fn test_format_hms_minute_rollover() {
    assert_eq!(format_hms(59), "00:00:59");
    assert_eq!(format_hms(60), "00:01:00");
    assert_eq!(format_hms(3600), "01:00:00");
}

#[test]
fn test_format_hms_hours_widen() {
    // past 99 hours the hour field grows instead of rolling over
    assert_eq!(format_hms(99 * 3600), "99:00:00");
    assert_eq!(format_hms(100 * 3600), "100:00:00");
    assert_eq!(format_hms(360_000 + 62), "100:01:02");
}

#[tokio::test(start_paused = true)]
async fn test_timer_counts_seconds() {
    let mut timer = RecordingTimer::new();
    assert_eq!(timer.elapsed_secs(), 0);
    assert!(!timer.is_ticking());

    timer.start();
    assert!(timer.is_ticking());

    tick_secs(3).await;
    assert_eq!(timer.elapsed_secs(), 3);
    assert_eq!(timer.display(), "00:00:03");
}

#[tokio::test(start_paused = true)]
async fn test_timer_pause_freezes_value() {
    let mut timer = RecordingTimer::new();
    timer.start();
    tick_secs(2).await;

    timer.pause();
    assert!(!timer.is_ticking());

    // no ticker, so time passing changes nothing
    tick_secs(5).await;
    assert_eq!(timer.elapsed_secs(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_timer_resume_continues() {
    let mut timer = RecordingTimer::new();
    timer.start();
    tick_secs(2).await;

    timer.pause();
    tick_secs(5).await;

    timer.resume();
    tick_secs(3).await;

    assert_eq!(timer.elapsed_secs(), 5);
    assert_eq!(timer.display(), "00:00:05");
}

#[tokio::test(start_paused = true)]
async fn test_timer_reset_clears() {
    let mut timer = RecordingTimer::new();
    timer.start();
    tick_secs(4).await;

    timer.reset();
    assert_eq!(timer.elapsed_secs(), 0);
    assert!(!timer.is_ticking());

    tick_secs(3).await;
    assert_eq!(timer.elapsed_secs(), 0, "reset timer must not keep counting");
}

#[tokio::test(start_paused = true)]
async fn test_timer_restart_replaces_ticker() {
    let mut timer = RecordingTimer::new();
    timer.start();
    tick_secs(2).await;

    // starting again resets the value and replaces the ticker; the old one
    // must not keep incrementing alongside the new one
    timer.start();
    tick_secs(3).await;

    assert_eq!(timer.elapsed_secs(), 3, "exactly one ticker may run");
}

#[tokio::test(start_paused = true)]
async fn test_dropped_timer_stops_ticking() {
    let mut timer = RecordingTimer::new();
    timer.start();
    tick_secs(1).await;

    drop(timer);

    // the ticker task was aborted; advancing further must not panic or leak
    tick_secs(3).await;
}
