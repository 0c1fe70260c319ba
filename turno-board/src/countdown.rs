//! Countdown to block expiry
//!
//! A 1-second ticker publishing the remaining time as a zero-padded
//! `HH:MM:SS` string. Without a target, or once the target has passed,
//! the published value is `00:00:00`.

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::time::{Duration, Instant, interval};
use tokio_util::sync::CancellationToken;

/// Value shown when no block is running or the block has expired
pub const EXPIRED: &str = "00:00:00";

/// Format a remaining duration as zero-padded `HH:MM:SS`
///
/// Negative durations clamp to [`EXPIRED`]; hours are not wrapped at 24.
pub fn format_hms(left: chrono::Duration) -> String {
    let total = left.num_seconds();
    if total <= 0 {
        return EXPIRED.to_string();
    }
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Live countdown handle
///
/// Owns the background ticker task. Setting a new target (or dropping the
/// handle) cancels the previous ticker so re-targeting never leaks
/// intervals.
pub struct Countdown {
    tx: watch::Sender<String>,
    rx: watch::Receiver<String>,
    cancel: Option<CancellationToken>,
}

impl Countdown {
    /// Create a countdown with no target (reads [`EXPIRED`])
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(EXPIRED.to_string());
        Self {
            tx,
            rx,
            cancel: None,
        }
    }

    /// Subscribe to the displayed value
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.rx.clone()
    }

    /// Current displayed value
    pub fn remaining(&self) -> String {
        self.rx.borrow().clone()
    }

    /// Replace the countdown target
    ///
    /// `None` stops the ticker and pins the display to [`EXPIRED`]. The
    /// deadline is anchored to the runtime clock at call time, so ticks
    /// follow `tokio::time` (and therefore test-time control).
    pub fn set_target(&mut self, target: Option<DateTime<Local>>) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }

        let Some(target) = target else {
            let _ = self.tx.send(EXPIRED.to_string());
            return;
        };

        let left = target.signed_duration_since(Local::now());
        if left <= chrono::Duration::zero() {
            let _ = self.tx.send(EXPIRED.to_string());
            return;
        }

        let deadline = Instant::now()
            + Duration::from_millis(left.num_milliseconds().max(0) as u64);
        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());

        let tx = self.tx.clone();
        let _ = tx.send(format_hms(left));

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // first tick completes immediately; skip it, the value above
            // already reflects "now"
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let left = deadline.saturating_duration_since(Instant::now());
                        let left = chrono::Duration::from_std(left)
                            .unwrap_or_else(|_| chrono::Duration::zero());
                        let _ = tx.send(format_hms(left));
                        if left <= chrono::Duration::zero() {
                            break;
                        }
                    }
                }
            }
        });
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
