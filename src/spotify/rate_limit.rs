use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use tokio::time::sleep;

use crate::{config, warning};

/// Shared backoff gate for every request issued by one client.
///
/// The gate is a single "throttled" flag. While it is set no request may go
/// out; callers poll until it clears. The caller that flips the flag is the
/// only one that sleeps out the server's retry delay, everyone else just waits
/// for the flag, so a burst of 429s never turns into a burst of sleeps and
/// simultaneous retries. This is not a concurrency limiter.
#[derive(Debug)]
pub struct RateLimitGate {
    throttled: AtomicBool,
    poll_interval: Duration,
}

/// Held by the caller sleeping on behalf of everyone. Dropping it clears the
/// flag, also when the sleeping future is cancelled.
#[must_use = "the gate reopens as soon as the guard is dropped"]
pub struct ThrottleGuard<'a> {
    gate: &'a RateLimitGate,
}

impl Drop for ThrottleGuard<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}

impl RateLimitGate {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            throttled: AtomicBool::new(false),
            poll_interval,
        }
    }

    pub fn is_throttled(&self) -> bool {
        self.throttled.load(Ordering::Acquire)
    }

    /// Closes the gate. Returns `None` if another caller already holds it.
    pub fn acquire(&self) -> Option<ThrottleGuard<'_>> {
        self.throttled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ThrottleGuard { gate: self })
    }

    pub fn release(&self) {
        self.throttled.store(false, Ordering::Release);
    }

    /// Waits until no caller is backing off.
    pub async fn wait_until_open(&self) {
        while self.is_throttled() {
            sleep(self.poll_interval).await;
        }
    }

    /// Reacts to a throttling response.
    ///
    /// The first caller closes the gate and sleeps for `delay`; callers that
    /// find it already closed wait for it to reopen instead of starting a
    /// backoff of their own. Either way the gate is open on return.
    pub async fn back_off(&self, delay: Duration) {
        match self.acquire() {
            Some(_guard) => {
                sleep(delay).await;
            }
            None => self.wait_until_open().await,
        }
    }
}

impl Default for RateLimitGate {
    fn default() -> Self {
        Self::new(config::THROTTLE_POLL_INTERVAL)
    }
}

/// Largest delay that is honoured without a warning.
pub const RETRY_AFTER_WARN_SECS: u64 = 120;

/// Parses a `Retry-After` header value in seconds.
///
/// A missing or unparsable value falls back to one second so the retry is
/// never immediate.
pub fn parse_retry_after(value: Option<&str>) -> Duration {
    let secs = value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1);
    if secs > RETRY_AFTER_WARN_SECS {
        warning!(
            "Retry after has reached an abnormal high of {} seconds. Waiting anyway.",
            secs
        );
    }
    Duration::from_secs(secs)
}
