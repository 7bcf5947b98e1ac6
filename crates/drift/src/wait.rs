//! Bounded polling wait before destructive operations.
//!
//! Some deletions should wait for dependent entities to disappear first
//! (e.g. workspaces still attached to a variable set). The wait is best
//! effort: once the timeout is spent the caller proceeds anyway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Polling interval and total budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Pause between checks
    pub interval: Duration,
    /// Total time to wait before giving up
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(300),
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Upper bound on the number of checks a wait can perform.
    pub fn max_checks(&self) -> u32 {
        if self.interval.is_zero() {
            return u32::MAX;
        }
        let ratio = self.timeout.as_nanos() / self.interval.as_nanos();
        u32::try_from(ratio).unwrap_or(u32::MAX).saturating_add(1)
    }
}

/// Cooperative cancellation for a running wait. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// No dependents remain
    Cleared { checks: u32 },
    /// Budget spent with dependents remaining; proceed regardless
    TimedOut { checks: u32, remaining: usize },
    /// Stopped through the cancel token
    Cancelled { checks: u32 },
}

impl WaitOutcome {
    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared { .. })
    }

    pub fn checks(&self) -> u32 {
        match self {
            Self::Cleared { checks }
            | Self::TimedOut { checks, .. }
            | Self::Cancelled { checks } => *checks,
        }
    }
}

/// Poll `remaining` until it reports zero dependents, the timeout passes, or
/// the token is cancelled.
///
/// A failing check counts as "not yet" and is logged; the wait never turns a
/// check failure into an error.
pub fn wait_until_gone<F>(
    what: &str,
    config: &PollConfig,
    cancel: Option<&CancelToken>,
    mut remaining: F,
) -> WaitOutcome
where
    F: FnMut() -> anyhow::Result<usize>,
{
    // A timeout past the end of the clock means no deadline.
    let deadline = Instant::now().checked_add(config.timeout);
    let mut checks = 0;
    let mut last_remaining = 0;

    loop {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            log::debug!("wait for {what} cancelled after {checks} checks");
            return WaitOutcome::Cancelled { checks };
        }

        checks += 1;
        match remaining() {
            Ok(0) => {
                log::debug!("{what} cleared after {checks} checks");
                return WaitOutcome::Cleared { checks };
            }
            Ok(count) => {
                last_remaining = count;
                log::debug!("waiting for {count} {what} to go away");
            }
            Err(e) => log::warn!("checking {what} failed, will retry: {e:#}"),
        }

        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    log::warn!(
                        "{what} still present after {:?}, proceeding anyway",
                        config.timeout
                    );
                    return WaitOutcome::TimedOut {
                        checks,
                        remaining: last_remaining,
                    };
                }
                config.interval.min(deadline - now)
            }
            None => config.interval,
        };
        thread::sleep(pause);
    }
}
