use std::sync::{Arc, Mutex};
use std::time::Duration;

use pb_core::registration::ResendCooldown;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// One-second countdown gating verification-code resends.
///
/// The current value lives in a watch channel shared with the ticking task:
/// `None` while no countdown is armed (outside step 3), `Some(cooldown)`
/// otherwise. At most one ticking task exists; starting again aborts the
/// previous one.
pub struct ResendTimer {
    period_secs: u32,
    state: Arc<watch::Sender<Option<ResendCooldown>>>,
    task: Mutex<Option<AbortHandle>>,
}

impl ResendTimer {
    pub fn new(period_secs: u32) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            period_secs,
            state: Arc::new(state),
            task: Mutex::new(None),
        }
    }

    /// Seconds left, or `None` when the countdown is not armed.
    pub fn remaining(&self) -> Option<u32> {
        self.state.borrow().map(|cooldown| cooldown.remaining())
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_some_and(|cooldown| cooldown.is_ready())
    }

    /// Re-arms the countdown at the full period.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = task.take() {
            existing.abort();
        }

        self.state
            .send_replace(Some(ResendCooldown::new(self.period_secs)));
        if self.period_secs == 0 {
            return;
        }

        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            loop {
                ticker.tick().await;
                let mut finished = true;
                state.send_modify(|current| {
                    if let Some(cooldown) = current.as_mut() {
                        finished = cooldown.tick() == 0;
                    }
                });
                if finished {
                    break;
                }
            }
        });
        *task = Some(handle.abort_handle());
        debug!(period_secs = self.period_secs, "resend countdown started");
    }

    /// Cancels the countdown and disarms it.
    pub fn stop(&self) {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = task.take() {
            handle.abort();
            debug!("resend countdown stopped");
        }
        self.state.send_replace(None);
    }
}

impl Drop for ResendTimer {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}
