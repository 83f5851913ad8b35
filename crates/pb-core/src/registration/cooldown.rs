use serde::{Deserialize, Serialize};

/// Seconds a user waits before another verification code can be requested.
pub const DEFAULT_RESEND_COOLDOWN_SECS: u32 = 60;

/// Countdown gating verification-code re-dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendCooldown {
    remaining: u32,
}

impl ResendCooldown {
    pub fn new(period_secs: u32) -> Self {
        Self {
            remaining: period_secs,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Resend is allowed once the countdown reaches zero.
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// One-second decrement, saturating at zero. Returns the new value.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_COOLDOWN_SECS)
    }
}
