//! Countdown used to release pooled actors

/// One-shot countdown in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReleaseTimer {
    remaining: Option<f32>,
}

impl ReleaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or restart the countdown
    pub fn start(&mut self, seconds: f32) {
        self.remaining = Some(seconds.max(0.0));
    }

    /// Stop the countdown. Safe to call when nothing is pending.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advance by `delta_time`. Returns true exactly once, when the
    /// countdown reaches zero.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= delta_time;
        if *remaining <= 0.0 {
            self.remaining = None;
            true
        } else {
            false
        }
    }
}
