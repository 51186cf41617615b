//! Delayed exit after a lost game

use std::time::{Duration, Instant};

/// Keeps the final board on screen for a while once the game is lost
#[derive(Debug, Clone, Copy)]
pub struct LossTimer {
    delay: Duration,
    lost_at: Option<Instant>,
}

impl LossTimer {
    /// Timer that expires `delay_secs` after the loss is first seen
    pub fn new(delay_secs: f32) -> Self {
        Self {
            delay: Duration::try_from_secs_f32(delay_secs.max(0.0)).unwrap_or(Duration::ZERO),
            lost_at: None,
        }
    }

    /// Check the game state at `now`
    ///
    /// The first call with `is_lost` set starts the timer, however the game
    /// was lost. Returns true once the delay has passed.
    pub fn update(&mut self, is_lost: bool, now: Instant) -> bool {
        if !is_lost {
            return false;
        }
        let lost_at = *self.lost_at.get_or_insert(now);
        now.saturating_duration_since(lost_at) >= self.delay
    }
}
