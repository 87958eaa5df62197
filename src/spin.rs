//! Time-driven spin animation.
//!
//! The host owns the clock and calls [`SpinSession::advance`] once per frame
//! with the time elapsed since the spin started.

use rand::Rng;
use std::{
    f64::consts::TAU,
    time::{
        Duration,
        Instant,
    },
};

pub const DEFAULT_FULL_TURNS: u32 = 10;
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(5000);

/// `1 - (1 - p)^3` for `p` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// `full_turns` whole turns plus a uniformly random fraction of one more.
pub fn random_spin_distance<R: Rng>(rng: &mut R, full_turns: u32) -> f64 {
    let extra: f64 = rng.random();
    f64::from(full_turns) * TAU + extra * TAU
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinFrame {
    pub rotation: f64,
    pub done: bool,
}

#[derive(Clone, Debug)]
pub struct SpinSession {
    started_at: Instant,
    start_rotation: f64,
    distance: f64,
    duration: Duration,
}

impl SpinSession {
    pub fn new(
        started_at: Instant,
        start_rotation: f64,
        distance: f64,
        duration: Duration,
    ) -> Self {
        Self {
            started_at,
            start_rotation,
            distance,
            duration,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn start_rotation(&self) -> f64 {
        self.start_rotation
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Rotation after `elapsed`; lands exactly on `start + distance` once
    /// the duration has passed.
    pub fn advance(&self, elapsed: Duration) -> SpinFrame {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return SpinFrame {
                rotation: self.start_rotation + self.distance,
                done: true,
            };
        }
        SpinFrame {
            rotation: self.start_rotation + self.distance * ease_out_cubic(progress),
            done: false,
        }
    }

    pub fn advance_to(&self, now: Instant) -> SpinFrame {
        self.advance(now.saturating_duration_since(self.started_at))
    }
}

#[derive(Clone, Debug, Default)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning(SpinSession),
}

impl SpinState {
    pub fn is_spinning(&self) -> bool {
        matches!(self, SpinState::Spinning(_))
    }
}
