//! Frame clocks
//!
//! A paused clock accrues no time. On resume the next delta is a nominal
//! first-frame step, so a page hidden for an hour does not replay that hour.

use crate::consts::FIRST_FRAME_DT;

/// Source of per-tick deltas
pub trait Clock {
    /// Seconds since the previous call; zero while paused
    fn delta(&mut self) -> f32;
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;
}

/// Clock fed by the browser's frame timestamps (milliseconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    now_ms: f64,
    last_ms: Option<f64>,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the timestamp of the frame about to run
    pub fn observe(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }
}

impl Clock for FrameClock {
    fn delta(&mut self) -> f32 {
        if self.paused {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((self.now_ms - last) / 1000.0).max(0.0) as f32,
            None => FIRST_FRAME_DT,
        };
        self.last_ms = Some(self.now_ms);
        dt
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_ms = None;
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Hand-cranked clock for tests and the headless session
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: f32,
    paused: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `seconds` of wall time pass; discarded while paused
    pub fn advance(&mut self, seconds: f32) {
        if !self.paused {
            self.pending += seconds.max(0.0);
        }
    }
}

impl Clock for ManualClock {
    fn delta(&mut self) -> f32 {
        if self.paused {
            return 0.0;
        }
        std::mem::take(&mut self.pending)
    }

    fn pause(&mut self) {
        self.paused = true;
        self.pending = 0.0;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
