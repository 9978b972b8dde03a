//! Simulation state record
//!
//! Everything a tick reads or writes lives in `SimState`. Browser event
//! handlers never touch it; they only write the frame input.

use serde::{Deserialize, Serialize};

use super::animation::SpriteAnimation;
use super::backdrop::Backdrop;
use super::collision::HotspotTracker;
use super::effects::EffectManager;
use super::motion::{AvatarMotion, Track};
use crate::tuning::Tuning;

/// RNG seed wrapper so a state can be rebuilt with the same effect stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed for the star layout, kept apart from the effect stream
    pub fn star_seed(&self) -> u64 {
        self.seed ^ 0x5EED_57A2
    }
}

/// Complete simulation state owned by the frame orchestrator
#[derive(Debug, Clone)]
pub struct SimState {
    pub rng_state: RngState,
    pub track: Track,
    pub motion: AvatarMotion,
    pub animation: SpriteAnimation,
    pub hotspots: HotspotTracker,
    pub effects: EffectManager,
    pub backdrop: Backdrop,
    /// Simulated seconds (pauses while the page is hidden)
    pub elapsed: f64,
    /// Ticks actually simulated
    pub time_ticks: u64,
}

impl SimState {
    /// Fresh state for a viewport of the given size, avatar at track center
    pub fn new(seed: u64, width: f32, height: f32, tuning: &Tuning) -> Self {
        let track = Track::from_viewport(width, height, &tuning.motion);
        Self {
            rng_state: RngState::new(seed),
            track,
            motion: AvatarMotion::at_rest(&track),
            animation: SpriteAnimation::default(),
            hotspots: HotspotTracker::default(),
            effects: EffectManager::new(seed, &tuning.effects),
            backdrop: Backdrop::new(&tuning.backdrop),
            elapsed: 0.0,
            time_ticks: 0,
        }
    }

    /// Rebuild the track for a new viewport and re-seat the avatar on it
    pub fn resize(&mut self, width: f32, height: f32, tuning: &Tuning) {
        self.track = Track::from_viewport(width, height, &tuning.motion);
        self.motion.retrack(&self.track);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_centered() {
        let tuning = Tuning::default();
        let state = SimState::new(1, 1000.0, 700.0, &tuning);
        assert_eq!(state.motion.pos.x, 500.0);
        assert_eq!(state.motion.pos.y, 700.0 - tuning.motion.baseline_offset);
        assert_eq!(state.time_ticks, 0);
        assert!(state.effects.active().is_empty());
    }

    #[test]
    fn test_resize_reclamps_avatar() {
        let tuning = Tuning::default();
        let mut state = SimState::new(1, 1000.0, 700.0, &tuning);
        state.motion.pos.x = 900.0;
        state.resize(500.0, 400.0, &tuning);
        assert_eq!(state.track.width, 500.0);
        assert_eq!(state.motion.pos.x, 500.0 - tuning.motion.track_padding);
        assert_eq!(state.motion.pos.y, state.track.baseline);
    }
}
