//! Walk-cycle playback synced to avatar speed

use serde::{Deserialize, Serialize};

use super::motion::AvatarMotion;
use crate::atlas::SpriteAtlas;
use crate::tuning::AnimationTuning;

/// What changed during one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationStep {
    pub frame_changed: bool,
    /// A footstep tone is due this tick
    pub footstep: bool,
}

/// Sprite playback state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    /// Current atlas frame, always below the atlas frame count
    pub frame_index: u32,
    /// Time spent on the current frame
    pub frame_elapsed: f32,
    pub walking: bool,
    /// Time since the last footstep
    pub step_elapsed: f32,
}

impl SpriteAnimation {
    /// Advance playback using the tick's final motion.
    ///
    /// Without an atlas the avatar has a single static frame, but walking and
    /// footsteps still follow the motion.
    pub fn advance(
        &mut self,
        motion: &AvatarMotion,
        atlas: Option<&SpriteAtlas>,
        tuning: &AnimationTuning,
        dt: f32,
    ) -> AnimationStep {
        let frame_count = atlas.map_or(1, |a| a.frame_count()).max(1);
        self.walking = motion.speed() > tuning.walk_threshold;

        if !self.walking {
            let frame_changed = self.frame_index != 0;
            self.frame_index = 0;
            self.frame_elapsed = 0.0;
            self.step_elapsed = 0.0;
            return AnimationStep {
                frame_changed,
                footstep: false,
            };
        }

        let mut step = AnimationStep::default();
        let dt = dt.max(0.0);

        self.frame_elapsed += dt;
        if tuning.frame_duration > 0.0 {
            while self.frame_elapsed >= tuning.frame_duration {
                self.frame_elapsed -= tuning.frame_duration;
                let next = (self.frame_index + 1) % frame_count;
                step.frame_changed |= next != self.frame_index;
                self.frame_index = next;
            }
        }
        // Atlas may have been swapped for a shorter one
        self.frame_index %= frame_count;

        self.step_elapsed += dt;
        if tuning.step_interval > 0.0 && self.step_elapsed >= tuning.step_interval {
            self.step_elapsed %= tuning.step_interval;
            step.footstep = true;
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::Track;
    use glam::Vec2;
    use image::{Rgba, RgbaImage};
    use std::collections::HashSet;

    const DT: f32 = 1.0 / 60.0;

    fn atlas() -> SpriteAtlas {
        let source = RgbaImage::from_pixel(32, 48, Rgba([200, 100, 50, 255]));
        SpriteAtlas::from_image(&source.into())
    }

    fn moving(vx: f32) -> AvatarMotion {
        let track = Track {
            width: 800.0,
            padding: 40.0,
            baseline: 500.0,
        };
        let mut motion = AvatarMotion::at_rest(&track);
        motion.vel = Vec2::new(vx, 0.0);
        motion
    }

    #[test]
    fn test_idle_never_changes_frame() {
        let atlas = atlas();
        let tuning = AnimationTuning::default();
        let mut anim = SpriteAnimation::default();
        let still = moving(2.0);
        for _ in 0..100 {
            let step = anim.advance(&still, Some(&atlas), &tuning, DT);
            assert!(!step.frame_changed);
            assert!(!step.footstep);
            assert_eq!(anim.frame_index, 0);
        }
        assert!(!anim.walking);
    }

    #[test]
    fn test_walk_cycles_all_frames() {
        let atlas = atlas();
        let tuning = AnimationTuning::default();
        let mut anim = SpriteAnimation::default();
        let walk = moving(150.0);

        let mut seen = HashSet::new();
        for _ in 0..240 {
            anim.advance(&walk, Some(&atlas), &tuning, DT);
            assert!(anim.frame_index < atlas.frame_count());
            seen.insert(anim.frame_index);
        }
        assert!(anim.walking);
        assert_eq!(seen.len(), atlas.frame_count() as usize);
    }

    #[test]
    fn test_stop_resets_pose() {
        let atlas = atlas();
        let tuning = AnimationTuning::default();
        let mut anim = SpriteAnimation::default();
        for _ in 0..20 {
            anim.advance(&moving(150.0), Some(&atlas), &tuning, DT);
        }
        assert_ne!(anim.frame_index, 0);

        anim.advance(&moving(0.0), Some(&atlas), &tuning, DT);
        assert!(!anim.walking);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.frame_elapsed, 0.0);
        assert_eq!(anim.step_elapsed, 0.0);
    }

    #[test]
    fn test_footstep_interval() {
        let tuning = AnimationTuning::default();
        let mut anim = SpriteAnimation::default();
        let walk = moving(-150.0);

        let mut steps = 0;
        // One second of walking at 0.32 s per step
        for _ in 0..60 {
            if anim.advance(&walk, None, &tuning, DT).footstep {
                steps += 1;
            }
        }
        assert_eq!(steps, 3);
    }

    #[test]
    fn test_no_atlas_stays_on_frame_zero() {
        let tuning = AnimationTuning::default();
        let mut anim = SpriteAnimation::default();
        for _ in 0..60 {
            let step = anim.advance(&moving(150.0), None, &tuning, DT);
            assert!(!step.frame_changed);
        }
        assert!(anim.walking);
        assert_eq!(anim.frame_index, 0);
    }
}
