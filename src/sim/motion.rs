//! Avatar movement on a horizontal rail
//!
//! Acceleration toward the held direction, proportional damping every tick,
//! a hard speed cap, and a cosmetic clamp to the track ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::input::InputState;
use crate::tuning::MotionTuning;

/// Which way the avatar sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The rail the avatar walks on (screen pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub width: f32,
    pub padding: f32,
    /// Y coordinate the avatar's feet rest on
    pub baseline: f32,
}

impl Track {
    /// Build a track spanning the viewport, baseline near its bottom edge
    pub fn from_viewport(width: f32, height: f32, tuning: &MotionTuning) -> Self {
        Self {
            width,
            padding: tuning.track_padding,
            baseline: (height - tuning.baseline_offset).max(0.0),
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.padding
    }

    /// Right end; collapses onto `min_x` when the viewport is narrower than the padding
    #[inline]
    pub fn max_x(&self) -> f32 {
        (self.width - self.padding).max(self.padding)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.min_x() + self.max_x()) / 2.0
    }

    #[inline]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x(), self.max_x())
    }
}

/// Kinematic state of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarMotion {
    /// Bottom-center of the avatar; `y` always equals the track baseline
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    /// Visual lean in degrees, positive when moving right
    pub tilt_deg: f32,
}

impl AvatarMotion {
    /// Avatar standing still at the middle of the track
    pub fn at_rest(track: &Track) -> Self {
        Self {
            pos: Vec2::new(track.center_x(), track.baseline),
            vel: Vec2::ZERO,
            facing: Facing::default(),
            tilt_deg: 0.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Screen-space box of an avatar of the given size standing at `pos`
    pub fn bounds(&self, width: f32, height: f32) -> Rect {
        Rect::new(
            self.pos.x - width / 2.0,
            self.pos.y - height,
            self.pos.x + width / 2.0,
            self.pos.y,
        )
    }

    /// Re-seat the avatar after the track changed (viewport resize)
    pub fn retrack(&mut self, track: &Track) {
        self.pos.x = track.clamp_x(self.pos.x);
        self.pos.y = track.baseline;
    }

    /// Advance motion by `dt` seconds
    pub fn update(&mut self, input: &InputState, track: &Track, tuning: &MotionTuning, dt: f32) {
        let dt = dt.max(0.0);

        let intent = Vec2::new(input.horizontal_axis(), 0.0).normalize_or_zero();
        self.vel += intent * tuning.accel * dt;

        // Damping factor floors at zero: a long tick stops the avatar instead
        // of flipping its direction.
        let keep = (1.0 - tuning.damping * dt).max(0.0);
        self.vel *= keep;
        self.vel = self.vel.clamp_length_max(tuning.max_speed);

        // Velocity survives the clamp; the track ends are not walls.
        self.pos += self.vel * dt;
        self.pos.x = track.clamp_x(self.pos.x);
        self.pos.y = track.baseline;

        self.tilt_deg =
            (self.vel.x * tuning.tilt_per_speed).clamp(-tuning.max_tilt_deg, tuning.max_tilt_deg);

        if self.vel.x > tuning.facing_dead_zone {
            self.facing = Facing::Right;
        } else if self.vel.x < -tuning.facing_dead_zone {
            self.facing = Facing::Left;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Key;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn track() -> Track {
        Track {
            width: 1280.0,
            padding: 40.0,
            baseline: 600.0,
        }
    }

    fn held(key: Key) -> InputState {
        let mut input = InputState::default();
        input.press(key);
        input
    }

    #[test]
    fn test_left_then_release_scenario() {
        let tuning = MotionTuning::default();
        assert_eq!((tuning.accel, tuning.damping, tuning.max_speed), (900.0, 6.0, 320.0));
        let track = track();
        let mut motion = AvatarMotion::at_rest(&track);
        let start_x = motion.pos.x;

        let left = held(Key::Left);
        for _ in 0..60 {
            motion.update(&left, &track, &tuning, DT);
            assert!(motion.vel.x <= 0.0);
            assert!(motion.vel.x.abs() <= 320.0);
        }
        let peak = motion.vel.x.abs();
        assert!(peak > 100.0, "should build real speed, got {}", peak);
        assert_eq!(motion.facing, Facing::Left);

        let idle = InputState::default();
        let mut last = motion.vel.x.abs();
        for _ in 0..120 {
            motion.update(&idle, &track, &tuning, DT);
            let speed = motion.vel.x.abs();
            assert!(speed <= last);
            assert!(motion.vel.x <= 0.0, "damping must not reverse direction");
            last = speed;
        }
        assert!(last < 1.0);
        assert!(motion.pos.x < start_x);
        assert!(motion.pos.x >= track.padding);
    }

    #[test]
    fn test_large_delta_keeps_speed_cap() {
        let tuning = MotionTuning::default();
        let track = track();
        let mut motion = AvatarMotion::at_rest(&track);
        motion.update(&held(Key::Right), &track, &tuning, 0.15);
        assert!(motion.speed() <= tuning.max_speed + 1e-3);

        // A tick long enough to overshoot a naive Euler step
        motion.vel = Vec2::new(300.0, 0.0);
        motion.update(&InputState::default(), &track, &tuning, 5.0);
        assert!(motion.vel.x >= 0.0);
        assert!(motion.speed() <= tuning.max_speed);
    }

    #[test]
    fn test_clamp_keeps_velocity() {
        let tuning = MotionTuning::default();
        let track = track();
        let mut motion = AvatarMotion::at_rest(&track);
        motion.pos.x = track.max_x() - 1.0;
        motion.vel = Vec2::new(200.0, 0.0);
        motion.update(&held(Key::D), &track, &tuning, DT);
        assert_eq!(motion.pos.x, track.max_x());
        assert!(motion.vel.x > 0.0);
    }

    #[test]
    fn test_tilt_bounded() {
        let tuning = MotionTuning::default();
        let track = track();
        let mut motion = AvatarMotion::at_rest(&track);
        motion.vel = Vec2::new(-320.0, 0.0);
        motion.update(&held(Key::Left), &track, &tuning, DT);
        assert_eq!(motion.tilt_deg, -6.0);
    }

    #[test]
    fn test_facing_dead_zone() {
        let tuning = MotionTuning::default();
        let track = track();
        let mut motion = AvatarMotion::at_rest(&track);
        motion.facing = Facing::Left;
        // Slow drift right stays under the dead zone
        motion.vel = Vec2::new(3.0, 0.0);
        motion.update(&InputState::default(), &track, &tuning, DT);
        assert_eq!(motion.facing, Facing::Left);
    }

    #[test]
    fn test_retrack_on_resize() {
        let track = track();
        let mut motion = AvatarMotion::at_rest(&track);
        motion.pos.x = 1200.0;
        let narrow = Track {
            width: 400.0,
            padding: 40.0,
            baseline: 300.0,
        };
        motion.retrack(&narrow);
        assert_eq!(motion.pos, Vec2::new(360.0, 300.0));
    }

    #[test]
    fn test_bounds() {
        let track = track();
        let motion = AvatarMotion::at_rest(&track);
        let rect = motion.bounds(64.0, 96.0);
        assert_eq!(rect.max_y, 600.0);
        assert_eq!(rect.width(), 64.0);
        assert_eq!(rect.height(), 96.0);
    }

    fn input_strategy() -> impl Strategy<Value = InputState> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(l, r, up)| {
            let mut input = InputState::default();
            if l {
                input.press(Key::Left);
            }
            if r {
                input.press(Key::D);
            }
            if up {
                input.press(Key::W);
            }
            input
        })
    }

    proptest! {
        #[test]
        fn prop_position_and_speed_bounded(
            steps in prop::collection::vec((input_strategy(), 0.0f32..2.0), 1..200)
        ) {
            let tuning = MotionTuning::default();
            let track = track();
            let mut motion = AvatarMotion::at_rest(&track);
            for (input, dt) in &steps {
                motion.update(input, &track, &tuning, *dt);
                prop_assert!(motion.pos.x >= track.padding);
                prop_assert!(motion.pos.x <= track.width - track.padding);
                prop_assert_eq!(motion.pos.y, track.baseline);
                prop_assert!(motion.speed() <= tuning.max_speed + 1e-3);
                prop_assert!(motion.tilt_deg.abs() <= tuning.max_tilt_deg);
            }
        }

        #[test]
        fn prop_damping_never_reverses(
            v0 in -320.0f32..320.0,
            dts in prop::collection::vec(0.0f32..3.0, 1..100)
        ) {
            let tuning = MotionTuning::default();
            let track = track();
            let mut motion = AvatarMotion::at_rest(&track);
            motion.vel = Vec2::new(v0, 0.0);
            let idle = InputState::default();
            let mut last = v0.abs();
            for dt in dts {
                motion.update(&idle, &track, &tuning, dt);
                prop_assert!(motion.vel.x * v0 >= 0.0);
                prop_assert!(motion.vel.x.abs() <= last);
                last = motion.vel.x.abs();
            }
        }
    }
}
