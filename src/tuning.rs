//! Data-driven tuning constants
//!
//! Every knob the simulation reads lives here so a JSON document can override
//! any subset of them. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Avatar motion (rail-constrained, screen pixels, y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Horizontal acceleration while a direction key is held (px/s²)
    pub accel: f32,
    /// Proportional damping rate applied every tick (1/s)
    pub damping: f32,
    /// Velocity magnitude cap (px/s)
    pub max_speed: f32,
    /// Distance kept between the avatar center and each track end (px)
    pub track_padding: f32,
    /// Distance from the viewport bottom to the baseline the avatar stands on (px)
    pub baseline_offset: f32,
    /// Tilt per unit of horizontal speed (degrees per px/s)
    pub tilt_per_speed: f32,
    /// Tilt magnitude limit (degrees)
    pub max_tilt_deg: f32,
    /// Facing only flips once |vx| exceeds this (px/s)
    pub facing_dead_zone: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            accel: 900.0,
            damping: 6.0,
            max_speed: 320.0,
            track_padding: 40.0,
            baseline_offset: 56.0,
            tilt_per_speed: 0.03,
            max_tilt_deg: 6.0,
            facing_dead_zone: 5.0,
        }
    }
}

/// Walk-cycle playback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    /// Speed above which the avatar counts as walking (px/s)
    pub walk_threshold: f32,
    /// Seconds each atlas frame is shown
    pub frame_duration: f32,
    /// Seconds between footstep tones
    pub step_interval: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            walk_threshold: 8.0,
            frame_duration: 0.12,
            step_interval: 0.32,
        }
    }
}

/// Hotspot activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Avatar box size used for collision (px)
    pub avatar_width: f32,
    pub avatar_height: f32,
    /// The avatar box is inflated by this much on every side (px)
    pub padding: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            avatar_width: 64.0,
            avatar_height: 96.0,
            padding: 12.0,
        }
    }
}

/// Shooting-star spawner (scene units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    /// Minimum seconds between spawns
    pub spawn_base: f32,
    /// Random extra seconds added to `spawn_base`
    pub spawn_jitter: f32,
    /// Lifetime of every shooting star (seconds)
    pub lifetime: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Central travel direction (normalized on use)
    pub heading: [f32; 3],
    /// Half-angle of the cone directions are drawn from (degrees)
    pub cone_half_angle_deg: f32,
    /// Spawn volume corners
    pub spawn_min: [f32; 3],
    pub spawn_max: [f32; 3],
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            spawn_base: 2.0,
            spawn_jitter: 3.0,
            lifetime: 1.4,
            speed_min: 22.0,
            speed_max: 34.0,
            heading: [-1.0, -0.35, 0.0],
            cone_half_angle_deg: 18.0,
            spawn_min: [-10.0, 8.0, -40.0],
            spawn_max: [40.0, 24.0, -20.0],
        }
    }
}

/// Decorative drift (radians and scene units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropTuning {
    pub starfield_spin: f32,
    pub starfield_tilt: f32,
    pub sparkle_spin: f32,
    pub portal_count: u32,
    pub portal_bob_amplitude: f32,
    pub portal_bob_speed: f32,
    pub portal_spin: f32,
    pub light_orbit_radius: f32,
    pub light_speed: f32,
}

impl Default for BackdropTuning {
    fn default() -> Self {
        Self {
            starfield_spin: 0.02,
            starfield_tilt: 0.005,
            sparkle_spin: -0.035,
            portal_count: 3,
            portal_bob_amplitude: 0.25,
            portal_bob_speed: 1.6,
            portal_spin: 0.6,
            light_orbit_radius: 6.0,
            light_speed: 0.4,
        }
    }
}

/// Frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameTuning {
    /// Largest delta a single tick may integrate (seconds)
    pub max_delta: f32,
}

impl Default for FrameTuning {
    fn default() -> Self {
        Self { max_delta: 0.1 }
    }
}

/// All tuning groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub motion: MotionTuning,
    pub animation: AnimationTuning,
    pub collision: CollisionTuning,
    pub effects: EffectTuning,
    pub backdrop: BackdropTuning,
    pub frame: FrameTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
