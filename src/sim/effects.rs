//! Shooting stars: short-lived effects spawned on a jittered timer
//!
//! The manager owns every live effect. Expired effects are swap-removed during
//! the same pass that advances them, so removal is O(1) and no neighbor is
//! skipped or visited twice.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::EffectTuning;

pub type EffectId = u32;

/// A single shooting star
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub id: EffectId,
    pub pos: Vec3,
    /// Unit travel direction
    pub dir: Vec3,
    pub speed: f32,
    pub remaining_life: f32,
    pub initial_life: f32,
    /// `remaining_life / initial_life`, floored at zero
    pub opacity: f32,
}

impl ShootingStar {
    fn advance(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
        self.remaining_life -= dt;
        self.opacity = if self.initial_life > 0.0 {
            (self.remaining_life / self.initial_life).max(0.0)
        } else {
            0.0
        };
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining_life <= 0.0
    }
}

/// Spawns and expirations from one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectTick {
    pub spawned: Option<EffectId>,
    pub expired: Vec<EffectId>,
}

/// Owner of the active shooting-star set
#[derive(Debug, Clone)]
pub struct EffectManager {
    stars: Vec<ShootingStar>,
    /// Seconds until the next spawn
    spawn_timer: f32,
    spawning: bool,
    rng: Pcg32,
    next_id: EffectId,
}

impl EffectManager {
    pub fn new(seed: u64, tuning: &EffectTuning) -> Self {
        let mut manager = Self {
            stars: Vec::new(),
            spawn_timer: 0.0,
            spawning: true,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        manager.spawn_timer = manager.next_interval(tuning);
        manager
    }

    pub fn active(&self) -> &[ShootingStar] {
        &self.stars
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Turn the spawner on or off; live effects still finish their lives
    pub fn set_spawning(&mut self, spawning: bool) {
        self.spawning = spawning;
    }

    fn next_interval(&mut self, tuning: &EffectTuning) -> f32 {
        let jitter = if tuning.spawn_jitter > 0.0 {
            self.rng.random_range(0.0..tuning.spawn_jitter)
        } else {
            0.0
        };
        tuning.spawn_base.max(0.0) + jitter
    }

    fn random_axis(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Create one shooting star with a random start, direction and speed
    pub fn spawn(&mut self, tuning: &EffectTuning) -> EffectId {
        let pos = Vec3::new(
            self.random_axis(tuning.spawn_min[0], tuning.spawn_max[0]),
            self.random_axis(tuning.spawn_min[1], tuning.spawn_max[1]),
            self.random_axis(tuning.spawn_min[2], tuning.spawn_max[2]),
        );

        let cone = tuning.cone_half_angle_deg.abs().to_radians();
        let yaw = self.random_axis(-cone, cone);
        let pitch = self.random_axis(-cone / 2.0, cone / 2.0);
        let heading = Vec3::from_array(tuning.heading).normalize_or(Vec3::NEG_X);
        let dir = (Quat::from_rotation_z(yaw) * Quat::from_rotation_y(pitch) * heading)
            .normalize_or(heading);

        let speed = self.random_axis(tuning.speed_min, tuning.speed_max);

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.stars.push(ShootingStar {
            id,
            pos,
            dir,
            speed,
            remaining_life: tuning.lifetime,
            initial_life: tuning.lifetime,
            opacity: 1.0,
        });
        log::trace!("Shooting star {} spawned at {:?}", id, pos);
        id
    }

    /// Advance live effects, drop expired ones, then run the spawn timer.
    ///
    /// At most one effect spawns per tick however long `dt` is.
    pub fn tick(&mut self, tuning: &EffectTuning, dt: f32) -> EffectTick {
        let dt = dt.max(0.0);
        let mut out = EffectTick::default();

        let mut i = 0;
        while i < self.stars.len() {
            self.stars[i].advance(dt);
            if self.stars[i].is_expired() {
                let gone = self.stars.swap_remove(i);
                log::trace!("Shooting star {} expired", gone.id);
                out.expired.push(gone.id);
            } else {
                i += 1;
            }
        }

        if self.spawning {
            self.spawn_timer -= dt;
            if self.spawn_timer <= 0.0 {
                out.spawned = Some(self.spawn(tuning));
                self.spawn_timer = self.next_interval(tuning);
            }
        }

        out
    }
}
