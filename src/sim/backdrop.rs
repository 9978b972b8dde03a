//! Decorative backdrop drift
//!
//! Starfield and sparkle layers rotate slowly, portal markers bob and spin,
//! and a highlight light orbits the scene. None of it reads avatar state.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::BackdropTuning;

/// Height of the orbiting light above the portal row
const LIGHT_HEIGHT: f32 = 4.0;
/// Depth of the portal row
const PORTAL_DEPTH: f32 = -12.0;
/// Horizontal span the portals are spread across
const PORTAL_SPAN: f32 = 18.0;

/// One idle-animated portal marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    /// Rest position
    pub base: Vec3,
    /// Bob phase offset so portals do not move in lockstep
    pub phase: f32,
    /// Current vertical bob offset from `base`
    pub bob: f32,
    /// Spin around the portal's own axis (radians)
    pub spin: f32,
}

impl Portal {
    pub fn position(&self) -> Vec3 {
        self.base + Vec3::Y * self.bob
    }
}

/// Drift state for every backdrop layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    /// Starfield rotation: x is tilt, y is spin (radians)
    pub starfield_rotation: Vec2,
    pub sparkle_rotation: f32,
    pub portals: Vec<Portal>,
    pub light: Vec3,
    elapsed: f32,
}

impl Backdrop {
    pub fn new(tuning: &BackdropTuning) -> Self {
        let count = tuning.portal_count;
        let portals = (0..count)
            .map(|i| {
                let t = if count > 1 {
                    i as f32 / (count - 1) as f32
                } else {
                    0.5
                };
                Portal {
                    base: Vec3::new((t - 0.5) * PORTAL_SPAN, 0.0, PORTAL_DEPTH),
                    phase: i as f32 * TAU / count.max(1) as f32,
                    bob: 0.0,
                    spin: 0.0,
                }
            })
            .collect();

        let mut backdrop = Self {
            starfield_rotation: Vec2::ZERO,
            sparkle_rotation: 0.0,
            portals,
            light: Vec3::ZERO,
            elapsed: 0.0,
        };
        backdrop.pose(tuning);
        backdrop
    }

    /// Advance drift by `dt` seconds; `rate` scales every motion (reduced motion < 1)
    pub fn advance(&mut self, tuning: &BackdropTuning, dt: f32, rate: f32) {
        let dt = dt.max(0.0) * rate.max(0.0);
        self.elapsed += dt;

        self.starfield_rotation.x =
            (self.starfield_rotation.x + tuning.starfield_tilt * dt).rem_euclid(TAU);
        self.starfield_rotation.y =
            (self.starfield_rotation.y + tuning.starfield_spin * dt).rem_euclid(TAU);
        self.sparkle_rotation = (self.sparkle_rotation + tuning.sparkle_spin * dt).rem_euclid(TAU);

        for portal in &mut self.portals {
            portal.spin = (portal.spin + tuning.portal_spin * dt).rem_euclid(TAU);
        }

        self.pose(tuning);
    }

    /// Derive bob offsets and the light position from elapsed drift time
    fn pose(&mut self, tuning: &BackdropTuning) {
        for portal in &mut self.portals {
            portal.bob = tuning.portal_bob_amplitude
                * (self.elapsed * tuning.portal_bob_speed + portal.phase).sin();
        }

        let angle = self.elapsed * tuning.light_speed;
        self.light = Vec3::new(
            tuning.light_orbit_radius * angle.cos(),
            LIGHT_HEIGHT,
            PORTAL_DEPTH + tuning.light_orbit_radius * angle.sin(),
        );
    }
}

/// Scatter `count` stars on a spherical shell of `radius` (deterministic per seed)
pub fn generate_stars(seed: u64, count: usize, radius: f32) -> Vec<Vec3> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            // Uniform on the sphere: uniform z and azimuth
            let z: f32 = rng.random_range(-1.0..1.0);
            let theta: f32 = rng.random_range(0.0..TAU);
            let r = (1.0 - z * z).sqrt();
            let depth: f32 = rng.random_range(0.8..1.0);
            Vec3::new(r * theta.cos(), r * theta.sin(), z) * radius * depth
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portals_spread_and_bob() {
        let tuning = BackdropTuning::default();
        let mut backdrop = Backdrop::new(&tuning);
        assert_eq!(backdrop.portals.len(), tuning.portal_count as usize);
        assert!(backdrop.portals[0].base.x < backdrop.portals[2].base.x);

        for _ in 0..600 {
            backdrop.advance(&tuning, 1.0 / 60.0, 1.0);
            for portal in &backdrop.portals {
                assert!(portal.bob.abs() <= tuning.portal_bob_amplitude + 1e-6);
                assert!((0.0..TAU).contains(&portal.spin));
            }
        }
        // Phases differ, so the portals are not in lockstep
        assert_ne!(backdrop.portals[0].bob, backdrop.portals[1].bob);
    }

    #[test]
    fn test_light_stays_on_orbit() {
        let tuning = BackdropTuning::default();
        let mut backdrop = Backdrop::new(&tuning);
        for _ in 0..100 {
            backdrop.advance(&tuning, 0.1, 1.0);
            let flat = Vec2::new(backdrop.light.x, backdrop.light.z - PORTAL_DEPTH);
            assert!((flat.length() - tuning.light_orbit_radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_rate_freezes_drift() {
        let tuning = BackdropTuning::default();
        let mut backdrop = Backdrop::new(&tuning);
        let before = backdrop.clone();
        backdrop.advance(&tuning, 5.0, 0.0);
        assert_eq!(backdrop, before);
    }

    #[test]
    fn test_stars_deterministic_and_bounded() {
        let a = generate_stars(9, 200, 50.0);
        let b = generate_stars(9, 200, 50.0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);
        for star in &a {
            assert!(star.length() <= 50.0 + 1e-3);
            assert!(star.length() >= 40.0 - 1e-3);
        }
        assert_ne!(a, generate_stars(10, 200, 50.0));
    }
}
