//! Per-frame scene description handed to the renderer

use glam::{Vec2, Vec3};

use crate::settings::QualityPreset;
use crate::sim::{Facing, SimState, generate_stars};

/// Radius of the background star shell (world units)
const STAR_SHELL_RADIUS: f32 = 60.0;
/// Radius of the closer sparkle shell
const SPARKLE_SHELL_RADIUS: f32 = 40.0;

/// Drawing surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// CSS pixels
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale: if scale > 0.0 { scale } else { 1.0 },
        }
    }

    /// Backing-store size in physical pixels (never zero)
    pub fn physical_size(&self) -> (u32, u32) {
        (
            ((self.width as f32 * self.scale).round() as u32).max(1),
            ((self.height as f32 * self.scale).round() as u32).max(1),
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Where and how the avatar is drawn (screen pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPose {
    /// Bottom-center of the avatar
    pub pos: Vec2,
    pub facing: Facing,
    pub tilt_deg: f32,
    pub frame_index: u32,
    pub walking: bool,
}

impl AvatarPose {
    pub fn from_state(state: &SimState) -> Self {
        Self {
            pos: state.motion.pos,
            facing: state.motion.facing,
            tilt_deg: state.motion.tilt_deg,
            frame_index: state.animation.frame_index,
            walking: state.animation.walking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalPose {
    pub pos: Vec3,
    pub spin: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarStreak {
    pub pos: Vec3,
    pub dir: Vec3,
    pub opacity: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub viewport: Viewport,
    pub avatar: AvatarPose,
    /// x is tilt, y is spin (radians)
    pub starfield_rotation: Vec2,
    pub sparkle_rotation: f32,
    pub portals: Vec<PortalPose>,
    pub light: Vec3,
    pub shooting_stars: Vec<StarStreak>,
    pub highlighted_card: Option<String>,
}

impl SceneFrame {
    /// Snapshot the drawable parts of the simulation
    pub fn capture(state: &SimState, viewport: Viewport, highlighted_card: Option<&str>) -> Self {
        let backdrop = &state.backdrop;
        Self {
            viewport,
            avatar: AvatarPose::from_state(state),
            starfield_rotation: backdrop.starfield_rotation,
            sparkle_rotation: backdrop.sparkle_rotation,
            portals: backdrop
                .portals
                .iter()
                .map(|p| PortalPose {
                    pos: p.position(),
                    spin: p.spin,
                })
                .collect(),
            light: backdrop.light,
            shooting_stars: state
                .effects
                .active()
                .iter()
                .map(|s| StarStreak {
                    pos: s.pos,
                    dir: s.dir,
                    opacity: s.opacity,
                })
                .collect(),
            highlighted_card: highlighted_card.map(str::to_owned),
        }
    }
}

/// Static star positions, generated once per session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarLayers {
    pub stars: Vec<Vec3>,
    pub sparkles: Vec<Vec3>,
}

impl StarLayers {
    pub fn generate(seed: u64, quality: QualityPreset) -> Self {
        let count = quality.star_count();
        let sparkles = if quality.sparkles_enabled() {
            generate_stars(seed.wrapping_add(1), count / 8, SPARKLE_SHELL_RADIUS)
        } else {
            Vec::new()
        };
        Self {
            stars: generate_stars(seed, count, STAR_SHELL_RADIUS),
            sparkles,
        }
    }
}
