//! Portal Overlay - keyboard-driven avatar over an animated backdrop
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, sprite animation, hotspots, effects)
//! - `runtime`: Frame orchestrator sequencing the simulation against a clock
//! - `renderer`: WebGPU rendering of the scene description
//! - `platform`: Clock and layout abstractions (browser/native)
//! - `atlas`: Walk-cycle sprite atlas built from one source image
//! - `ui`: Modal/lightbox overlay state and static content
//! - `audio`: Fire-and-forget tones behind a user-gesture unlock
//! - `tuning`: Data-driven motion/animation/effect constants

pub mod atlas;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use atlas::{AtlasError, SpriteAtlas};
pub use runtime::{FrameReport, Runtime};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Fixed configuration constants
pub mod consts {
    /// Layout key of the avatar element
    pub const AVATAR_ELEMENT: &str = "avatar";

    /// Number of frames in the generated walk cycle
    pub const WALK_FRAME_COUNT: u32 = 4;
    /// Per-frame pixel offsets (dx, dy) approximating a walk: stagger and bounce
    pub const WALK_FRAME_OFFSETS: [(i32, i32); WALK_FRAME_COUNT as usize] =
        [(0, 0), (-2, -3), (0, 0), (2, -3)];
    /// Target frame height the source image is scaled to
    pub const ATLAS_TARGET_FRAME_HEIGHT: u32 = 96;
    /// Atlas frames never shrink below these dimensions
    pub const ATLAS_MIN_FRAME_WIDTH: u32 = 16;
    pub const ATLAS_MIN_FRAME_HEIGHT: u32 = 16;

    /// Fallback delta for the very first frame (no previous timestamp)
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
}
