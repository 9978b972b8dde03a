//! Deterministic simulation module
//!
//! All avatar, effect and backdrop logic lives here. This module must stay
//! pure and deterministic:
//! - Time only arrives as an explicit `dt`
//! - Seeded RNG only
//! - Geometry only through `LayoutProvider`
//! - No rendering or platform dependencies

pub mod animation;
pub mod backdrop;
pub mod collision;
pub mod effects;
pub mod input;
pub mod motion;
pub mod state;
pub mod tick;

pub use animation::{AnimationStep, SpriteAnimation};
pub use backdrop::{Backdrop, Portal, generate_stars};
pub use collision::{CollisionOutcome, Hotspot, HotspotTracker, LayoutProvider, Rect};
pub use effects::{EffectId, EffectManager, EffectTick, ShootingStar};
pub use input::{InputState, Key};
pub use motion::{AvatarMotion, Facing, Track};
pub use state::{RngState, SimState};
pub use tick::{TickEnv, TickEvents, tick};
