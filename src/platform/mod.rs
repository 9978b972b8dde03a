//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (frame clock with pause/resume)
//! - Element geometry (layout providers)
//! - Visibility detection and DOM side effects (web only)

pub mod clock;
pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use clock::{Clock, FrameClock, ManualClock};
pub use layout::FixedLayout;
