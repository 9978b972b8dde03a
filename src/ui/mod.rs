//! Overlay UI state and static content

pub mod content;
pub mod overlay;

pub use content::{CaptureContent, ContentCatalog, ContentError, ModalContent};
pub use overlay::{LightboxView, ModalView, OverlayChange, OverlayPhase, OverlayState, UiIntent};
