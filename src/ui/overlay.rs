//! Modal / lightbox state machine
//!
//! The lightbox always sits above the modal, so Escape closes it first.
//! Requests for content that does not exist leave the state untouched.

use super::content::ContentCatalog;
use crate::sim::Hotspot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Idle,
    ModalOpen,
    /// Lightbox on top (a modal may still be open beneath it)
    LightboxOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightboxView {
    pub capture: String,
    pub src: String,
    pub caption: String,
}

/// UI requests written by event handlers, consumed once per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    /// Activation key: open the modal of the hotspot the avatar stands in
    Activate,
    Escape,
    /// Pointer activation of a hotspot trigger
    OpenModal(String),
    /// Capture control
    OpenLightbox(String),
    /// Close control or backdrop click on the modal
    CloseModal,
    /// Close control or backdrop click on the lightbox
    CloseLightbox,
}

/// A visible change the host must mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayChange {
    ModalOpened(String),
    ModalClosed(String),
    LightboxOpened(String),
    LightboxClosed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    modal: Option<ModalView>,
    lightbox: Option<LightboxView>,
}

impl OverlayState {
    pub fn phase(&self) -> OverlayPhase {
        if self.lightbox.is_some() {
            OverlayPhase::LightboxOpen
        } else if self.modal.is_some() {
            OverlayPhase::ModalOpen
        } else {
            OverlayPhase::Idle
        }
    }

    pub fn modal(&self) -> Option<&ModalView> {
        self.modal.as_ref()
    }

    pub fn lightbox(&self) -> Option<&LightboxView> {
        self.lightbox.as_ref()
    }

    pub fn open_modal(&mut self, id: &str, catalog: &ContentCatalog) -> Option<OverlayChange> {
        let Some(content) = catalog.modal(id) else {
            log::debug!("No modal content for '{}'", id);
            return None;
        };
        self.modal = Some(ModalView {
            id: id.to_owned(),
            title: content.title.clone(),
            body: content.body.clone(),
        });
        log::debug!("Modal '{}' opened", id);
        Some(OverlayChange::ModalOpened(id.to_owned()))
    }

    pub fn open_lightbox(
        &mut self,
        capture: &str,
        catalog: &ContentCatalog,
    ) -> Option<OverlayChange> {
        let Some(content) = catalog.capture(capture) else {
            log::debug!("No capture '{}'", capture);
            return None;
        };
        self.lightbox = Some(LightboxView {
            capture: capture.to_owned(),
            src: content.src.clone(),
            caption: content.caption.clone(),
        });
        log::debug!("Lightbox '{}' opened", capture);
        Some(OverlayChange::LightboxOpened(capture.to_owned()))
    }

    pub fn close_modal(&mut self) -> Option<OverlayChange> {
        self.modal
            .take()
            .map(|m| OverlayChange::ModalClosed(m.id))
    }

    pub fn close_lightbox(&mut self) -> Option<OverlayChange> {
        self.lightbox
            .take()
            .map(|l| OverlayChange::LightboxClosed(l.capture))
    }

    /// Close the topmost overlay
    pub fn escape(&mut self) -> Option<OverlayChange> {
        self.close_lightbox().or_else(|| self.close_modal())
    }

    /// Apply one intent. `current` is the hotspot the avatar stands in this tick.
    pub fn apply(
        &mut self,
        intent: &UiIntent,
        current: Option<&Hotspot>,
        catalog: &ContentCatalog,
    ) -> Option<OverlayChange> {
        match intent {
            UiIntent::Activate => {
                if self.phase() != OverlayPhase::Idle {
                    return None;
                }
                let hotspot = current?;
                self.open_modal(&hotspot.id, catalog)
            }
            UiIntent::Escape => self.escape(),
            UiIntent::OpenModal(id) => self.open_modal(id, catalog),
            UiIntent::OpenLightbox(capture) => self.open_lightbox(capture, catalog),
            UiIntent::CloseModal => self.close_modal(),
            UiIntent::CloseLightbox => self.close_lightbox(),
        }
    }
}
