//! Static keyed content: hotspots, modal text, lightbox captures

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::sim::Hotspot;

/// Content bundled with the binary
const EMBEDDED_CONTENT: &str = include_str!("../../assets/content.json");

/// Why a content document was rejected
#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("Malformed content document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Hotspot '{0}' is defined more than once")]
    DuplicateHotspot(String),
}

/// Text shown in a hotspot's modal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalContent {
    pub title: String,
    pub body: String,
}

/// Image shown in the lightbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureContent {
    pub src: String,
    #[serde(default)]
    pub caption: String,
}

/// All static content, looked up by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentCatalog {
    /// Hotspots in collision order
    pub hotspots: Vec<Hotspot>,
    pub modals: HashMap<String, ModalContent>,
    pub captures: HashMap<String, CaptureContent>,
}

impl ContentCatalog {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let catalog: Self = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for hotspot in &catalog.hotspots {
            if !seen.insert(hotspot.id.as_str()) {
                return Err(ContentError::DuplicateHotspot(hotspot.id.clone()));
            }
        }

        log::info!(
            "Content loaded: {} hotspots, {} modals, {} captures",
            catalog.hotspots.len(),
            catalog.modals.len(),
            catalog.captures.len()
        );
        Ok(catalog)
    }

    /// The catalog shipped in `assets/content.json`
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_json(EMBEDDED_CONTENT)
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn hotspot(&self, index: usize) -> Option<&Hotspot> {
        self.hotspots.get(index)
    }

    pub fn modal(&self, id: &str) -> Option<&ModalContent> {
        self.modals.get(id)
    }

    pub fn capture(&self, id: &str) -> Option<&CaptureContent> {
        self.captures.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_is_consistent() {
        let catalog = ContentCatalog::embedded().unwrap();
        assert!(!catalog.hotspots().is_empty());
        for hotspot in catalog.hotspots() {
            assert!(
                catalog.modal(&hotspot.id).is_some(),
                "hotspot {} has no modal",
                hotspot.id
            );
        }
    }

    #[test]
    fn test_missing_content_is_none() {
        let catalog = ContentCatalog::from_json(r#"{"hotspots": [{"id": "about"}]}"#).unwrap();
        assert_eq!(catalog.hotspots()[0].element(), "about");
        assert!(catalog.modal("about").is_none());
        assert!(catalog.capture("nope").is_none());
    }

    #[test]
    fn test_duplicate_hotspot_rejected() {
        let err = ContentCatalog::from_json(r#"{"hotspots": [{"id": "a"}, {"id": "a"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateHotspot(id) if id == "a"));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(
            ContentCatalog::from_json("{ nope"),
            Err(ContentError::Parse(_))
        ));
    }
}
