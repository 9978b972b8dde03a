//! Visitor preferences
//!
//! Session-only: nothing here is written to storage.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Background stars generated for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 300,
            QualityPreset::Medium => 1200,
            QualityPreset::High => 4000,
        }
    }

    /// Whether the sparkle layer is drawn
    pub fn sparkles_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Drift multiplier applied to the backdrop under reduced motion
const REDUCED_DRIFT_RATE: f32 = 0.25;

/// Visitor preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Shooting stars across the backdrop
    pub shooting_stars: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shooting stars, slower drift)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            shooting_stars: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective shooting stars (respects reduced_motion)
    pub fn effective_shooting_stars(&self) -> bool {
        self.shooting_stars && !self.reduced_motion
    }

    /// Backdrop drift speed multiplier
    pub fn drift_rate(&self) -> f32 {
        if self.reduced_motion {
            REDUCED_DRIFT_RATE
        } else {
            1.0
        }
    }

    /// Gain applied to every tone, zero when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Read preferences from the page's media queries
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let reduced_motion = web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false);
        if reduced_motion {
            log::info!("Reduced motion requested by the browser");
        }
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    /// Native default
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_stars() {
        let mut settings = Settings::default();
        assert!(settings.effective_shooting_stars());
        assert_eq!(settings.drift_rate(), 1.0);

        settings.reduced_motion = true;
        assert!(!settings.effective_shooting_stars());
        assert!(settings.drift_rate() < 1.0);
    }

    #[test]
    fn test_mute_zeroes_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_preset_scales_backdrop() {
        let low = QualityPreset::Low;
        assert!(low.star_count() < QualityPreset::Medium.star_count());
        assert!(QualityPreset::Medium.star_count() < QualityPreset::High.star_count());
        assert!(!low.sparkles_enabled());
        assert!(QualityPreset::High.sparkles_enabled());
    }
}
