//! Web Audio tone generator
//!
//! Procedurally generated tones - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, Sound};

/// Oscillator-based sink bound to one `AudioContext`
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Alternates footstep pitch so consecutive steps do not sound identical
    step_parity: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            step_parity: false,
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Footstep - short muffled tick
    fn play_footstep(&mut self, ctx: &AudioContext, vol: f32) {
        self.step_parity = !self.step_parity;
        let freq = if self.step_parity { 180.0 } else { 150.0 };
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.06)
            .ok();
        osc.frequency().set_value_at_time(freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(freq * 0.5, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Hotspot ping - two rising sine notes
    fn play_ping(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.22).ok();
            }
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, sound: Sound, volume: f32) {
        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match sound {
            Sound::Footstep => self.play_footstep(&ctx, volume),
            Sound::HotspotPing => self.play_ping(&ctx, volume),
        }
    }

    /// Resume audio context (required after user gesture)
    fn resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }
}
