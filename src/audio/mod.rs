//! Fire-and-forget feedback tones
//!
//! Browsers refuse to start audio before a user gesture, so every sink sits
//! behind an `Unlockable` gate. Tones requested while locked are dropped, not
//! queued.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Tones the overlay can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Soft tick while the avatar walks
    Footstep,
    /// Rising chime when a hotspot is entered
    HotspotPing,
}

/// Something that can play a tone right now
pub trait AudioSink {
    /// Start `sound` at `volume` (0.0 - 1.0) and return immediately
    fn play(&mut self, sound: Sound, volume: f32);

    /// Called once when the user gesture unlock happens
    fn resume(&mut self) {}
}

/// Sink that discards every tone (native builds, audio unavailable)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: Sound, _volume: f32) {}
}

/// Gate that drops tones until the first user gesture
#[derive(Debug, Default)]
pub struct Unlockable<S> {
    sink: S,
    unlocked: bool,
    dropped: u32,
}

impl<S: AudioSink> Unlockable<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            unlocked: false,
            dropped: 0,
        }
    }

    /// Open the gate; later calls are no-ops
    pub fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;
        self.sink.resume();
        log::info!("Audio unlocked ({} tones dropped while locked)", self.dropped);
    }

    pub fn play(&mut self, sound: Sound, volume: f32) {
        if !self.unlocked {
            self.dropped = self.dropped.saturating_add(1);
            return;
        }
        if volume <= 0.0 {
            return;
        }
        self.sink.play(sound, volume.min(1.0));
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(Sound, f32)>,
        resumed: u32,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, sound: Sound, volume: f32) {
            self.played.push((sound, volume));
        }

        fn resume(&mut self) {
            self.resumed += 1;
        }
    }

    #[test]
    fn test_locked_gate_drops_tones() {
        let mut audio = Unlockable::new(Recorder::default());
        audio.play(Sound::Footstep, 1.0);
        audio.play(Sound::HotspotPing, 1.0);
        assert!(audio.sink().played.is_empty());
        assert_eq!(audio.dropped, 2);

        audio.unlock();
        audio.unlock();
        assert_eq!(audio.sink().resumed, 1);

        audio.play(Sound::HotspotPing, 0.5);
        assert_eq!(audio.sink().played, vec![(Sound::HotspotPing, 0.5)]);
    }

    #[test]
    fn test_silent_volume_skipped() {
        let mut audio = Unlockable::new(Recorder::default());
        audio.unlock();
        audio.play(Sound::Footstep, 0.0);
        audio.play(Sound::Footstep, 3.0);
        assert_eq!(audio.sink().played, vec![(Sound::Footstep, 1.0)]);
    }
}
