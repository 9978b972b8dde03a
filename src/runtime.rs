//! Frame orchestrator
//!
//! One `frame` call per animation frame. Event handlers only write
//! `FrameInput`; everything else is owned here and advanced in a fixed order:
//! clock, simulation tick, audio and highlight side effects, UI intents,
//! render.

use crate::atlas::SpriteAtlas;
use crate::audio::{AudioSink, Sound, Unlockable};
use crate::platform::Clock;
use crate::renderer::{SceneFrame, SceneRenderer, Viewport};
use crate::settings::Settings;
use crate::sim::{InputState, Key, LayoutProvider, SimState, TickEnv, TickEvents, tick};
use crate::tuning::Tuning;
use crate::ui::{ContentCatalog, OverlayChange, OverlayState, UiIntent};

/// Everything browser handlers may write between frames
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub keys: InputState,
    /// One-shot UI requests, cleared after each tick
    pub intents: Vec<UiIntent>,
}

impl FrameInput {
    /// Returns whether the key name is one the runtime handles
    pub fn key_down(&mut self, name: &str) -> bool {
        match name {
            "Escape" => self.intents.push(UiIntent::Escape),
            "Enter" | " " => self.intents.push(UiIntent::Activate),
            _ => match Key::from_name(name) {
                Some(key) => self.keys.press(key),
                None => return false,
            },
        }
        true
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.keys.release(key);
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, intent: UiIntent) {
        self.intents.push(intent);
    }
}

/// What one frame did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// False when the frame was skipped (page hidden)
    pub ran: bool,
    /// Delta actually simulated
    pub dt: f32,
    pub tick: TickEvents,
    /// Id of the hotspot entered this tick
    pub entered: Option<String>,
    pub exited: Option<String>,
    pub highlight_changed: bool,
    pub overlay: Vec<OverlayChange>,
    /// Tones requested this tick (played only once audio is unlocked)
    pub sounds: Vec<Sound>,
}

/// Owner of all overlay state
pub struct Runtime<C: Clock, A: AudioSink> {
    clock: C,
    audio: Unlockable<A>,
    state: SimState,
    tuning: Tuning,
    settings: Settings,
    catalog: ContentCatalog,
    atlas: Option<SpriteAtlas>,
    overlay: OverlayState,
    input: FrameInput,
    viewport: Viewport,
    highlighted: Option<String>,
}

impl<C: Clock, A: AudioSink> Runtime<C, A> {
    pub fn new(
        seed: u64,
        viewport: Viewport,
        tuning: Tuning,
        settings: Settings,
        catalog: ContentCatalog,
        clock: C,
        audio: A,
    ) -> Self {
        log::info!(
            "Runtime starting: seed {}, viewport {}x{}, {} hotspots",
            seed,
            viewport.width,
            viewport.height,
            catalog.hotspots().len()
        );
        Self {
            clock,
            audio: Unlockable::new(audio),
            state: SimState::new(seed, viewport.width as f32, viewport.height as f32, &tuning),
            tuning,
            settings,
            catalog,
            atlas: None,
            overlay: OverlayState::default(),
            input: FrameInput::default(),
            viewport,
            highlighted: None,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn input_mut(&mut self) -> &mut FrameInput {
        &mut self.input
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn atlas(&self) -> Option<&SpriteAtlas> {
        self.atlas.as_ref()
    }

    /// Card currently highlighted by the hotspot the avatar stands in
    pub fn highlighted_card(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Skin the avatar once the atlas is ready
    pub fn set_atlas(&mut self, atlas: SpriteAtlas) {
        self.atlas = Some(atlas);
    }

    /// Must run inside a user-gesture handler on the web
    pub fn unlock_audio(&mut self) {
        self.audio.unlock();
    }

    /// Page visibility changed. Hidden pages accrue no time and drop held keys.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            if self.clock.is_paused() {
                log::info!("Page visible; resuming");
                self.clock.resume();
            }
        } else if !self.clock.is_paused() {
            log::info!("Page hidden; pausing");
            self.clock.pause();
            self.focus_lost();
        }
    }

    /// Window blur or hidden page: key-up events for held keys never arrive
    pub fn focus_lost(&mut self) {
        log::debug!("Focus lost; releasing held keys");
        self.input.keys.release_all();
    }

    pub fn resize<R: SceneRenderer + ?Sized>(&mut self, viewport: Viewport, renderer: &mut R) {
        log::info!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.state
            .resize(viewport.width as f32, viewport.height as f32, &self.tuning);
        renderer.resize(viewport);
    }

    /// Run one frame
    pub fn frame<L, R>(&mut self, layout: &L, renderer: &mut R) -> FrameReport
    where
        L: LayoutProvider + ?Sized,
        R: SceneRenderer + ?Sized,
    {
        if self.clock.is_paused() {
            return FrameReport::default();
        }

        let dt = self.clock.delta().min(self.tuning.frame.max_delta);
        let keys = self.input.keys;

        let env = TickEnv {
            tuning: &self.tuning,
            atlas: self.atlas.as_ref(),
            hotspots: self.catalog.hotspots(),
            layout,
            spawn_effects: self.settings.effective_shooting_stars(),
            drift_rate: self.settings.drift_rate(),
        };
        let events = tick(&mut self.state, &keys, &env, dt);

        let hotspot_id = |i: Option<usize>| {
            i.and_then(|i| self.catalog.hotspot(i))
                .map(|h| h.id.clone())
        };
        let entered = hotspot_id(events.collision.entered);
        let exited = hotspot_id(events.collision.exited);
        if let Some(id) = &exited {
            log::debug!("Left hotspot '{}'", id);
        }
        if let Some(id) = &entered {
            log::debug!("Entered hotspot '{}'", id);
        }

        let mut sounds = Vec::new();
        if events.animation.footstep {
            sounds.push(Sound::Footstep);
        }
        if entered.is_some() {
            sounds.push(Sound::HotspotPing);
        }
        let volume = self.settings.effective_volume();
        for sound in &sounds {
            self.audio.play(*sound, volume);
        }

        let highlighted = self
            .state
            .hotspots
            .highlighted_card(self.catalog.hotspots())
            .map(str::to_owned);
        let highlight_changed = highlighted != self.highlighted;
        self.highlighted = highlighted;

        let current = self
            .state
            .hotspots
            .current()
            .and_then(|i| self.catalog.hotspot(i));
        let overlay = std::mem::take(&mut self.input.intents)
            .iter()
            .filter_map(|intent| self.overlay.apply(intent, current, &self.catalog))
            .collect();

        let scene = SceneFrame::capture(&self.state, self.viewport, self.highlighted.as_deref());
        if let Err(e) = renderer.render(&scene) {
            log::warn!("Render failed: {}", e);
        }

        FrameReport {
            ran: true,
            dt,
            tick: events,
            entered,
            exited,
            highlight_changed,
            overlay,
            sounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use crate::platform::{FixedLayout, ManualClock};
    use crate::renderer::RenderError;
    use crate::sim::Rect;

    struct FailingRenderer {
        calls: u32,
    }

    impl SceneRenderer for FailingRenderer {
        fn render(&mut self, _frame: &SceneFrame) -> Result<(), RenderError> {
            self.calls += 1;
            Err(RenderError::Timeout)
        }

        fn resize(&mut self, _viewport: Viewport) {}
    }

    fn catalog() -> ContentCatalog {
        ContentCatalog::from_json(
            r#"{
                "hotspots": [{"id": "about", "card": "card-about"}],
                "modals": {"about": {"title": "About", "body": "Hi"}}
            }"#,
        )
        .unwrap()
    }

    fn runtime() -> Runtime<ManualClock, NullSink> {
        Runtime::new(
            7,
            Viewport::new(1000, 600, 1.0),
            Tuning::default(),
            Settings::default(),
            catalog(),
            ManualClock::new(),
            NullSink,
        )
    }

    /// Hotspot box around the avatar's starting spot
    fn layout_at_start() -> FixedLayout {
        FixedLayout::new().with("about", Rect::from_xywh(480.0, 400.0, 40.0, 200.0))
    }

    #[test]
    fn test_key_routing() {
        let mut input = FrameInput::default();
        assert!(input.key_down("ArrowLeft"));
        assert!(input.keys.is_held(Key::Left));
        assert!(input.key_down("Escape"));
        assert!(input.key_down("Enter"));
        assert!(!input.key_down("q"));
        assert_eq!(input.intents, vec![UiIntent::Escape, UiIntent::Activate]);
        assert!(input.key_up("ArrowLeft"));
        assert!(!input.keys.is_held(Key::Left));
    }

    #[test]
    fn test_activate_targets_this_ticks_hotspot() {
        let mut rt = runtime();
        let mut renderer = FailingRenderer { calls: 0 };
        rt.input_mut().key_down("Enter");
        rt.clock_mut().advance(1.0 / 60.0);

        let report = rt.frame(&layout_at_start(), &mut renderer);
        assert_eq!(report.entered.as_deref(), Some("about"));
        assert!(report.highlight_changed);
        assert_eq!(rt.highlighted_card(), Some("card-about"));
        assert_eq!(report.overlay, vec![OverlayChange::ModalOpened("about".into())]);
        assert_eq!(report.sounds, vec![Sound::HotspotPing]);
        // Intents are one-shot
        assert!(rt.input_mut().intents.is_empty());
    }

    #[test]
    fn test_render_failure_does_not_stop_loop() {
        let mut rt = runtime();
        let mut renderer = FailingRenderer { calls: 0 };
        for _ in 0..3 {
            rt.clock_mut().advance(0.016);
            assert!(rt.frame(&FixedLayout::new(), &mut renderer).ran);
        }
        assert_eq!(renderer.calls, 3);
        assert_eq!(rt.state().time_ticks, 3);
    }

    #[test]
    fn test_delta_clamped() {
        let mut rt = runtime();
        let mut renderer = FailingRenderer { calls: 0 };
        rt.clock_mut().advance(5.0);
        let report = rt.frame(&FixedLayout::new(), &mut renderer);
        assert_eq!(report.dt, Tuning::default().frame.max_delta);
    }

    #[test]
    fn test_hidden_skips_and_drops_keys() {
        let mut rt = runtime();
        let mut renderer = FailingRenderer { calls: 0 };
        rt.input_mut().key_down("d");
        rt.set_visible(false);
        assert!(!rt.input_mut().keys.is_held(Key::D));

        rt.clock_mut().advance(30.0);
        let report = rt.frame(&FixedLayout::new(), &mut renderer);
        assert!(!report.ran);
        assert_eq!(renderer.calls, 0);
        assert_eq!(rt.state().time_ticks, 0);
    }

    #[test]
    fn test_exit_clears_highlight() {
        let mut rt = runtime();
        let mut renderer = FailingRenderer { calls: 0 };
        let mut layout = layout_at_start();
        rt.clock_mut().advance(0.016);
        rt.frame(&layout, &mut renderer);

        layout.remove("about");
        rt.clock_mut().advance(0.016);
        let report = rt.frame(&layout, &mut renderer);
        assert_eq!(report.exited.as_deref(), Some("about"));
        assert!(report.highlight_changed);
        assert_eq!(rt.highlighted_card(), None);
    }

    #[test]
    fn test_resize_reaches_state_and_renderer() {
        let mut rt = runtime();
        let mut renderer = crate::renderer::HeadlessRenderer::default();
        let vp = Viewport::new(400, 300, 2.0);
        rt.resize(vp, &mut renderer);
        assert_eq!(renderer.viewport, Some(vp));
        assert_eq!(rt.state().track.width, 400.0);
        assert!(rt.state().motion.pos.x <= 400.0 - Tuning::default().motion.track_padding);
    }
}
