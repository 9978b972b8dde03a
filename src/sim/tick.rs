//! One simulation step
//!
//! Sequences drift, effects, motion, animation and collision for a single
//! variable-length tick. The order matters: collision runs after motion, and
//! animation reads the finalized motion. When the layout reports an avatar
//! box, collision uses it as laid out (the host places the element from the
//! previous frame's pose).

use super::animation::AnimationStep;
use super::collision::{CollisionOutcome, Hotspot, LayoutProvider, Rect};
use super::effects::EffectTick;
use super::input::InputState;
use super::state::SimState;
use crate::atlas::SpriteAtlas;
use crate::consts::AVATAR_ELEMENT;
use crate::tuning::Tuning;

/// Read-only collaborators and switches for a tick
pub struct TickEnv<'a, L: LayoutProvider + ?Sized> {
    pub tuning: &'a Tuning,
    pub atlas: Option<&'a SpriteAtlas>,
    pub hotspots: &'a [Hotspot],
    pub layout: &'a L,
    /// Whether new shooting stars may spawn
    pub spawn_effects: bool,
    /// Backdrop drift speed multiplier
    pub drift_rate: f32,
}

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    pub collision: CollisionOutcome,
    pub animation: AnimationStep,
    pub effects: EffectTick,
}

/// Advance the simulation by `dt` seconds
pub fn tick<L: LayoutProvider + ?Sized>(
    state: &mut SimState,
    input: &InputState,
    env: &TickEnv<'_, L>,
    dt: f32,
) -> TickEvents {
    let dt = dt.max(0.0);
    let tuning = env.tuning;

    state.backdrop.advance(&tuning.backdrop, dt, env.drift_rate);

    state.effects.set_spawning(env.spawn_effects);
    let effects = state.effects.tick(&tuning.effects, dt);

    state.motion.update(input, &state.track, &tuning.motion, dt);

    let animation = state
        .animation
        .advance(&state.motion, env.atlas, &tuning.animation, dt);

    // The laid-out avatar element is authoritative; an unskinned or unplaced
    // avatar falls back to the tuned box around its rail position.
    let avatar = env
        .layout
        .rect(AVATAR_ELEMENT)
        .filter(Rect::is_valid)
        .unwrap_or_else(|| {
            state
                .motion
                .bounds(tuning.collision.avatar_width, tuning.collision.avatar_height)
        });
    let collision = state
        .hotspots
        .check(avatar, env.hotspots, env.layout, tuning.collision.padding);

    state.elapsed += dt as f64;
    state.time_ticks += 1;

    TickEvents {
        collision,
        animation,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedLayout;
    use crate::sim::input::Key;

    struct OneBox(Rect);

    impl LayoutProvider for OneBox {
        fn rect(&self, element: &str) -> Option<Rect> {
            (element == "door").then_some(self.0)
        }
    }

    fn env<'a>(
        tuning: &'a Tuning,
        hotspots: &'a [Hotspot],
        layout: &'a OneBox,
    ) -> TickEnv<'a, OneBox> {
        TickEnv {
            tuning,
            atlas: None,
            hotspots,
            layout,
            spawn_effects: true,
            drift_rate: 1.0,
        }
    }

    #[test]
    fn test_collision_sees_this_ticks_position() {
        let tuning = Tuning::default();
        let mut state = SimState::new(3, 1000.0, 600.0, &tuning);
        let hotspots = vec![Hotspot::new("door")];

        // Hotspot begins a hair past the avatar's padded right edge
        let right_edge = state.motion.pos.x
            + tuning.collision.avatar_width / 2.0
            + tuning.collision.padding;
        let layout = OneBox(Rect::from_xywh(right_edge + 0.5, 0.0, 50.0, 600.0));
        let env = env(&tuning, &hotspots, &layout);

        state.motion.vel.x = 300.0;
        let events = tick(&mut state, &InputState::default(), &env, 1.0 / 60.0);
        assert_eq!(events.collision.entered, Some(0));
    }

    #[test]
    fn test_time_accounting() {
        let tuning = Tuning::default();
        let mut state = SimState::new(3, 1000.0, 600.0, &tuning);
        let hotspots: Vec<Hotspot> = Vec::new();
        let layout = OneBox(Rect::new(0.0, 0.0, 0.0, 0.0));
        let env = env(&tuning, &hotspots, &layout);

        let mut input = InputState::default();
        input.press(Key::Right);
        for _ in 0..30 {
            tick(&mut state, &input, &env, 0.05);
        }
        assert_eq!(state.time_ticks, 30);
        assert!((state.elapsed - 1.5).abs() < 1e-6);
        assert!(state.animation.walking);
    }

    #[test]
    fn test_spawning_switch_respected() {
        let tuning = Tuning::default();
        let mut state = SimState::new(3, 1000.0, 600.0, &tuning);
        let hotspots: Vec<Hotspot> = Vec::new();
        let layout = OneBox(Rect::new(0.0, 0.0, 0.0, 0.0));
        let env = TickEnv {
            spawn_effects: false,
            ..env(&tuning, &hotspots, &layout)
        };
        for _ in 0..200 {
            let events = tick(&mut state, &InputState::default(), &env, 0.1);
            assert_eq!(events.effects.spawned, None);
        }
    }

    #[test]
    fn test_laid_out_avatar_box_drives_collision() {
        let tuning = Tuning::default();
        let mut state = SimState::new(3, 1000.0, 600.0, &tuning);
        let hotspots = vec![Hotspot::new("door")];
        let x = state.motion.pos.x;
        let baseline = state.track.baseline;

        // Wide sprite: the door sits beyond the tuned box but under the sprite
        let door = Rect::from_xywh(x + 60.0, baseline - 96.0, 40.0, 96.0);
        let sprite = Rect::from_xywh(x - 96.0, baseline - 96.0, 192.0, 96.0);
        assert!(!state.motion.bounds(64.0, 96.0).inflate(12.0).overlaps(&door));

        let layout = FixedLayout::new()
            .with("door", door)
            .with(AVATAR_ELEMENT, sprite);
        let events = tick(
            &mut state,
            &InputState::default(),
            &TickEnv {
                tuning: &tuning,
                atlas: None,
                hotspots: &hotspots,
                layout: &layout,
                spawn_effects: false,
                drift_rate: 1.0,
            },
            1.0 / 60.0,
        );
        assert_eq!(events.collision.entered, Some(0));
    }

    #[test]
    fn test_empty_avatar_box_falls_back_to_tuned_size() {
        let tuning = Tuning::default();
        let mut state = SimState::new(3, 1000.0, 600.0, &tuning);
        let hotspots = vec![Hotspot::new("door")];
        let x = state.motion.pos.x;
        let baseline = state.track.baseline;

        // A hidden avatar element lays out as a zero box
        let layout = FixedLayout::new()
            .with("door", Rect::from_xywh(x - 10.0, baseline - 50.0, 20.0, 50.0))
            .with(AVATAR_ELEMENT, Rect::from_xywh(0.0, 0.0, 0.0, 0.0));
        let env = TickEnv {
            tuning: &tuning,
            atlas: None,
            hotspots: &hotspots,
            layout: &layout,
            spawn_effects: false,
            drift_rate: 1.0,
        };
        let events = tick(&mut state, &InputState::default(), &env, 1.0 / 60.0);
        assert_eq!(events.collision.entered, Some(0));
    }
}
