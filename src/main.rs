//! Portal Overlay entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, Response};

    use portal_overlay::atlas::SpriteAtlas;
    use portal_overlay::audio::AudioManager;
    use portal_overlay::consts::AVATAR_ELEMENT;
    use portal_overlay::platform::FrameClock;
    use portal_overlay::platform::dom::{self, DomLayout};
    use portal_overlay::renderer::{
        AvatarPose, HeadlessRenderer, RenderState, SceneRenderer, StarLayers, Viewport,
    };
    use portal_overlay::sim::Key;
    use portal_overlay::ui::{ContentCatalog, UiIntent};
    use portal_overlay::{Runtime, Settings, Tuning};

    /// Sprite sheet the avatar atlas is cut from
    const AVATAR_SRC: &str = "assets/avatar.png";

    struct App {
        runtime: Runtime<FrameClock, AudioManager>,
        /// Geometry-only stand-in until the GPU is ready (or when it never is)
        renderer: Box<dyn SceneRenderer>,
        layout: DomLayout,
        document: Document,
        canvas: HtmlCanvasElement,
        /// Card carrying the highlight class on the page
        highlighted: Option<String>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.runtime.clock_mut().observe(time);
            let report = self.runtime.frame(&self.layout, self.renderer.as_mut());
            if !report.ran {
                return;
            }

            let collision = &self.runtime.tuning().collision;
            dom::apply_avatar(
                &self.document,
                AVATAR_ELEMENT,
                &AvatarPose::from_state(self.runtime.state()),
                self.runtime.atlas(),
                (collision.avatar_width, collision.avatar_height),
                report.tick.animation.frame_changed,
            );

            let hotspots = self.runtime.catalog().hotspots();
            for (id, active) in [(&report.exited, false), (&report.entered, true)] {
                if let Some(hotspot) = id
                    .as_deref()
                    .and_then(|id| hotspots.iter().find(|h| h.id == id))
                {
                    dom::set_active(&self.document, hotspot.element(), active);
                }
            }

            if report.highlight_changed {
                let next = self.runtime.highlighted_card();
                dom::set_highlight(&self.document, self.highlighted.as_deref(), next);
                self.highlighted = next.map(str::to_owned);
            }

            if !report.overlay.is_empty() {
                dom::sync_overlay(&self.document, self.runtime.overlay());
            }
        }

        /// Match the canvas backing store to the window
        fn resize(&mut self) {
            let viewport = viewport_of(&self.canvas);
            let (w, h) = viewport.physical_size();
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.runtime.resize(viewport, self.renderer.as_mut());
        }
    }

    fn viewport_of(canvas: &HtmlCanvasElement) -> Viewport {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        Viewport::new(
            canvas.client_width().max(0) as u32,
            canvas.client_height().max(0) as u32,
            dpr as f32,
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Portal Overlay starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let viewport = viewport_of(&canvas);
        let (width, height) = viewport.physical_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let catalog = ContentCatalog::embedded().unwrap_or_else(|e| {
            log::warn!("Content catalog invalid, running without hotspots: {}", e);
            ContentCatalog::default()
        });
        let settings = Settings::detect();
        let quality = settings.quality;

        let seed = js_sys::Date::now() as u64;
        let runtime = Runtime::new(
            seed,
            viewport,
            Tuning::default(),
            settings,
            catalog,
            FrameClock::new(),
            AudioManager::new(),
        );
        let layers = StarLayers::generate(runtime.state().rng_state.star_seed(), quality);

        let app = Rc::new(RefCell::new(App {
            runtime,
            renderer: Box::new(HeadlessRenderer::new(layers.clone())),
            layout: DomLayout::new(document.clone()),
            document: document.clone(),
            canvas: canvas.clone(),
            highlighted: None,
        }));

        // Initialize WebGPU; the overlay keeps working without it
        match init_renderer(canvas, viewport, layers).await {
            Ok(render_state) => app.borrow_mut().renderer = Box::new(render_state),
            Err(e) => log::warn!("Backdrop disabled: {}", e),
        }

        wasm_bindgen_futures::spawn_local(load_atlas(app.clone()));

        setup_input_handlers(app.clone());
        setup_overlay_controls(app.clone());
        setup_visibility(app.clone());

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(app);

        log::info!("Portal Overlay running!");
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        viewport: Viewport,
        layers: StarLayers,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, viewport, layers)
            .await
            .map_err(|e| e.to_string())
    }

    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let buffer = JsFuture::from(response.array_buffer()?).await?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    /// Fetch the sprite sheet, cut the walk strip and skin the avatar
    async fn load_atlas(app: Rc<RefCell<App>>) {
        let bytes = match fetch_bytes(AVATAR_SRC).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Avatar sprite fetch failed: {:?}", e);
                return;
            }
        };
        match SpriteAtlas::build(&bytes) {
            Ok(atlas) => {
                let mut a = app.borrow_mut();
                if let Err(e) = dom::install_atlas(&a.document, AVATAR_ELEMENT, &atlas) {
                    log::warn!("Avatar skin not applied: {:?}", e);
                }
                a.runtime.set_atlas(atlas);
            }
            Err(e) => log::warn!("Avatar sprite unusable: {}", e),
        }
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Held movement keys repeat; one-shot keys must not
                if event.repeat() && Key::from_name(&key).is_none() {
                    return;
                }
                let mut a = app.borrow_mut();
                a.runtime.unlock_audio();
                if a.runtime.input_mut().key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().runtime.input_mut().key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Any pointer gesture may unlock audio
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                app.borrow_mut().runtime.unlock_audio();
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Map a click target to the overlay request it stands for
    fn click_intent(target: &Element) -> Option<UiIntent> {
        let attr = |selector: &str, name: &str| {
            target
                .closest(selector)
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute(name))
        };
        if let Some(capture) = attr("[data-capture]", "data-capture") {
            return Some(UiIntent::OpenLightbox(capture));
        }
        if let Some(id) = attr("[data-hotspot]", "data-hotspot") {
            return Some(UiIntent::OpenModal(id));
        }
        match attr("[data-close]", "data-close").as_deref() {
            Some("modal") => return Some(UiIntent::CloseModal),
            Some("lightbox") => return Some(UiIntent::CloseLightbox),
            _ => {}
        }
        // Backdrop clicks land on the overlay container itself
        match target.id().as_str() {
            "modal" => Some(UiIntent::CloseModal),
            "lightbox" => Some(UiIntent::CloseLightbox),
            _ => None,
        }
    }

    fn setup_overlay_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Some(intent) = click_intent(&target) {
                event.prevent_default();
                app.borrow_mut().runtime.input_mut().push(intent);
            }
        });
        let _ =
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let visible =
                    document_clone.visibility_state() != web_sys::VisibilityState::Hidden;
                app.borrow_mut().runtime.set_visible(visible);
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside): held keys never see their key-up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().runtime.focus_lost();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portal Overlay (native) starting...");
    log::info!("The overlay needs a browser page - run with `trunk serve`");
    log::info!("Playing a headless session instead");

    headless::run(0x5EED);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session against a fixed layout, no GPU or DOM
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use portal_overlay::audio::NullSink;
    use portal_overlay::platform::{FixedLayout, ManualClock};
    use portal_overlay::renderer::{HeadlessRenderer, StarLayers, Viewport};
    use portal_overlay::ui::{ContentCatalog, UiIntent};
    use portal_overlay::{FrameReport, Runtime, Settings, Tuning};

    const DT: f32 = 1.0 / 60.0;

    type Session = Runtime<ManualClock, NullSink>;

    fn advance(
        rt: &mut Session,
        layout: &FixedLayout,
        renderer: &mut HeadlessRenderer,
        seconds: f32,
    ) -> Vec<FrameReport> {
        let frames = (seconds / DT).round() as usize;
        (0..frames)
            .map(|_| {
                rt.clock_mut().advance(DT);
                rt.frame(layout, renderer)
            })
            .collect()
    }

    pub fn run(seed: u64) {
        let catalog = match ContentCatalog::embedded() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Embedded content invalid: {}", e);
                return;
            }
        };
        let viewport = Viewport::new(1280, 720, 1.0);
        let tuning = Tuning::default();
        let settings = Settings::detect();
        let quality = settings.quality;

        let elements: Vec<String> = catalog
            .hotspots()
            .iter()
            .map(|h| h.element().to_owned())
            .collect();
        let names: Vec<&str> = elements.iter().map(String::as_str).collect();
        let baseline = viewport.height as f32 - tuning.motion.baseline_offset;
        let layout = FixedLayout::row(&names, viewport.width as f32, baseline, (120.0, 160.0));

        let mut rt = Runtime::new(
            seed,
            viewport,
            tuning,
            settings,
            catalog,
            ManualClock::new(),
            NullSink,
        );
        let mut renderer =
            HeadlessRenderer::new(StarLayers::generate(rt.state().rng_state.star_seed(), quality));
        rt.unlock_audio();

        // Walk to the left wall, then sweep right across every hotspot
        rt.input_mut().key_down("ArrowLeft");
        advance(&mut rt, &layout, &mut renderer, 5.0);
        rt.input_mut().key_up("ArrowLeft");

        rt.input_mut().key_down("ArrowRight");
        let visited: Vec<String> = advance(&mut rt, &layout, &mut renderer, 9.0)
            .into_iter()
            .filter_map(|r| r.entered)
            .collect();
        rt.input_mut().key_up("ArrowRight");
        println!("✓ Visited hotspots: {}", visited.join(", "));

        // Walk back until a hotspot is reached and activate it
        rt.input_mut().key_down("ArrowLeft");
        for _ in 0..600 {
            if advance(&mut rt, &layout, &mut renderer, DT)
                .iter()
                .any(|r| r.entered.is_some())
            {
                break;
            }
        }
        rt.input_mut().key_up("ArrowLeft");
        rt.input_mut().key_down("Enter");
        rt.input_mut().push(UiIntent::OpenLightbox("arena".into()));
        for report in advance(&mut rt, &layout, &mut renderer, DT) {
            println!("✓ Overlay changes: {:?}", report.overlay);
        }
        rt.input_mut().key_down("Escape");
        rt.input_mut().key_down("Escape");
        for report in advance(&mut rt, &layout, &mut renderer, DT) {
            println!("✓ Escape twice: {:?}", report.overlay);
        }

        // Hidden pages accrue no time
        let before = rt.state().motion.pos;
        let streaks = rt.state().effects.active().len();
        rt.set_visible(false);
        rt.clock_mut().advance(30.0);
        let skipped = rt.frame(&layout, &mut renderer);
        rt.set_visible(true);
        let resumed = advance(&mut rt, &layout, &mut renderer, DT);
        println!(
            "✓ Hidden for 30s: frame ran={}, resumed dt={:.4}, avatar moved {:.2}px, streaks {} -> {}",
            skipped.ran,
            resumed.first().map_or(0.0, |r| r.dt),
            (rt.state().motion.pos - before).length(),
            streaks,
            rt.state().effects.active().len()
        );

        println!(
            "✓ Session done: {} frames rendered, {} vertices in the last frame, {} ticks simulated",
            renderer.frames,
            renderer.last_vertex_count,
            rt.state().time_ticks
        );
    }
}
