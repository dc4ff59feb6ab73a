//! Sea Lanes entry point
//!
//! The browser build wires DOM events and the animation-frame loop; the
//! native build runs the simulation headless.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use sea_lanes::Tuning;
    use sea_lanes::platform::{
        FrameDriver, FrameOutcome, TouchPoint, classify_touch, intent_for_button, intent_for_key,
    };
    use sea_lanes::renderer::{Camera, RenderState, Scene, frame_vertices};
    use sea_lanes::sim::{GameState, RunPhase, TickInput};
    use sea_lanes::ui::{self, Modal, UiAction};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: Scene,
        driver: FrameDriver,
        input: TickInput,
        render_state: Option<RenderState>,
        camera: Camera,
        touch_start: Option<TouchPoint>,
        /// Pending requestAnimationFrame handle
        frame_handle: Option<i32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed, Tuning::default()),
                scene: Scene::default(),
                driver: FrameDriver::new(),
                input: TickInput::default(),
                render_state: None,
                camera: Camera::default(),
                touch_start: None,
                frame_handle: None,
            }
        }

        /// Run one frame; returns whether another should be scheduled
        fn update(&mut self, time: f64) -> bool {
            let sink = if self.render_state.is_some() {
                Some(&mut self.scene)
            } else {
                None
            };
            let outcome = self.driver.frame(time, &mut self.state, &self.input, sink);

            // Clear one-shot inputs after processing
            self.input.boost = false;

            if let FrameOutcome::Ticked(report) = &outcome {
                if let Some(id) = report.collision {
                    log::info!(
                        "Game over: obstacle #{} at {} m",
                        id,
                        self.state.distance_display()
                    );
                }
            }
            self.driver.is_running()
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                self.camera.aspect = render_state.aspect();
                let vertices = frame_vertices(&self.scene, &self.camera, self.state.travelled);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and modals in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let view = ui::view(&self.state);

            set_visible(&document, "welcome-modal", view.modal == Some(Modal::Welcome));
            set_visible(
                &document,
                "gameover-modal",
                matches!(view.modal, Some(Modal::GameOver { .. })),
            );
            if let Some(Modal::GameOver { distance }) = view.modal {
                if let Some(el) = document.get_element_by_id("final-distance") {
                    el.set_text_content(Some(&distance.to_string()));
                }
            }

            set_visible(&document, "hud", view.hud_visible);
            if let Some(el) = document.query_selector("#hud-distance .hud-value").ok().flatten() {
                el.set_text_content(Some(&view.distance_text));
            }
            if let Some(el) = document.query_selector("#hud-speed .hud-value").ok().flatten() {
                el.set_text_content(Some(&view.speed_text));
            }
            if let Some(el) = document.get_element_by_id("hud-speed") {
                let class = if view.boosting { "hud-item boost" } else { "hud-item" };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Route a modal button; returns whether the loop should start
        fn handle_action(&mut self, action: UiAction) -> bool {
            if self.driver.is_closed() {
                log::warn!("Ignoring {:?}: renderer was released", action);
                return false;
            }
            let seed = js_sys::Date::now() as u64;
            match ui::apply_action(&mut self.state, action, seed, &mut self.scene) {
                Ok(()) if self.state.phase == RunPhase::Running => {
                    self.input = TickInput::default();
                    self.driver.start()
                }
                Ok(()) => false,
                Err(e) => {
                    log::warn!("Ignoring {:?}: {}", action, e);
                    false
                }
            }
        }

        /// Stop the loop and release GPU resources
        fn teardown(&mut self) {
            self.driver.shutdown();
            if let (Some(handle), Some(window)) = (self.frame_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
            self.render_state = None;
            log::info!("Torn down");
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        sea_lanes::platform::init_logging(false);
        log::info!("Sea Lanes starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let (width, height) = fit_canvas(&window, &canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.render();
            g.update_hud();
        }

        setup_input_handlers(&canvas, game.clone());
        setup_control_buttons(game.clone());
        setup_modal_buttons(game.clone());
        setup_lifecycle_handlers(&canvas, game);

        log::info!("Sea Lanes ready");
        Ok(())
    }

    /// Size the canvas backing store to its CSS box
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn touch_point(canvas: &HtmlCanvasElement, touch: &web_sys::Touch, time_ms: f64) -> TouchPoint {
        let rect = canvas.get_bounding_client_rect();
        TouchPoint {
            x: touch.client_x() as f32 - rect.left() as f32,
            y: touch.client_y() as f32 - rect.top() as f32,
            time_ms,
        }
    }

    /// Start the loop from a modal button or key
    fn dispatch_action(game: &Rc<RefCell<Game>>, action: UiAction) {
        let start = game.borrow_mut().handle_action(action);
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }
        if start && game.borrow().frame_handle.is_none() {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "Enter" {
                    let phase = game.borrow().state.phase;
                    match phase {
                        RunPhase::Idle => dispatch_action(&game, UiAction::Start),
                        RunPhase::GameOver => dispatch_action(&game, UiAction::Restart),
                        RunPhase::Running => {}
                    }
                    return;
                }
                if let Some(intent) = intent_for_key(&key) {
                    event.prevent_default();
                    if !event.repeat() {
                        game.borrow_mut().input.apply(intent);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - remember where and when
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let point = touch_point(&canvas_clone, &touch, event.time_stamp());
                    game.borrow_mut().touch_start = Some(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - swipe or tap
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let Some(start) = g.touch_start.take() else {
                    return;
                };
                if let Some(touch) = event.changed_touches().get(0) {
                    let end = touch_point(&canvas_clone, &touch, event.time_stamp());
                    let intent = classify_touch(start, end, canvas_clone.client_width() as f32);
                    g.input.apply(intent);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_control_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in ["btn-left", "btn-center", "btn-right", "btn-boost"] {
            let (Some(btn), Some(intent)) = (document.get_element_by_id(id), intent_for_button(id))
            else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                game.borrow_mut().input.apply(intent);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_modal_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in ["start-btn", "restart-btn", "decline-btn"] {
            let (Some(btn), Some(action)) = (document.get_element_by_id(id), UiAction::from_button(id))
            else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                dispatch_action(&game, action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_lifecycle_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Resize
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = fit_canvas(&window_clone, &canvas_clone);
                let mut g = game.borrow_mut();
                if let Some(ref mut render_state) = g.render_state {
                    render_state.resize(w, h);
                }
                g.render();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away: cancel the pending frame before resources drop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().teardown();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_for_frame = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_for_frame, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let reschedule = {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            let reschedule = g.update(time);
            g.render();
            g.update_hud();
            reschedule
        };

        if reschedule {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use sea_lanes::Tuning;
    use sea_lanes::platform::FrameDriver;
    use sea_lanes::renderer::Scene;
    use sea_lanes::sim::{GameState, TickInput, autopilot};

    /// Run Sea Lanes without a browser
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Run seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Frames to simulate
        #[arg(long, default_value_t = 10_000)]
        pub frames: u64,
        /// Simulated display refresh rate
        #[arg(long, default_value_t = 60.0)]
        pub fps: f64,
        /// JSON file overriding the default tuning
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Steer with the built-in pilot instead of holding the center lane
        #[arg(long)]
        pub autopilot: bool,
        /// Restarts allowed after a game over
        #[arg(long, default_value_t = 0)]
        pub restarts: u32,
        /// Enable verbose logging
        #[arg(short, long)]
        pub verbose: bool,
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning file {}", path.display()))?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        let mut state = GameState::new(args.seed, tuning);
        let mut scene = Scene::default();
        let mut driver = FrameDriver::new();
        let mut input = TickInput::default();

        state.start(&mut scene)?;
        driver.start();

        let frame_ms = 1000.0 / args.fps.max(1.0);
        let mut now = 0.0;
        let mut restarts_left = args.restarts;
        let mut best = 0;
        let mut peak_obstacles = 0;

        for frame in 0..args.frames {
            if args.autopilot {
                input.lane_target = autopilot::choose_lane(&state);
            }
            driver.frame(now, &mut state, &input, Some(&mut scene));
            now += frame_ms;
            peak_obstacles = peak_obstacles.max(state.obstacles.len());

            if !driver.is_running() {
                best = best.max(state.distance_display());
                log::info!(
                    "Game over at frame {}: {} m, speed {:.1}",
                    frame,
                    state.distance_display(),
                    state.speed()
                );
                if restarts_left == 0 {
                    break;
                }
                restarts_left -= 1;
                state.restart(state.seed.wrapping_add(1), &mut scene)?;
                input = TickInput::default();
                driver.start();
            }
        }
        best = best.max(state.distance_display());

        println!(
            "best distance {} m, final phase {:?}, peak obstacles {}",
            best, state.phase, peak_obstacles
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let args = headless::Args::parse();
    sea_lanes::platform::init_logging(args.verbose);
    log::info!("Sea Lanes (native) starting headless...");
    headless::run(args)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
