//! Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::renderer::{NullRenderer, RenderSink, Scene, SdfRenderState, score_text};
    use flappy::{CommandSender, Game, GameOverSink, Settings};

    /// GPU renderer plus the DOM score overlay
    struct WebRenderer {
        gpu: Option<SdfRenderState>,
        score_el: Option<Element>,
    }

    impl RenderSink for WebRenderer {
        fn draw(&mut self, scene: &Scene) {
            match self.gpu.as_mut() {
                Some(gpu) => gpu.draw(scene),
                None => NullRenderer.draw(scene),
            }
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&scene.score.text));
            }
        }
    }

    /// Shows the game-over panel
    struct GameOverPanel {
        document: Document,
    }

    impl GameOverSink for GameOverPanel {
        fn on_game_over(&mut self, final_score: u64) {
            if let Some(el) = self.document.get_element_by_id("final-score") {
                el.set_text_content(Some(&score_text(final_score)));
            }
            show(&self.document, "game-over-screen", true);
        }
    }

    /// Web game instance holding all state
    struct WebGame {
        game: Game,
        sender: CommandSender,
        renderer: WebRenderer,
        game_over: GameOverPanel,
        /// A requestAnimationFrame callback is scheduled
        frame_pending: bool,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl WebGame {
        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.settings.show_fps {
                if let Some(el) = self.game_over.document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let world = settings.world;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, world aspect
        let dpr = window.device_pixel_ratio();
        let width = (world.world_width as f64 * dpr) as u32;
        let height = (world.world_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let gpu = init_gpu(&canvas, width, height).await;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let mut game = Game::new(seed, world);
        game.autopilot = settings.autopilot;
        let sender = game.command_sender();

        log::info!("Game initialized with seed: {}", seed);

        let web = Rc::new(RefCell::new(WebGame {
            game,
            sender,
            renderer: WebRenderer {
                gpu,
                score_el: document.get_element_by_id("hud-score"),
            },
            game_over: GameOverPanel {
                document: document.clone(),
            },
            frame_pending: false,
            settings,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        show(&document, "start-screen", true);
        show(&document, "game-over-screen", false);

        setup_input_handlers(&canvas, web.clone());
        setup_start_buttons(&document, web);

        log::info!("Flappy ready!");
    }

    async fn init_gpu(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<SdfRenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("No GPU adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match SdfRenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        }
    }

    /// Hide the panels, queue a start, and make sure frames are running
    fn request_start(web: &Rc<RefCell<WebGame>>) {
        {
            let w = web.borrow();
            let document = &w.game_over.document;
            show(document, "start-screen", false);
            show(document, "game-over-screen", false);
            w.sender.start();
        }
        ensure_frame(web.clone());
    }

    fn setup_start_buttons(document: &Document, web: Rc<RefCell<WebGame>>) {
        for id in ["start-button", "restart-button"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let web = web.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    request_start(&web);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, web: Rc<RefCell<WebGame>>) {
        let sender = web.borrow().sender.clone();

        // Mouse click - flap
        {
            let sender = sender.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                sender.impulse();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - flap
        {
            let sender = sender.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                sender.impulse();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        sender.impulse();
                    }
                    "Enter" => request_start(&web),
                    "i" | "I" => {
                        let mut w = web.borrow_mut();
                        w.game.autopilot = !w.game.autopilot;
                        w.settings.autopilot = w.game.autopilot;
                        w.settings.save();
                        log::info!("Idle mode: {}", w.game.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn ensure_frame(web: Rc<RefCell<WebGame>>) {
        if web.borrow().frame_pending {
            return;
        }
        request_animation_frame(web);
    }

    fn request_animation_frame(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        web.borrow_mut().frame_pending = true;
        let closure = Closure::once(move |time: f64| {
            game_loop(web, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(web: Rc<RefCell<WebGame>>, time: f64) {
        let keep_going = {
            let mut w = web.borrow_mut();
            w.frame_pending = false;
            w.track_fps(time);

            let WebGame {
                game,
                renderer,
                game_over,
                ..
            } = &mut *w;
            game.frame(renderer, game_over).wants_next_frame()
        };

        if keep_going {
            request_animation_frame(web);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy::renderer::NullRenderer;
    use flappy::sim::GamePhase;
    use flappy::{FrameOutcome, Game, Settings};

    /// Runs played by the headless demo
    const RUNS: usize = 3;
    /// Frame cap per run so a perfect autopilot still terminates
    const MAX_FRAMES_PER_RUN: u64 = 100_000;

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn load_settings() -> Settings {
        match std::env::args().nth(1) {
            Some(path) => match Settings::load_from_path(Path::new(&path)) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {} ({}), using defaults", path, e);
                    Settings::default()
                }
            },
            None => Settings::default(),
        }
    }

    pub fn run() {
        let settings = load_settings();
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Flappy (native, headless) seed {}", seed);

        let mut game = Game::new(seed, settings.world);
        // Nobody is clicking: the autopilot plays
        game.autopilot = true;
        let sender = game.command_sender();
        let mut renderer = NullRenderer;
        let mut scores = Vec::with_capacity(RUNS);

        for run in 1..=RUNS {
            sender.start();
            let mut frames = 0;
            loop {
                let outcome = game.frame(&mut renderer, &mut |score: u64| scores.push(score));
                frames += 1;
                if let FrameOutcome::GameOver { final_score } = outcome {
                    println!("Run {}: score {}", run, final_score);
                    break;
                }
                if frames >= MAX_FRAMES_PER_RUN {
                    println!("Run {}: still flying after {} frames", run, frames);
                    scores.push(game.state.score);
                    // Let the next start through
                    game.state.phase = GamePhase::Ended;
                    break;
                }
            }
        }

        let best = scores.iter().copied().max().unwrap_or(0);
        println!("Best score: {}", best);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
