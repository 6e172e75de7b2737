//! Skyshift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use skyshift::consts::*;
    use skyshift::render;
    use skyshift::sim::{Config, FieldBounds, GamePhase, GameState, TickInput, tick};
    use skyshift::{BestScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        best: BestScore,
        // Track phase edges for persistence and overlay toggling
        last_phase: GamePhase,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, bounds: FieldBounds, ctx: CanvasRenderingContext2d) -> Self {
            let settings = Settings::load();
            let best = BestScore::load();

            let config = Config {
                reduced_motion: settings.reduced_motion || prefers_reduced_motion(),
                force_lateral: settings.force_lateral || lateral_query_flag(),
            };
            let mut state = GameState::new(seed, bounds, config);
            state.best_score = best.score;

            Self {
                state,
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                settings,
                best,
                last_phase: GamePhase::Ready,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks at the fixed rate
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= TICK_DT;
                substeps += 1;

                // Clear one-shot input after processing
                self.input.activate = false;
            }

            // Persist the best score on the run-over edge
            let phase = self.state.phase;
            if phase == GamePhase::GameOver && self.last_phase != GamePhase::GameOver {
                self.best.record(self.state.score);
            }
            self.last_phase = phase;

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self) {
            render::draw(&self.ctx, &self.state);
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("best-score") {
                el.set_text_content(Some(&self.state.best_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("mode") {
                el.set_text_content(Some(self.state.mode.as_str()));
            }
            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            // Overlay toggling by phase
            if let Some(el) = document.get_element_by_id("start-screen") {
                let class = if self.state.phase == GamePhase::Ready {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("game-over-screen") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// prefers-reduced-motion media query, read once at startup
    fn prefers_reduced_motion() -> bool {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    /// Debug override via URL query (?lateral)
    fn lateral_query_flag() -> bool {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| s.contains("lateral"))
            .unwrap_or(false)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyshift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let bounds = FieldBounds {
            width: width as f32,
            height: height as f32,
        };
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, bounds, ctx)));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Skyshift running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.activate = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.activate = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.activate = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                TICK_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyshift::consts::TICKS_PER_SECOND;
    use skyshift::sim::{
        Avatar, Config, FieldBounds, GamePhase, GameState, Mode, TickInput, tick,
    };

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    log::info!("Skyshift (native headless) seed={seed}");

    let mut state = GameState::new(seed, FieldBounds::default(), Config::default());
    tick(&mut state, &TickInput { activate: true });

    // Naive autopilot: hover near mid-field in vertical mode, hold the
    // center in lateral mode
    let max_ticks = TICKS_PER_SECOND as u64 * 120;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let a = &state.avatar;
        let activate = match state.mode {
            Mode::Vertical => a.vy > 0.0 && a.y > state.bounds.height * 0.45,
            Mode::Lateral => a.x + Avatar::WIDTH / 2.0 < state.bounds.width / 2.0,
        };
        tick(&mut state, &TickInput { activate });
    }

    println!(
        "run over after {} ticks: score={} mode={}",
        state.time_ticks,
        state.score,
        state.mode.as_str()
    );
}
