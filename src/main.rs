//! Flappy Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_dash::audio::{AudioManager, SoundEffect};
    use flappy_dash::consts::*;
    use flappy_dash::renderer::CanvasRenderer;
    use flappy_dash::sim::{GameEvent, GamePhase, GameState, tick};
    use flappy_dash::{Settings, TickClock};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        clock: TickClock,
        audio: AudioManager,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut state = GameState::new(seed);
            state.muted = settings.muted;

            let mut audio = AudioManager::new();
            audio.set_muted(settings.muted);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_volume(settings.music_volume);

            Self {
                state,
                renderer: None,
                clock: TickClock::default(),
                audio,
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);

            if self.state.phase == GamePhase::Running {
                for _ in 0..self.clock.advance(dt) {
                    tick(&mut self.state);
                }
            } else {
                // No banked time may leak into the next session
                self.clock.reset();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_idx = self.frame_index;
            let oldest_time = self.frame_times[oldest_idx];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Map queued simulation events to audio and HUD effects
        fn drain_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::Started => {
                        self.audio.resume();
                        self.audio.start_music();
                    }
                    GameEvent::Jumped => {
                        self.audio.play(SoundEffect::Jump);
                    }
                    GameEvent::Scored { .. } => {
                        // Pulse the score readout; no sound for scoring
                        let document = web_sys::window().unwrap().document().unwrap();
                        if let Some(el) = document.get_element_by_id("hud-score") {
                            let _ = el.set_attribute("class", "pop");
                        }
                    }
                    GameEvent::GameOver { .. } => {
                        self.audio.play(SoundEffect::GameOver);
                        self.audio.stop_music();
                    }
                    GameEvent::Restarted => {
                        self.audio.stop_music();
                        let document = web_sys::window().unwrap().document().unwrap();
                        if let Some(el) = document.get_element_by_id("hud-score") {
                            let _ = el.set_attribute("class", "");
                        }
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Update FPS
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide start overlay
            if let Some(el) = document.get_element_by_id("start-overlay") {
                let class = if self.state.phase == GamePhase::Idle {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide game over panel
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Mute button label
            if let Some(el) = document.get_element_by_id("mute-btn") {
                let label = if self.state.muted {
                    "Sound: Off"
                } else {
                    "Sound: On"
                };
                el.set_text_content(Some(label));
            }
        }

        fn start(&mut self) {
            self.state.start();
            self.clock.reset();
        }

        fn restart(&mut self) {
            self.state.restart();
            self.clock.reset();
        }

        fn toggle_mute(&mut self) {
            let muted = self.state.toggle_muted();
            self.audio.set_muted(muted);
            self.settings.muted = muted;
            self.settings.save();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Attach the canvas renderer
        let dpr = window.device_pixel_ratio();
        let renderer = CanvasRenderer::new(&canvas, dpr);
        if renderer.is_none() {
            log::warn!("Failed to acquire 2d context - rendering disabled");
        }
        game.borrow_mut().renderer = renderer;

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Set up HUD buttons
        setup_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Right-click already flaps via mousedown; keep the menu closed
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().state.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => g.state.jump(),
                    "Enter" => match g.state.phase {
                        GamePhase::Idle => g.start(),
                        GamePhase::GameOver => g.restart(),
                        GamePhase::Running => {}
                    },
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().toggle_mute();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.drain_events();
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_dash::consts::*;
    use flappy_dash::sim::{GameEvent, GamePhase, GameState, tick};

    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = GameState::new(seed);
    state.start();
    log::info!("Headless run with seed {}", seed);

    // Trivial auto-player: flap whenever the bird sinks below the gap
    // center of the nearest pillar still ahead of it. Capped so a lucky
    // run terminates.
    while state.phase == GamePhase::Running && state.time_ticks < 20_000 {
        let target = state
            .pillars
            .iter()
            .filter(|p| p.x + PILLAR_WIDTH > BIRD_LEFT)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|p| p.gap_top + state.gap / 2.0)
            .unwrap_or(FIELD_HEIGHT / 2.0);

        if state.bird.y + BIRD_HEIGHT > target && state.bird.vel >= 0.0 {
            state.jump();
        }
        tick(&mut state);

        for event in state.take_events() {
            if let GameEvent::Scored { total } = event {
                log::info!("Passed a pillar, score {}", total);
            }
        }
    }

    println!("Final score: {}", state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
