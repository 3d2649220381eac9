//! Flap Fit entry point
//!
//! Handles platform-specific initialization and drives the frame loop.
//! The pose pipeline runs outside this crate and hands samples in through
//! DOM events; the simulation consumes the latest sample once per frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CustomEvent, KeyboardEvent};

    use flap_fit::scoreboard::{LocalScoreStore, ScoreStore};
    use flap_fit::settings::Settings;
    use flap_fit::sim::{ControlMode, GamePhase, GameState, PoseSample, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        /// Input for the next tick; `pose` holds the latest sample, the
        /// rest are one-shot flags
        input: TickInput,
        store: LocalScoreStore,
        /// rAF timestamp of the previous frame (ms)
        last_time: f64,
        /// Highest score already written to storage
        saved_best: u32,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let store = LocalScoreStore;
            let best = store.load().unwrap_or(0);
            Self {
                state: GameState::new(seed, best, settings.tuning()),
                settings,
                input: TickInput::default(),
                store,
                last_time: 0.0,
                saved_best: best,
                last_phase: GamePhase::Running,
            }
        }

        /// One simulation tick per animation frame
        fn update(&mut self, time_ms: f64) {
            let dt = if self.last_time > 0.0 {
                (((time_ms - self.last_time) / 1000.0) as f32).min(0.1)
            } else {
                1.0 / 60.0
            };
            self.last_time = time_ms;

            let input = self.input;
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing. The pose sample is
            // not one-shot: when inference runs slower than the display,
            // the most recent sample is reused rather than stalling.
            self.input.flap = false;
            self.input.restart = false;

            // Persist the best score when a run ends on a new record
            let phase = self.state.phase;
            if phase != self.last_phase {
                if phase == GamePhase::GameOver {
                    let best = self.state.metrics.snapshot().best_score;
                    if best > self.saved_best {
                        self.store.save(best);
                        self.saved_best = best;
                    }
                }
                self.last_phase = phase;
            }
        }

        /// Update HUD elements in the DOM (read-only w.r.t. the sim)
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let snap = self.state.metrics.snapshot();

            let set = |selector: &str, value: String| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(&value));
                }
            };

            set("#hud-score .hud-value", snap.score.to_string());
            set("#hud-best .hud-value", snap.best_score.to_string());
            set("#hud-calories .hud-value", format!("{:.0}", snap.calories));
            set("#hud-flaps .hud-value", snap.flaps.to_string());

            if self.settings.show_fps {
                set("#hud-fps .hud-value", format!("{:.0}", snap.fps));
                set(
                    "#hud-confidence .hud-value",
                    format!("{:.0}%", snap.pose_confidence * 100.0),
                );
                set("#hud-latency .hud-value", format!("{:.0}ms", snap.latency_ms));
            }

            // Show/hide the game-over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    set("#final-score", snap.score.to_string());
                    set("#final-best", snap.best_score.to_string());
                    set("#final-calories", format!("{:.0}", snap.calories));
                    set("#final-flaps", snap.flaps.to_string());
                    set(
                        "#summary-message",
                        summary_message(snap.flaps, snap.calories).to_string(),
                    );
                    if let Some(record) = document.get_element_by_id("new-record") {
                        let is_record = snap.score == snap.best_score && snap.score > 0;
                        let _ = record.set_attribute(
                            "class",
                            if is_record { "" } else { "hidden" },
                        );
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Game-over encouragement keyed off the workout, not the score
    fn summary_message(flaps: u32, calories: f32) -> &'static str {
        if calories >= 50.0 {
            "Amazing workout! You're on fire!"
        } else if calories >= 30.0 {
            "Great job! Keep pushing!"
        } else if calories >= 15.0 {
            "Nice effort! You're getting stronger!"
        } else if flaps >= 50 {
            "Impressive! So many movements!"
        } else if flaps >= 20 {
            "Good session! Keep it up!"
        } else if flaps >= 10 {
            "Not bad! Let's do more next time!"
        } else {
            "Good start! Let's burn more calories!"
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flap Fit starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        setup_pose_listener(game.clone());
        setup_keyboard(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame_loop(game);

        log::info!("Flap Fit running!");
    }

    /// The pose pipeline dispatches `pose-sample` CustomEvents on the
    /// document with `{ targetY, confidence, latencyMs }`, and `pose-flap`
    /// when it detects a discrete movement. Low-confidence suppression is
    /// its responsibility; everything that arrives here is consumed.
    fn setup_pose_listener(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: CustomEvent| {
                let detail = event.detail();
                let get = |key: &str| {
                    js_sys::Reflect::get(&detail, &JsValue::from_str(key))
                        .ok()
                        .and_then(|v| v.as_f64())
                };
                if let Some(target_y) = get("targetY") {
                    game.borrow_mut().input.pose = Some(PoseSample {
                        target_y: target_y as f32,
                        confidence: get("confidence").unwrap_or(0.0) as f32,
                        latency_ms: get("latencyMs").unwrap_or(0.0) as f32,
                    });
                }
            });
            let _ = document
                .add_event_listener_with_callback("pose-sample", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: CustomEvent| {
                game.borrow_mut().input.flap = true;
            });
            let _ = document
                .add_event_listener_with_callback("pose-flap", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keyboard fallback: Space flaps (switching to impulse control),
    /// R restarts after a game over
    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.code().as_str() {
                "Space" => {
                    if g.state.control_mode != ControlMode::Impulse {
                        log::info!("Switching to keyboard (impulse) control");
                        g.state.control_mode = ControlMode::Impulse;
                    }
                    g.input.flap = true;
                }
                "KeyR" => {
                    g.input.restart = true;
                }
                _ => {}
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Standard self-rescheduling requestAnimationFrame loop
    fn request_animation_frame_loop(game: Rc<RefCell<Game>>) {
        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
        let scheduler = callback.clone();

        *callback.borrow_mut() = Some(Closure::new(move |time_ms: f64| {
            {
                let mut g = game.borrow_mut();
                g.update(time_ms);
                g.update_hud();
            }
            schedule(&scheduler);
        }));
        schedule(&callback);
    }

    fn schedule(callback: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
        web_sys::window()
            .unwrap()
            .request_animation_frame(
                callback
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            )
            .expect("requestAnimationFrame failed");
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
    env_logger::init();
    log::info!("Flap Fit (native) starting...");
    log::info!("Pose input requires the browser build; running a headless demo");

    demo_run();
}

/// Headless smoke run: a synthetic pose that tracks each upcoming gap
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use flap_fit::scoreboard::{MemoryScoreStore, ScoreStore};
    use flap_fit::sim::{GamePhase, GameState, PoseSample, TickInput, tick};
    use flap_fit::tuning::Tuning;

    let store = MemoryScoreStore::default();
    let mut state = GameState::new(0xF1A9, store.load().unwrap_or(0), Tuning::default());
    let dt = 1.0 / 60.0;

    for _ in 0..3600 {
        let target = state
            .field
            .obstacles
            .iter()
            .find(|o| o.trailing_edge() > state.avatar.pos.x)
            .map(|o| o.gap_center - state.avatar.size / 2.0)
            .unwrap_or(state.avatar.pos.y);
        let input = TickInput {
            pose: Some(PoseSample {
                target_y: target,
                confidence: 1.0,
                latency_ms: 0.0,
            }),
            ..Default::default()
        };
        tick(&mut state, &input, dt);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let snap = state.metrics.snapshot();
    if snap.best_score > 0 {
        store.save(snap.best_score);
    }
    println!(
        "Demo run: score {}, {} flaps, {:.1} kcal over {} ticks",
        snap.score, snap.flaps, snap.calories, state.time_ticks
    );
}
