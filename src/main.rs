//! Air Dodger entry point
//!
//! On the web this wires the canvas, input and audio to a [`Game`] and drives
//! it from `requestAnimationFrame`. Natively it runs a headless autopilot
//! session and records the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use air_dodger::input::PointerMotion;
    use air_dodger::platform::storage::LocalStorageStore;
    use air_dodger::platform::web::{CanvasPainter, WebAudio};
    use air_dodger::sim::SessionPhase;
    use air_dodger::{Game, Settings, Tuning, Viewport};

    /// Everything the browser callbacks share
    struct WebGame {
        game: Game<WebAudio, LocalStorageStore>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        pointer_locked: bool,
    }

    impl WebGame {
        /// Match the canvas backing store to its CSS size
        fn fit_canvas(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let w = self.canvas.client_width().max(1);
            let h = self.canvas.client_height().max(1);
            self.canvas.set_width((w as f64 * dpr) as u32);
            self.canvas.set_height((h as f64 * dpr) as u32);
            if let Some(ctx) = context_2d(&self.canvas) {
                ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
            }
            self.game.resize(Viewport::new(w as f32, h as f32));
        }

        /// Click: start, resume or play again depending on phase
        fn activate(&mut self, now: f64) {
            match self.game.phase() {
                SessionPhase::NotStarted => {
                    self.game.start(now);
                }
                SessionPhase::Paused => {
                    self.game.resume(now);
                }
                SessionPhase::Ended => {
                    let seed = js_sys::Date::now() as u64;
                    self.game.restart(seed, now);
                    log::info!("Game restarted with seed: {}", seed);
                }
                SessionPhase::Running => {}
            }
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas.get_context("2d").ok()??.dyn_into().ok()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Air Dodger starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx = context_2d(&canvas).ok_or("no 2d context")?;

        let settings = Settings::load();
        let pointer_lock = settings.pointer_lock;
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            seed,
            Tuning::default(),
            Viewport::default(),
            WebAudio::new(),
            LocalStorageStore,
            settings,
        );
        let web = Rc::new(RefCell::new(WebGame {
            game,
            painter: CanvasPainter::new(ctx),
            canvas: canvas.clone(),
            pointer_locked: false,
        }));
        web.borrow_mut().fit_canvas();
        web.borrow_mut().game.show_title();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, web.clone(), pointer_lock);
        setup_auto_pause(web.clone());
        setup_resize(web.clone());

        request_animation_frame(web);

        log::info!("Air Dodger running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        web: Rc<RefCell<WebGame>>,
        pointer_lock: bool,
    ) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Pointer lock change
        {
            let web = web.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let locked = doc.pointer_lock_element().is_some();
                log::info!("Pointer lock {}", if locked { "acquired" } else { "released" });
                web.borrow_mut().pointer_locked = locked;
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Mouse move - movementX/Y when locked, otherwise absolute position
        {
            let web = web.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut w = web.borrow_mut();
                let motion = if w.pointer_locked {
                    PointerMotion::Relative {
                        dx: event.movement_x() as f32,
                        dy: event.movement_y() as f32,
                    }
                } else {
                    PointerMotion::Absolute {
                        x: event.offset_x() as f32,
                        y: event.offset_y() as f32,
                    }
                };
                w.game.pointer_moved(motion);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - start/resume/restart, then grab the pointer
        {
            let web = web.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let locked = {
                    let mut w = web.borrow_mut();
                    w.game.audio().resume();
                    w.activate(now());
                    w.pointer_locked
                };
                if pointer_lock && !locked {
                    let _ = canvas_clone.request_pointer_lock();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut w = web.borrow_mut();
                match event.key().as_str() {
                    "Escape" => {
                        w.game.toggle_pause(now());
                    }
                    "a" | "A" => {
                        let on = !w.game.autopilot();
                        w.game.set_autopilot(on);
                    }
                    "m" | "M" => w.game.toggle_mute().save(),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let web = web.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    web.borrow_mut().game.focus_lost(now());
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                web.borrow_mut().game.focus_lost(now());
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            web.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(web);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(web: Rc<RefCell<WebGame>>) {
        {
            let mut w = web.borrow_mut();
            let frame = w.game.frame(now());
            w.painter.paint(&frame);
        }

        request_animation_frame(web);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Air Dodger (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xA1D0_D6E5_u64);
    let max_secs: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600.0);

    let outcome = demo::run(seed, max_secs);
    println!(
        "seed {}: survived {}s, score {}, wave {}{}",
        seed,
        outcome.result.time_secs,
        outcome.result.score,
        outcome.result.wave,
        if outcome.finished { "" } else { " (time limit)" }
    );
    println!(
        "bests: {}s / {} points",
        outcome.bests.best_time_secs, outcome.bests.best_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use air_dodger::audio::RecordingAudio;
    use air_dodger::consts::FRAME_MS;
    use air_dodger::platform::default_store;
    use air_dodger::sim::{SessionPhase, SessionResult};
    use air_dodger::{BestRecords, Game, Settings, Tuning, Viewport};

    pub struct Outcome {
        pub result: SessionResult,
        pub bests: BestRecords,
        /// False when the time limit hit before the autopilot died
        pub finished: bool,
    }

    /// Play one autopilot session on a simulated 60 Hz clock
    pub fn run(seed: u64, max_secs: f64) -> Outcome {
        // Write the settings back so a first run leaves an editable file
        let settings = Settings::load();
        settings.save();

        let mut game = Game::new(
            seed,
            Tuning::default(),
            Viewport::default(),
            RecordingAudio::default(),
            default_store(),
            settings,
        );
        game.set_autopilot(true);
        game.show_title();

        let mut now = 0.0;
        game.start(now);

        let mut next_report = 5_000.0;
        while game.phase() == SessionPhase::Running && now < max_secs * 1000.0 {
            now += FRAME_MS;
            let frame = game.frame(now);

            if game.state().time_ms >= next_report {
                next_report += 5_000.0;
                let hud = game.hud();
                log::info!(
                    "t={}s wave={} lives={} score={} enemies={} draw_cmds={}",
                    hud.time_secs,
                    hud.wave,
                    hud.lives,
                    hud.score,
                    game.state().enemies.len(),
                    frame.commands.len()
                );
            }
        }

        let finished = game.phase() == SessionPhase::Ended;
        let state = game.state();
        let result = game.last_result().copied().unwrap_or(SessionResult {
            score: state.score,
            time_secs: state.survival_secs(),
            wave: state.wave,
        });
        log::info!("Cues played: {}", game.audio().played.len());

        Outcome {
            result,
            bests: *game.bests(),
            finished,
        }
    }
}
