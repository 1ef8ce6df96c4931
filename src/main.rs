//! Pounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use pounce::Tuning;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use pounce::platform::web::{self, DomHud, SetupError};
    use pounce::sim::Engine;
    use pounce::{EngineHandle, Runtime, Settings, Tuning, instance};

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Pounce starting...");

        let handle = instance::get_or_init(build).expect("Failed to set up the game");
        setup_menu_buttons();
        setup_auto_pause();

        // Line the engine clock up with the RAF timestamps before the first level
        handle.advance(now_ms());
        handle.start();
        request_animation_frame();
    }

    fn now_ms() -> u64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map_or(0, |performance| performance.now() as u64)
    }

    fn build() -> Result<EngineHandle, SetupError> {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        let engine = Engine::new(Tuning::default(), seed);
        let runtime = Runtime::new(engine, web::collaborators()?, settings);
        let hud = DomHud::new(web::document()?);
        Ok(EngineHandle::new(runtime, Box::new(hud)))
    }

    fn request_animation_frame() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(time: f64) {
        if let Some(handle) = instance::get() {
            handle.advance(time as u64);
        }
        request_animation_frame();
    }

    fn hide(id: &str) {
        if let Some(el) = web::document().ok().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn on_click(id: &'static str, action: fn(&EngineHandle)) {
        let Ok(document) = web::document() else {
            return;
        };
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(handle) = instance::get() {
                    action(&handle);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons() {
        on_click("resume-btn", |handle| {
            hide("pause-menu");
            handle.pause(false);
        });
        on_click("restart-btn", |handle| {
            hide("game-over");
            handle.start();
        });
    }

    fn setup_auto_pause() {
        let Ok(document) = web::document() else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.hidden() {
                if let Some(handle) = instance::get() {
                    handle.pause(true);
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pounce (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(7);
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    demo::run(seed, tuning);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Tuning::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autoplay over virtual time
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::convert::Infallible;

    use pounce::platform::headless::{Autoplay, Recorder, StaticSprites};
    use pounce::sim::Engine;
    use pounce::{Collaborators, EngineHandle, Runtime, Settings, Tuning, instance};

    const DEMO_MS: u64 = 120_000;
    const IDLE_STEP_MS: u64 = 17;

    pub fn run(seed: u64, tuning: Tuning) {
        let recorder = Recorder::default();
        let init = || Ok::<_, Infallible>(build(&recorder, seed, tuning));
        let handle = match instance::get_or_init(init) {
            Ok(handle) => handle,
            Err(never) => match never {},
        };

        let mut bot = Autoplay::new(seed, 0.2);
        let mut game_overs = 0;
        let mut now = 0;
        handle.start();

        while now < DEMO_MS {
            handle.advance(now);

            let hud = recorder.hud();
            if hud.game_overs > game_overs {
                game_overs = hud.game_overs;
                log::info!("Restarting after game over #{}", game_overs);
                handle.start();
            }

            if let Some(raw) = handle.with_engine(|engine| bot.decide(engine)) {
                handle.input(&raw);
            }

            let next = handle.with_engine(Engine::next_due);
            now = next.unwrap_or(now + IDLE_STEP_MS).max(now + 1);
        }

        let hud = recorder.hud();
        let caught = handle.with_engine(|engine| engine.state().caught);
        println!("\nDemo finished after {}s of game time", DEMO_MS / 1000);
        println!("  score:      {}", hud.score);
        println!("  level:      {}", hud.level);
        println!("  game overs: {}", hud.game_overs);
        println!(
            "  caught:     {} mice, {} grasshoppers, {} butterflies, {} birds",
            caught.mouse, caught.grasshopper, caught.butterfly, caught.bird
        );
        println!("  frames:     {}", recorder.clears());

        instance::reset();
    }

    fn build(recorder: &Recorder, seed: u64, tuning: Tuning) -> EngineHandle {
        let collaborators = Collaborators {
            renderer: Box::new(recorder.renderer()),
            sprites: Box::new(StaticSprites::new(3, false)),
            background: Box::new(recorder.background()),
            input: Box::new(recorder.input()),
        };
        let engine = Engine::new(tuning, seed);
        let runtime = Runtime::new(engine, collaborators, Settings::default());
        EngineHandle::new(runtime, Box::new(recorder.handlers()))
    }
}
