//! Cell Feast entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use cell_feast::input::InputEvent;
    use cell_feast::renderer::CanvasSurface;
    use cell_feast::sim::GameEvent;
    use cell_feast::{Driver, Settings};

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Map client (page) coordinates onto the arena
        fn to_arena(&self, client_x: f64, client_y: f64) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let settings = self.driver.settings();
            let scale_x = if rect.width() > 0.0 {
                settings.arena_width as f64 / rect.width()
            } else {
                1.0
            };
            let scale_y = if rect.height() > 0.0 {
                settings.arena_height as f64 / rect.height()
            } else {
                1.0
            };
            (
                ((client_x - rect.left()) * scale_x) as f32,
                ((client_y - rect.top()) * scale_y) as f32,
            )
        }

        fn pointer(&mut self, client_x: f64, client_y: f64) {
            let (x, y) = self.to_arena(client_x, client_y);
            self.driver.handle_input(InputEvent::Pointer { x, y });
        }

        fn frame(&mut self, time: f64) {
            let events = self.driver.frame(time, &mut self.surface);
            let absorbed = events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerAbsorbed { .. }))
                .count();
            if absorbed > 0 {
                if let Some(state) = self.driver.state() {
                    log::info!("{} players left", state.players.len());
                }
            }
        }
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| anyhow!("logger: {e}"))?;

        log::info!("Cell Feast starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas"))?;

        let settings = Settings::load(canvas.get_attribute("data-settings").as_deref());
        canvas.set_width(settings.arena_width as u32);
        canvas.set_height(settings.arena_height as u32);

        let surface = CanvasSurface::new(&canvas)?;
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            driver: Driver::new(settings, seed),
            surface,
            canvas: canvas.clone(),
        }));

        setup_input_handlers(&window, &canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Cell Feast running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<()> {
        // Click steers the controlled player
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer(event.client_x() as f64, event.client_y() as f64);
            });
            canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("click listener: {e:?}"))?;
            closure.forget();
        }

        // Touch start steers with the first touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress the synthetic click that follows
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .pointer(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("touchstart listener: {e:?}"))?;
            closure.forget();
        }

        // Digit keys switch the controlled player
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    game.borrow_mut().driver.handle_input(InputEvent::Key(c));
                }
            });
            window
                .add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("keypress listener: {e:?}"))?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Cell Feast failed to start: {e:#}");
    }
}

/// Headless frames run by the native harness (10 s at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 600;
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SEED: u64 = 42;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use cell_feast::renderer::NullSurface;
    use cell_feast::sim::GameEvent;
    use cell_feast::{Driver, Settings};

    env_logger::init();
    log::info!("Cell Feast (native) starting...");
    log::info!("Native mode runs a headless simulation - run with `trunk serve` for the web version");

    let mut driver = Driver::new(Settings::default(), HEADLESS_SEED);
    let (mut food_eaten, mut absorbed) = (0usize, 0usize);

    for i in 0..HEADLESS_FRAMES {
        let time = i as f64 * 1000.0 / 60.0;
        for event in driver.frame(time, &mut NullSurface) {
            match event {
                GameEvent::FoodEaten { .. } => food_eaten += 1,
                GameEvent::PlayerAbsorbed { .. } => absorbed += 1,
            }
        }
    }

    log::info!(
        "{} frames: {} food eaten, {} players absorbed",
        driver.frames(),
        food_eaten,
        absorbed
    );

    let snapshot = driver
        .snapshot()
        .ok_or_else(|| anyhow::anyhow!("driver never ran"))?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
