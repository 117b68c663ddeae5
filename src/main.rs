//! Paddle Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

    use paddle_rush::renderer::CanvasSurface;
    use paddle_rush::{Game, Host, Settings};

    type WebGame = Game<CanvasSurface, DomHost>;

    /// Page controls and browser dialogs
    struct DomHost {
        window: web_sys::Window,
        start_btn: Option<HtmlElement>,
        restart_btn: Option<HtmlElement>,
        exit_btn: Option<HtmlElement>,
    }

    fn button(document: &Document, id: &str) -> Option<HtmlElement> {
        let el = document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("No #{} element", id);
        }
        el.and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn set_visible(el: &Option<HtmlElement>, visible: bool) {
        if let Some(el) = el {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    impl Host for DomHost {
        fn notify(&mut self, message: &str) {
            if let Err(e) = self.window.alert_with_message(message) {
                log::warn!("alert failed: {:?}", e);
            }
        }

        fn set_start_visible(&mut self, visible: bool) {
            set_visible(&self.start_btn, visible);
        }

        fn set_over_controls_visible(&mut self, visible: bool) {
            set_visible(&self.restart_btn, visible);
            set_visible(&self.exit_btn, visible);
        }

        fn reload(&mut self) {
            if let Err(e) = self.window.location().reload() {
                log::warn!("reload failed: {:?}", e);
            }
        }
    }

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err(&e.to_string()))?;

        log::info!("Paddle Rush starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_err("no 2d context"))?
            .dyn_into()?;

        let settings = Settings::load(&canvas);
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);

        let mut host = DomHost {
            window,
            start_btn: button(&document, "startBtn"),
            restart_btn: button(&document, "restartBtn"),
            exit_btn: button(&document, "exitBtn"),
        };
        host.set_over_controls_visible(false);

        let game = Game::new(settings, seed, CanvasSurface::new(ctx), host)
            .map_err(|e| js_err(&e.to_string()))?;
        let game = Rc::new(RefCell::new(game));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game);

        log::info!("Paddle Rush ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<WebGame>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            game.borrow_mut().pointer_move(x);
        });
        let _ = canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        let mut handler = handler;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<WebGame>>) {
        {
            let game = game.clone();
            on_click(document, "startBtn", move || {
                let go = game.borrow_mut().start();
                if go {
                    game_loop(game.clone());
                }
            });
        }

        {
            let game = game.clone();
            on_click(document, "restartBtn", move || {
                let go = game.borrow_mut().restart();
                if go {
                    game_loop(game.clone());
                }
            });
        }

        on_click(document, "exitBtn", move || {
            game.borrow_mut().exit();
        });
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>) {
        let again = game.borrow_mut().tick();
        if again {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use paddle_rush::renderer::RecordingSurface;
    use paddle_rush::sim::GameState;
    use paddle_rush::{Game, Host, Settings, SpeedDirection};

    /// Upper bound on a headless run
    const MAX_TICKS: u64 = 200_000;

    /// Host that writes everything to the log
    struct LogHost;

    impl Host for LogHost {
        fn notify(&mut self, message: &str) {
            log::info!("{}", message);
        }

        fn set_start_visible(&mut self, visible: bool) {
            log::debug!("start control visible: {}", visible);
        }

        fn set_over_controls_visible(&mut self, visible: bool) {
            log::debug!("restart/exit controls visible: {}", visible);
        }

        fn reload(&mut self) {
            log::info!("reload requested");
        }
    }

    /// Pointer x that keeps the most urgent ball on the paddle: the lowest
    /// descending ball, or the lowest ball when none is descending
    fn autopilot(state: &GameState) -> Option<f32> {
        let lowest = |descending: bool| {
            state
                .balls
                .iter()
                .filter(|b| !descending || b.vel.y > 0.0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|b| b.pos.x)
        };
        lowest(true).or_else(|| lowest(false))
    }

    /// Settings from `[settings.json] [--direction fixed|random]`
    fn parse_args(
        args: impl IntoIterator<Item = String>,
    ) -> Result<Settings, Box<dyn std::error::Error>> {
        let mut path = None;
        let mut direction = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--direction" {
                let name = args.next().ok_or("--direction needs a value")?;
                let parsed = SpeedDirection::from_str(&name)
                    .ok_or_else(|| format!("unknown speed direction: {}", name))?;
                direction = Some(parsed);
            } else {
                path = Some(arg);
            }
        }

        let mut settings = match path {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Loaded settings from {}", path);
                Settings::from_json(&json)?
            }
            None => Settings::default(),
        };
        if let Some(direction) = direction {
            settings.speed_direction = direction;
        }
        log::info!("Ball speed direction: {}", settings.speed_direction.as_str());

        Ok(settings)
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = parse_args(std::env::args().skip(1))?;
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut game = Game::new(settings, seed, RecordingSurface::new(), LogHost)?;
        game.start();

        let mut ticks = 0;
        while ticks < MAX_TICKS {
            if let Some(x) = autopilot(game.state()) {
                game.pointer_move(x);
            }
            ticks += 1;
            if !game.tick() {
                break;
            }
        }

        let state = game.state();
        log::info!(
            "Headless run finished after {} ticks: score {}, {} balls, {} obstacles, phase {:?}",
            ticks,
            state.score,
            state.balls.len(),
            state.obstacles.len(),
            state.phase
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Paddle Rush (native) starting headless run...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
