//! Browser driver
//!
//! Binds the runtime to the page: canvas and score lookup by id, window key
//! events, the games dialog buttons, and `requestAnimationFrame` scheduling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, KeyboardEvent};

use super::Host;
use crate::renderer::CanvasSurface;
use crate::runtime::{FrameTicket, GameRuntime};
use crate::settings::ArcadeConfig;

/// Body attribute holding optional config JSON
pub const CONFIG_ATTRIBUTE: &str = "data-arcade-config";

const GAMES_DIALOG_ID: &str = "games-modal";
const GAMES_BUTTON_ID: &str = "games-btn";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Page elements looked up fresh on every use; the canvas may mount late
pub struct WebHost {
    canvas_id: String,
    score_id: String,
}

impl WebHost {
    pub fn new(config: &ArcadeConfig) -> Self {
        Self {
            canvas_id: config.canvas_id.clone(),
            score_id: config.score_id.clone(),
        }
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn acquire_surface(&mut self) -> Option<CanvasSurface> {
        CanvasSurface::from_element_id(&self.canvas_id)
    }

    fn show_score(&mut self, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(&self.score_id)) {
            el.set_text_content(Some(text));
        }
    }
}

type SharedRuntime = Rc<RefCell<GameRuntime<WebHost>>>;

/// Handle the page holds on to. Cloning shares the same runtime.
#[wasm_bindgen]
#[derive(Clone)]
pub struct Arcade {
    runtime: SharedRuntime,
    /// Pending `requestAnimationFrame` id, so `stop` can cancel it
    raf_handle: Rc<Cell<Option<i32>>>,
    /// Ticket the next animation frame runs with
    queued: Rc<Cell<Option<FrameTicket>>>,
    /// One frame callback for the page's lifetime, re-registered every frame
    frame_callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

#[wasm_bindgen]
impl Arcade {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Arcade {
        let config = ArcadeConfig::from_json_or_default(config_json.as_deref());
        let seed = js_sys::Date::now() as u64;
        log::info!("Arcade initialized with seed: {}", seed);
        let host = WebHost::new(&config);
        let arcade = Arcade {
            runtime: Rc::new(RefCell::new(GameRuntime::new(host, config, seed))),
            raf_handle: Rc::new(Cell::new(None)),
            queued: Rc::new(Cell::new(None)),
            frame_callback: Rc::new(RefCell::new(None)),
        };
        let handle = arcade.clone();
        *arcade.frame_callback.borrow_mut() =
            Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| handle.on_animation_frame(time)));
        arcade
    }

    /// `"snake"`, `"paddle"` or `"pong"`; anything else is ignored
    pub fn start(&self, mode: &str) {
        let ticket = self.runtime.borrow_mut().start(mode);
        if let Some(ticket) = ticket {
            self.request_frame(ticket);
        }
    }

    pub fn stop(&self) {
        self.runtime.borrow_mut().stop();
        self.queued.set(None);
        let (Some(id), Some(window)) = (self.raf_handle.get(), web_sys::window()) else {
            return;
        };
        // On failure the handle stays set; the frame fires with no ticket unless a start queues one
        match window.cancel_animation_frame(id) {
            Ok(()) => self.raf_handle.set(None),
            Err(err) => log::warn!("cancelAnimationFrame failed: {:?}", err),
        }
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) {
        self.runtime.borrow_mut().key_down(key);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&self, key: &str) {
        self.runtime.borrow_mut().key_up(key);
    }

    /// Active mode name, if any
    pub fn mode(&self) -> Option<String> {
        self.runtime.borrow().mode().map(|m| m.as_str().to_string())
    }
}

impl Arcade {
    fn request_frame(&self, ticket: FrameTicket) {
        self.queued.set(Some(ticket));
        if self.raf_handle.get().is_some() {
            // Already requested; that frame picks up the new ticket
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.frame_callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_handle.set(Some(id)),
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn on_animation_frame(&self, time: f64) {
        self.raf_handle.set(None);
        let Some(ticket) = self.queued.take() else {
            return;
        };
        let next = self.runtime.borrow_mut().on_frame(ticket, time);
        if let Some(next) = next {
            self.request_frame(next);
        }
    }

    /// Feed window key events into the input table
    pub fn install_key_listeners(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let arcade = self.clone();
        listen(&window, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                arcade.key_down(&event.key());
            }
        });

        let arcade = self.clone();
        listen(&window, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                arcade.key_up(&event.key());
            }
        });
    }

    /// Games dialog: opening starts snake, closing stops, `[data-game]`
    /// buttons pick a mode (`stop` stops)
    pub fn bind_games_modal(&self) {
        let Some(document) = document() else {
            return;
        };
        let Some(dialog) = document.get_element_by_id(GAMES_DIALOG_ID) else {
            log::debug!("No games dialog on this page");
            return;
        };

        if let Some(button) = document.get_element_by_id(GAMES_BUTTON_ID) {
            let arcade = self.clone();
            let dialog = dialog.clone();
            listen(&button, "click", move |_| {
                set_dialog_open(&dialog, true);
                arcade.start("snake");
            });
        }

        for selector in [".modal-backdrop", ".modal-close"] {
            if let Ok(Some(el)) = dialog.query_selector(selector) {
                let arcade = self.clone();
                let dialog = dialog.clone();
                listen(&el, "click", move |_| {
                    set_dialog_open(&dialog, false);
                    arcade.stop();
                });
            }
        }

        let arcade = self.clone();
        listen(&dialog, "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(button)) = target.closest("[data-game]") else {
                return;
            };
            match button.get_attribute("data-game").as_deref() {
                Some("stop") => arcade.stop(),
                Some(game) => arcade.start(game),
                None => {}
            }
        });
    }
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Failed to listen for {}: {:?}", event, err);
    }
    closure.forget();
}

fn set_dialog_open(dialog: &Element, open: bool) {
    let (class_result, hidden) = if open {
        (dialog.class_list().add_1("open"), "false")
    } else {
        (dialog.class_list().remove_1("open"), "true")
    };
    if class_result.is_err() || dialog.set_attribute("aria-hidden", hidden).is_err() {
        log::warn!("Failed to update games dialog state");
    }
    if let Some(body) = document().and_then(|d| d.body()) {
        let classes = body.class_list();
        let blur_result = if open {
            classes.add_1("modal-blur")
        } else {
            classes.remove_1("modal-blur")
        };
        if let Err(err) = blur_result {
            log::warn!("Failed to toggle page blur: {:?}", err);
        }
    }
}

thread_local! {
    static ARCADE: RefCell<Option<Arcade>> = const { RefCell::new(None) };
}

/// Start a game on the page's arcade
#[wasm_bindgen]
pub fn start_game(mode: &str) {
    if let Some(arcade) = ARCADE.with(|slot| slot.borrow().clone()) {
        arcade.start(mode);
    }
}

/// Stop the page's arcade
#[wasm_bindgen]
pub fn stop_game() {
    if let Some(arcade) = ARCADE.with(|slot| slot.borrow().clone()) {
        arcade.stop();
    }
}

/// Page entry point: logging, config, listeners, dialog wiring
pub fn boot() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {}", err).into());
    }

    let config_json = document()
        .and_then(|d| d.body())
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
    let arcade = Arcade::new(config_json);
    arcade.install_key_listeners();
    arcade.bind_games_modal();
    ARCADE.with(|slot| *slot.borrow_mut() = Some(arcade));

    log::info!("Micro arcade ready");
}
