//! Browser host and JS bindings
//!
//! Pointer move/up listeners live on `window` so a drag keeps tracking
//! after the cursor leaves the letter. They exist only between grab and
//! release. The run timer is a `setInterval` that exists only while armed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::SignalHost;
use crate::game::Game;
use crate::settings::{GameVariant, Settings};
use crate::sim::PieceId;

type SharedGame = Rc<RefCell<Game<WebHost>>>;
type PointerClosure = Closure<dyn FnMut(MouseEvent)>;

/// `SignalHost` backed by window listeners and `setInterval`
pub struct WebHost {
    game: Weak<RefCell<Game<WebHost>>>,
    on_move: Option<PointerClosure>,
    on_release: Option<PointerClosure>,
    /// Detached listeners; the release closure may still be on the stack
    retired: Vec<PointerClosure>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl WebHost {
    fn new(game: Weak<RefCell<Game<WebHost>>>) -> Self {
        Self {
            game,
            on_move: None,
            on_release: None,
            retired: Vec::new(),
            interval: None,
        }
    }
}

impl SignalHost for WebHost {
    fn attach_pointer_observers(&mut self) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, cannot observe pointer");
            return;
        };
        self.retired.clear();

        let game = self.game.clone();
        let on_move = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if let Some(game) = game.upgrade() {
                let point = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().pointer_move(point);
            }
        });
        let game = self.game.clone();
        let on_release = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().release();
            }
        });

        let _ = window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        let _ = window.add_event_listener_with_callback("mouseup", on_release.as_ref().unchecked_ref());
        self.on_move = Some(on_move);
        self.on_release = Some(on_release);
    }

    fn detach_pointer_observers(&mut self) {
        let window = web_sys::window();
        if let Some(on_move) = self.on_move.take() {
            if let Some(window) = &window {
                let _ = window
                    .remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
            }
            self.retired.push(on_move);
        }
        if let Some(on_release) = self.on_release.take() {
            if let Some(window) = &window {
                let _ = window
                    .remove_event_listener_with_callback("mouseup", on_release.as_ref().unchecked_ref());
            }
            self.retired.push(on_release);
        }
    }

    fn arm_interval(&mut self, interval_ms: u32) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, cannot arm timer");
            return;
        };
        let game = self.game.clone();
        let on_tick = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().tick();
            }
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            on_tick.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => self.interval = Some((handle, on_tick)),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn cancel_interval(&mut self) {
        if let Some((handle, _on_tick)) = self.interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: SharedGame,
}

impl WebGame {
    fn with_settings(settings: Settings, seed: u64) -> Self {
        let game = Rc::new_cyclic(|weak| RefCell::new(Game::new(settings, seed, WebHost::new(weak.clone()))));
        Self { game }
    }
}

#[wasm_bindgen]
impl WebGame {
    /// New game for a variant name ("classic" or "large")
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> WebGame {
        let variant = GameVariant::from_str(variant).unwrap_or_else(|| {
            log::warn!("Unknown variant {:?}, using classic", variant);
            GameVariant::Classic
        });
        Self::with_settings(Settings::from_variant(variant), js_sys::Date::now() as u64)
    }

    /// New game from a settings JSON document
    pub fn from_settings_json(json: &str) -> Result<WebGame, JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_settings(settings, js_sys::Date::now() as u64))
    }

    /// Playfield top-left in client coordinates
    pub fn set_viewport_origin(&self, x: f32, y: f32) {
        self.game.borrow_mut().set_viewport_origin(Vec2::new(x, y));
    }

    /// Pointer down on a letter; `x`/`y` are playfield-local
    pub fn grab(&self, x: f32, y: f32, piece: &str) -> bool {
        let piece = match piece {
            "striker" | "a" | "A" => PieceId::Striker,
            _ => PieceId::Target,
        };
        self.game.borrow_mut().grab(Vec2::new(x, y), piece)
    }

    pub fn select_target_score(&self, value: u32) -> bool {
        self.game.borrow_mut().select_target_score(value) != crate::sim::Transition::Ignored
    }

    pub fn restart(&self) -> bool {
        self.game.borrow_mut().restart() != crate::sim::Transition::Ignored
    }

    pub fn target_score_presets(&self) -> Vec<u32> {
        self.game.borrow().settings().target_score_presets.clone()
    }

    /// Current frame state as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.borrow().snapshot()).unwrap_or_default()
    }

    pub fn phase(&self) -> String {
        self.game.borrow().session().phase.as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.borrow().session().score
    }

    pub fn target_score(&self) -> u32 {
        self.game.borrow().session().target_score
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.game.borrow().session().elapsed_ms as f64
    }

    pub fn elapsed_label(&self) -> String {
        crate::sim::format_time(self.game.borrow().session().elapsed_ms)
    }

    pub fn is_dragging(&self) -> bool {
        self.game.borrow().is_dragging()
    }

    /// Striker origin as `[x, y]`
    pub fn striker_pos(&self) -> Vec<f32> {
        self.game.borrow().session().striker.pos.to_array().to_vec()
    }

    /// Target origin as `[x, y]`
    pub fn target_pos(&self) -> Vec<f32> {
        self.game.borrow().session().target.pos.to_array().to_vec()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("A to M ready");
}
