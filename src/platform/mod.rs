//! Platform abstraction layer
//!
//! The core never installs callbacks itself. It asks a [`SignalHost`] to:
//! - Start/stop observing global pointer move + release (only while dragging)
//! - Start/stop a periodic timer callback
//!
//! The host feeds the resulting signals back through [`crate::Game`].

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Callback plumbing owned by whoever embeds the game
pub trait SignalHost {
    /// Begin delivering pointer move/release to the game
    fn attach_pointer_observers(&mut self);
    /// Stop delivering pointer move/release; no callback may fire afterwards
    fn detach_pointer_observers(&mut self);
    /// Begin calling `Game::tick` every `interval_ms`
    fn arm_interval(&mut self, interval_ms: u32);
    /// Stop the periodic callback; no tick may fire afterwards
    fn cancel_interval(&mut self);
}

/// Host for callers that pump signals by hand (tests, headless driver)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl SignalHost for NullHost {
    fn attach_pointer_observers(&mut self) {}
    fn detach_pointer_observers(&mut self) {}
    fn arm_interval(&mut self, _interval_ms: u32) {}
    fn cancel_interval(&mut self) {}
}

impl<H: SignalHost + ?Sized> SignalHost for &mut H {
    fn attach_pointer_observers(&mut self) {
        (**self).attach_pointer_observers()
    }
    fn detach_pointer_observers(&mut self) {
        (**self).detach_pointer_observers()
    }
    fn arm_interval(&mut self, interval_ms: u32) {
        (**self).arm_interval(interval_ms)
    }
    fn cancel_interval(&mut self) {
        (**self).cancel_interval()
    }
}
