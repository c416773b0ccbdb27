//! Cat Pounce core crate.
//!
//! A full-window touchscreen toy for cats: a bright dot roams the canvas,
//! springs away from taps and clicks, and bounces off the window edges under
//! friction and device-tilt gravity. The physics lives in [`dot`] (pure Rust,
//! native-testable); all browser glue lives in the private `toy` module and is
//! exposed to JS through `start_toy()`.

use wasm_bindgen::prelude::*;

pub mod dot;
mod toy;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Tunables. Compile-time only; px units unless noted. Values picked for a
// phone-sized screen and a cat-sized paw.
// -----------------------------------------------------------------------------

/// Maximum distance (px) from the dot at which a hit still imparts an impulse.
pub const TOUCH_ACCURACY: f64 = 60.0;
/// Dot radius in px. Bounds shrink by this amount on each side.
pub const DOT_RADIUS: f64 = 20.0;
/// Speed the dot starts with on page load, px/s.
pub const INITIAL_SPEED: f64 = 300.0;
/// Hard speed ceiling, px/s. A single hit adds at most half of this.
pub const MAXIMUM_SPEED: f64 = 2000.0;
/// Below this speed the dot snaps to rest and the frame loop stops, px/s.
pub const MINIMUM_SPEED: f64 = 5.0;
/// Fraction of speed shed per frame.
pub const FRICTION_COEFFICIENT: f64 = 0.015;
/// Scale applied to the normalized device-tilt reading before it feeds velocity.
pub const GRAVITY_SCALE: f64 = 30.0;

pub const DOT_COLOR: &str = "#e8491d";
pub const BACKGROUND_COLOR: &str = "#101014";

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_toy() -> Result<(), JsValue> {
    toy::start()
}
