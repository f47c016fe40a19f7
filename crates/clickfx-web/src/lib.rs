//! clickfx Web - browser host for the click effects
//!
//! Loading the wasm module installs the effects on the current page: a
//! full-window canvas that ignores pointer events, a cursor-follow element,
//! mouse and resize listeners, and a `requestAnimationFrame` loop. If the page
//! lacks a 2D canvas or event registration, installation is skipped with a
//! console diagnostic.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod host;
mod overlay;
#[cfg(target_arch = "wasm32")]
mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use host::install;
pub use overlay::{stage, Overlay};
#[cfg(target_arch = "wasm32")]
pub use scheduler::AnimationFrameScheduler;

#[cfg(target_arch = "wasm32")]
use clickfx_particles::EffectsConfig;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    match install(EffectsConfig::default()) {
        Ok(()) => {}
        Err(e) if e.is_unsupported() => log::warn!("[web] {e}; effects not installed"),
        Err(e) => log::error!("[web] install failed: {e}"),
    }
    Ok(())
}
