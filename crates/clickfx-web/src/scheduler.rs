//! `requestAnimationFrame`-backed frame scheduler

use clickfx_core::{FxError, Result};
use clickfx_runtime::{FrameCallback, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub struct AnimationFrameScheduler {
    window: web_sys::Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        let js = Closure::once_into_js(move |timestamp_ms: f64| callback(timestamp_ms));
        self.window
            .request_animation_frame(js.unchecked_ref())
            .map_err(|e| FxError::UnsupportedEnvironment(format!("requestAnimationFrame: {e:?}")))?;
        Ok(())
    }
}
