//! Page installation and DOM event wiring

use crate::canvas::CanvasSurface;
use crate::overlay::{stage, Overlay};
use crate::scheduler::AnimationFrameScheduler;
use clickfx_core::{FxError, Result, Size, Vec2};
use clickfx_particles::{EffectStack, EffectsConfig};
use clickfx_runtime::{run_every_frame, HostEvent, PointerIndicator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

const CANVAS_STYLE: &str = "width: 100%; height: 100%; top: 0; left: 0; z-index: 99999; \
                            position: fixed; pointer-events: none;";

/// Everything the DOM callbacks share
struct WebHost {
    effects: EffectStack,
    surface: CanvasSurface,
    body: HtmlElement,
    pointer: HtmlElement,
    /// Last indicator written to the DOM
    shown: PointerIndicator,
}

impl WebHost {
    fn dispatch(&mut self, event: HostEvent, now_ms: f64) {
        if let HostEvent::Resize { size } = event {
            clickfx_render::Surface::resize(&mut self.surface, size);
        }
        self.effects.handle_event(&event, now_ms);
        self.sync_indicator();
    }

    fn frame(&mut self, now_ms: f64) {
        self.effects.frame(now_ms, &mut self.surface);
        // Long press engages from a timer, which only fires inside a frame
        self.sync_indicator();
    }

    fn sync_indicator(&mut self) {
        let Some(indicator) = self.effects.indicator() else {
            return;
        };
        if indicator == self.shown {
            return;
        }
        let classes = self.body.class_list();
        let _ = classes.toggle_with_force("is-pressed", indicator.pressed);
        let _ = classes.toggle_with_force("is-longpress", indicator.long_press);

        let style = self.pointer.style();
        let _ = style.set_property("top", &format!("{}px", indicator.cursor.y));
        let _ = style.set_property("left", &format!("{}px", indicator.cursor.x));
        self.shown = indicator;
    }
}

/// Install the configured effects on the current page.
///
/// Nothing is attached to the page until every fallible step has succeeded.
pub fn install(config: EffectsConfig) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| unsupported("no window"))?;
    let document = window.document().ok_or_else(|| unsupported("no document"))?;
    let body = document.body().ok_or_else(|| unsupported("no document body"))?;

    let size = window_size(&window);
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u32);
    let mut effects = EffectStack::from_config(&config, seed);
    if effects.is_empty() {
        log::warn!("[web] no effects enabled; nothing to install");
        return Ok(());
    }
    effects.initialize(size)?;

    let (canvas, ctx) = create_canvas(&document)?;
    let pointer: HtmlElement = document
        .create_element("span")
        .map_err(|e| unsupported(&format!("create pointer: {e:?}")))?
        .dyn_into()
        .map_err(|_| unsupported("pointer is not an HtmlElement"))?;
    let _ = pointer.class_list().add_1("pointer");

    log::info!(
        "[web] installing {:?} on {}x{} canvas",
        effects.names(),
        size.width,
        size.height
    );

    let host = Rc::new(RefCell::new(WebHost {
        effects,
        surface: CanvasSurface::new(canvas.clone(), ctx, size),
        body: body.clone(),
        pointer: pointer.clone(),
        shown: PointerIndicator::default(),
    }));

    let overlay = PageOverlay {
        body,
        canvas,
        pointer,
    };
    let listen_target = window.clone();
    stage(
        &overlay,
        || {
            listen_mouse(&listen_target, "mousedown", &host, |position| {
                HostEvent::PointerDown { position }
            })?;
            listen_mouse(&listen_target, "mouseup", &host, |position| {
                HostEvent::PointerUp { position }
            })?;
            listen_mouse(&listen_target, "mousemove", &host, |position| {
                HostEvent::PointerMove { position }
            })?;
            listen_resize(&listen_target, &host)
        },
        || {
            let frame_host = Rc::clone(&host);
            run_every_frame(Rc::new(AnimationFrameScheduler::new(window)), move |now_ms| {
                frame_host.borrow_mut().frame(now_ms);
                true
            })
        },
    )
}

/// The canvas and cursor element an install adds to `<body>`
struct PageOverlay {
    body: HtmlElement,
    canvas: HtmlCanvasElement,
    pointer: HtmlElement,
}

impl Overlay for PageOverlay {
    fn attach(&self) -> Result<()> {
        self.body
            .append_child(&self.canvas)
            .map_err(|e| unsupported(&format!("append canvas: {e:?}")))?;
        if let Err(e) = self.body.append_child(&self.pointer) {
            self.canvas.remove();
            return Err(unsupported(&format!("append pointer: {e:?}")));
        }
        Ok(())
    }

    fn detach(&self) {
        self.canvas.remove();
        self.pointer.remove();
    }
}

fn create_canvas(document: &Document) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| unsupported(&format!("create canvas: {e:?}")))?
        .dyn_into()
        .map_err(|_| unsupported("canvas is not an HtmlCanvasElement"))?;
    let _ = canvas.set_attribute("style", CANVAS_STYLE);

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or_else(|| unsupported("canvas 2d context is unsupported"))?;
    Ok((canvas, ctx))
}

fn window_size(window: &web_sys::Window) -> Size {
    let dim = |v: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Size::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn listen_mouse(
    window: &web_sys::Window,
    kind: &str,
    host: &Rc<RefCell<WebHost>>,
    to_event: fn(Vec2) -> HostEvent,
) -> Result<()> {
    let host = Rc::clone(host);
    let callback = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
        let position = Vec2::new(e.client_x() as f32, e.client_y() as f32);
        host.borrow_mut().dispatch(to_event(position), e.time_stamp());
    });
    window
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        .map_err(|e| unsupported(&format!("addEventListener({kind}): {e:?}")))?;
    // Listeners live as long as the page
    callback.forget();
    Ok(())
}

fn listen_resize(window: &web_sys::Window, host: &Rc<RefCell<WebHost>>) -> Result<()> {
    let host = Rc::clone(host);
    let target = window.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        let size = window_size(&target);
        host.borrow_mut()
            .dispatch(HostEvent::Resize { size }, e.time_stamp());
    });
    window
        .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
        .map_err(|e| unsupported(&format!("addEventListener(resize): {e:?}")))?;
    callback.forget();
    Ok(())
}

fn unsupported(what: &str) -> FxError {
    FxError::UnsupportedEnvironment(what.to_string())
}
