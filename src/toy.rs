//! Browser driver: canvas setup, input listeners, and the frame loop.
//!
//! Owns the single [`Dot`] plus the canvas context in a thread-local cell.
//! The animation loop runs only while the dot is moving: it stops scheduling
//! frames once speed hits exactly zero (or goes non-finite) and is restarted
//! by the next hit. A hit cancels the pending frame request before mutating
//! the dot so an update never observes a half-applied impulse.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::dot::{Dot, Point};

/// Standard gravity, m/s^2; devicemotion readings are normalized against it.
const STANDARD_GRAVITY: f64 = 9.81;

struct ToyState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dot: Dot,
    /// Normalized tilt vector, written only by the devicemotion listener.
    gravity: Point,
    last_frame_ms: f64,
    /// Pending requestAnimationFrame handle; None while the loop is parked.
    frame_handle: Option<i32>,
    /// Region painted last frame, cleared before the next draw.
    painted: Option<(f64, f64, f64, f64)>,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static TOY_STATE: RefCell<Option<ToyState>> = RefCell::new(None);
    static FRAME_CB: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
}

pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    // Full-window page: no margins, no scrollbars.
    body.set_attribute(
        "style",
        &format!(
            "margin:0; padding:0; overflow:hidden; background:{};",
            crate::BACKGROUND_COLOR
        ),
    )?;

    let (width, height) = viewport(&win);

    // Create / reuse the toy canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("cp-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("cp-canvas");
        // touch-action:none keeps mobile browsers from panning instead of playing
        c.set_attribute(
            "style",
            "position:fixed; left:0; top:0; display:block; touch-action:none;",
        )?;
        body.append_child(&c)?;
        c
    };
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let dot = Dot::new(
        crate::DOT_RADIUS,
        Point::new(width / 2.0, height / 2.0),
        crate::INITIAL_SPEED,
        rand_angle(),
        Point::new(width, height),
    );

    let mut state = ToyState {
        canvas: canvas.clone(),
        ctx,
        dot,
        gravity: Point::ZERO,
        last_frame_ms: now_ms(),
        frame_handle: None,
        painted: None,
    };
    full_repaint(&mut state);
    TOY_STATE.with(|cell| cell.replace(Some(state)));

    // Mouse hits
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            hit_at(Point::new(evt.offset_x() as f64, evt.offset_y() as f64));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch hits. The canvas sits at the viewport origin so client
    // coordinates are canvas coordinates.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            evt.prevent_default();
            if let Some(touch) = evt.touches().get(0) {
                hit_at(Point::new(touch.client_x() as f64, touch.client_y() as f64));
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window resize: re-size the canvas, re-derive bounds, full repaint.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(win) = window() {
                let (w, h) = viewport(&win);
                TOY_STATE.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.canvas.set_width(w as u32);
                        state.canvas.set_height(h as u32);
                        state.dot.set_extent(w, h);
                        full_repaint(state);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Device tilt (optional; never fires on desktop). Single writer of
    // `gravity`; everything else only reads it.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::DeviceMotionEvent| {
            if let Some(accel) = evt.acceleration_including_gravity() {
                let gx = accel.x().unwrap_or(0.0);
                let gy = accel.y().unwrap_or(0.0);
                TOY_STATE.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.gravity = Point::new(
                            (gx / STANDARD_GRAVITY).clamp(-1.0, 1.0),
                            (gy / STANDARD_GRAVITY).clamp(-1.0, 1.0),
                        );
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    install_frame_loop();
    request_frame();
    Ok(())
}

// --- Frame loop ---------------------------------------------------------------

fn install_frame_loop() {
    FRAME_CB.with(|cb| {
        let mut cb = cb.borrow_mut();
        if cb.is_none() {
            *cb = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
        }
    });
}

fn on_frame(ts: f64) {
    let keep_running = TOY_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.frame_handle = None;
            let dt = ((ts - state.last_frame_ms) / 1000.0).max(0.0);
            state.last_frame_ms = ts;
            state.dot.advance(dt, state.gravity);
            paint(state);
            // Park the loop at rest; a non-finite speed also halts rather
            // than spinning on garbage.
            state.dot.speed() > 0.0 && state.dot.speed().is_finite()
        } else {
            false
        }
    });
    if keep_running {
        request_frame();
    }
}

fn request_frame() {
    let handle = FRAME_CB.with(|cb| {
        let cb = cb.borrow();
        match (cb.as_ref(), window()) {
            (Some(closure), Some(win)) => win
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok(),
            _ => None,
        }
    });
    if let Some(handle) = handle {
        TOY_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.frame_handle = Some(handle);
            }
        });
    }
}

/// Route a pointer event into the dot. Cancels the pending frame first so the
/// impulse is never applied mid-update, then restarts the loop (the dot may
/// have been at rest).
fn hit_at(at: Point) {
    TOY_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            if let Some(handle) = state.frame_handle.take() {
                if let Some(win) = window() {
                    let _ = win.cancel_animation_frame(handle);
                }
            }
            state.dot.hit(at);
            state.last_frame_ms = now_ms();
        }
    });
    request_frame();
}

// --- Painting -----------------------------------------------------------------

/// Bounding rectangle of the dot, padded one px for antialiased edges.
fn dot_rect(dot: &Dot) -> (f64, f64, f64, f64) {
    let p = dot.position();
    let r = dot.radius() + 1.0;
    (p.x - r, p.y - r, 2.0 * r, 2.0 * r)
}

/// Repaint only the union of the previous and current dot rectangles.
fn paint(state: &mut ToyState) {
    let cur = dot_rect(&state.dot);
    let (x, y, w, h) = match state.painted {
        Some((px, py, pw, ph)) => {
            let x0 = px.min(cur.0);
            let y0 = py.min(cur.1);
            let x1 = (px + pw).max(cur.0 + cur.2);
            let y1 = (py + ph).max(cur.1 + cur.3);
            (x0, y0, x1 - x0, y1 - y0)
        }
        None => cur,
    };
    state.ctx.set_fill_style_str(crate::BACKGROUND_COLOR);
    state.ctx.fill_rect(x, y, w, h);
    draw_dot(state);
    state.painted = Some(cur);
}

/// Clear the whole canvas and redraw; used at startup and on resize.
fn full_repaint(state: &mut ToyState) {
    state.ctx.set_fill_style_str(crate::BACKGROUND_COLOR);
    state.ctx.fill_rect(
        0.0,
        0.0,
        state.canvas.width() as f64,
        state.canvas.height() as f64,
    );
    draw_dot(state);
    state.painted = Some(dot_rect(&state.dot));
}

fn draw_dot(state: &ToyState) {
    let p = state.dot.position();
    state.ctx.set_fill_style_str(crate::DOT_COLOR);
    state.ctx.begin_path();
    state
        .ctx
        .arc(p.x, p.y, state.dot.radius(), 0.0, std::f64::consts::TAU)
        .ok();
    state.ctx.fill();
}

// --- Small helpers ------------------------------------------------------------

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn viewport(win: &web_sys::Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(640.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
    (w, h)
}

/// Pseudo-random launch angle in [0, 2π) derived from the performance clock.
/// Same linear-congruential trick as a dice roll; not crypto secure.
fn rand_angle() -> f64 {
    let seed = (now_ms() as u64 as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223);
    (seed % 6283) as f64 / 1000.0
}
