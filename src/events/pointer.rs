use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

use trail_core::Camera;

use crate::app::App;
use crate::constants::MARKER_HIT_RADIUS_PX;
use crate::input::{self, DragState};
use crate::{dom, overlay};

pub fn wire_pointer_handlers(app: &Rc<App>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(app, &drag);
    wire_pointermove(app, &drag);
    wire_pointerup(app, &drag);
    wire_wheel(app);
}

fn listen<E: FromWasmAbi + 'static>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(app: &Rc<App>, drag: &Rc<RefCell<DragState>>) {
    let a = app.clone();
    let drag = drag.clone();
    listen(&app.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_css(&ev, &a.canvas);
        drag.borrow_mut().begin(ev.pointer_id(), pos);
        _ = a.canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(app: &Rc<App>, drag: &Rc<RefCell<DragState>>) {
    let a = app.clone();
    let drag = drag.clone();
    listen(&app.canvas, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_css(&ev, &a.canvas);
        let Some(delta) = drag.borrow_mut().move_to(ev.pointer_id(), pos) else {
            return;
        };
        if delta == DVec2::ZERO {
            return;
        }
        pan_by(&a, delta);
    });
}

fn wire_pointerup(app: &Rc<App>, drag: &Rc<RefCell<DragState>>) {
    for event in ["pointerup", "pointercancel"] {
        let a = app.clone();
        let drag = drag.clone();
        let is_cancel = event == "pointercancel";
        listen(&app.canvas, event, move |ev: web::PointerEvent| {
            let ended = drag.borrow_mut().end(ev.pointer_id());
            _ = a.canvas.release_pointer_capture(ev.pointer_id());
            if ended == Some(true) && !is_cancel {
                let pos = input::pointer_canvas_css(&ev, &a.canvas);
                open_popup_at(&a, pos);
            }
        });
    }
}

fn wire_wheel(app: &Rc<App>) {
    let a = app.clone();
    listen(&app.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dz = input::wheel_zoom_delta(ev.delta_y(), ev.delta_mode());
        if dz != 0.0 {
            zoom_by(&a, dz);
        }
    });
}

/// Pan the visible camera by a screen delta, through the site map's clamps.
pub fn pan_by(app: &Rc<App>, delta: DVec2) {
    let shown = app.view.borrow().camera;
    let camera = app.site.borrow_mut().set_camera(shown.panned_by(delta));
    app.view.borrow_mut().jump(camera);
}

/// Zoom around the visible center. A running flight is abandoned where it is.
pub fn zoom_by(app: &Rc<App>, delta: f64) {
    let shown = app.view.borrow().camera;
    let wanted = Camera {
        zoom: shown.zoom + delta,
        ..shown
    };
    let camera = app.site.borrow_mut().set_camera(wanted);
    app.view.borrow_mut().jump(camera);
}

fn open_popup_at(app: &Rc<App>, px: DVec2) {
    let camera = app.view.borrow().camera;
    let (w, h) = dom::css_size(&app.canvas);
    let viewport = DVec2::new(w, h);
    let scene = app.site.borrow().scene();
    let hit = scene.marker_at(
        |c| (camera.to_screen(c, viewport) - px).length(),
        MARKER_HIT_RADIUS_PX,
    );
    if let Some(marker) = hit {
        log::debug!("[pointer] clicked {}", marker.id);
    }
    overlay::show_popup(&app.document, hit.and_then(|m| m.popup));
}
