use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::app::{self, App};
use crate::events::pointer::{pan_by, zoom_by};
use crate::input;

/// Arrow keys pan, +/- zoom and Escape stops narration while the map has focus.
pub fn wire_keyboard(app: &Rc<App>) {
    let a = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if let Some(delta) = input::pan_for_key(&key) {
            pan_by(&a, delta);
            ev.prevent_default();
        } else if let Some(dz) = input::zoom_for_key(&key) {
            zoom_by(&a, dz);
            ev.prevent_default();
        } else if key == "Escape" {
            app::update(&a, |site, out| site.stop_narration(out));
        }
    }) as Box<dyn FnMut(_)>);
    _ = app
        .canvas
        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
