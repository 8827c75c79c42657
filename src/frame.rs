use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::app::App;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;

pub struct FrameContext {
    pub app: Rc<App>,
    pub ctx: web::CanvasRenderingContext2d,
    pub last_instant: Instant,
}

impl FrameContext {
    /// Advance any camera flight and repaint. Returns false once torn down.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f64().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        if self.app.site.borrow().is_torn_down() {
            log::info!("[frame] site map torn down, stopping loop");
            return false;
        }
        let camera = self.app.view.borrow_mut().advance(dt_sec);
        let scene = self.app.site.borrow().scene();
        render::draw(&self.ctx, &self.app.canvas, &scene, camera);
        true
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow_mut().frame() {
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
