use glam::DVec2;
use web_sys as web;

use crate::constants::{
    CLICK_SLOP_PX, KEY_PAN_PX, WHEEL_NOTCH_PX, WHEEL_ZOOM_MAX_STEP, WHEEL_ZOOM_STEP,
};

/// One pointer gesture on the map canvas, in CSS pixels.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: DVec2,
    pub travelled: f64,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: DVec2) {
        *self = DragState {
            active: true,
            pointer_id,
            last: at,
            travelled: 0.0,
        };
    }

    /// Movement since the previous event, if this pointer is dragging.
    pub fn move_to(&mut self, pointer_id: i32, at: DVec2) -> Option<DVec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travelled += delta.length();
        Some(delta)
    }

    /// Ends the gesture. `Some(true)` when it never moved far enough to be a drag.
    pub fn end(&mut self, pointer_id: i32) -> Option<bool> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        self.active = false;
        Some(is_click(self.travelled))
    }
}

#[inline]
pub fn is_click(travelled_px: f64) -> bool {
    travelled_px <= CLICK_SLOP_PX
}

/// Zoom change for one wheel event. Scrolling down zooms out.
///
/// `delta_mode` follows `WheelEvent.deltaMode`: 0 pixels, 1 lines, 2 pages.
pub fn wheel_zoom_delta(delta_y: f64, delta_mode: u32) -> f64 {
    if !delta_y.is_finite() || delta_y == 0.0 {
        return 0.0;
    }
    let notches = match delta_mode {
        0 => delta_y / WHEEL_NOTCH_PX,
        1 => delta_y / 3.0,
        _ => delta_y.signum(),
    };
    (-notches * WHEEL_ZOOM_STEP).clamp(-WHEEL_ZOOM_MAX_STEP, WHEEL_ZOOM_MAX_STEP)
}

/// Drag-equivalent screen delta for an arrow key.
#[inline]
pub fn pan_for_key(key: &str) -> Option<DVec2> {
    match key {
        "ArrowUp" => Some(DVec2::new(0.0, KEY_PAN_PX)),
        "ArrowDown" => Some(DVec2::new(0.0, -KEY_PAN_PX)),
        "ArrowLeft" => Some(DVec2::new(KEY_PAN_PX, 0.0)),
        "ArrowRight" => Some(DVec2::new(-KEY_PAN_PX, 0.0)),
        _ => None,
    }
}

#[inline]
pub fn zoom_for_key(key: &str) -> Option<f64> {
    match key {
        "+" | "=" => Some(1.0),
        "-" | "_" => Some(-1.0),
        _ => None,
    }
}

/// Pointer position relative to the canvas's top-left corner, CSS pixels.
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    DVec2::new(
        ev.client_x() as f64 - rect.left(),
        ev.client_y() as f64 - rect.top(),
    )
}
