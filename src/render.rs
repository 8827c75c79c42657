//! Canvas 2D painter for a resolved [`MapScene`].
//!
//! Works in CSS pixels; the context transform absorbs the device pixel ratio.

use glam::DVec2;
use trail_core::{Camera, Coordinate, Layer, MapScene, MarkerIcon, MarkerKind, SceneMarker};
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::constants::*;

pub fn draw(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    scene: &MapScene,
    camera: Camera,
) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let size = DVec2::new(canvas.width() as f64, canvas.height() as f64) / dpr;
    _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, size.x, size.y);

    let to_px = |c: Coordinate| camera.to_screen(c, size);
    for layer in scene.layers() {
        draw_layer(ctx, layer, &to_px);
    }
    for marker in &scene.markers {
        draw_marker(ctx, marker, to_px(marker.position));
    }
    if let Some(live) = &scene.live {
        draw_live_marker(ctx, live, to_px(live.position));
    }
    draw_north_indicator(ctx, size);
}

fn draw_layer(ctx: &web::CanvasRenderingContext2d, layer: &Layer, to_px: &impl Fn(Coordinate) -> DVec2) {
    let Some((first, rest)) = layer.vertices.split_first() else {
        return;
    };
    ctx.begin_path();
    let p0 = to_px(*first);
    ctx.move_to(p0.x, p0.y);
    for v in rest {
        let p = to_px(*v);
        ctx.line_to(p.x, p.y);
    }
    if layer.closed {
        ctx.close_path();
    }

    let stroke = layer.stroke;
    if let Some(fill) = stroke.fill {
        ctx.set_global_alpha(fill.opacity);
        ctx.set_fill_style_str(fill.color);
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }
    let dash = js_sys::Array::new();
    if let Some([on, off]) = stroke.dash {
        dash.push(&JsValue::from_f64(on));
        dash.push(&JsValue::from_f64(off));
    }
    _ = ctx.set_line_dash(&dash);
    ctx.set_line_width(stroke.weight);
    ctx.set_stroke_style_str(stroke.color);
    ctx.stroke();
    _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_marker(ctx: &web::CanvasRenderingContext2d, marker: &SceneMarker, p: DVec2) {
    if marker.highlighted {
        circle(ctx, p, HIGHLIGHT_RING_PX);
        ctx.set_fill_style_str(HIGHLIGHT_COLOR);
        ctx.fill();
    }
    match marker.icon {
        MarkerIcon::Emoji(glyph) => {
            ctx.set_font(EMOJI_FONT);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            _ = ctx.fill_text(glyph, p.x, p.y);
        }
        MarkerIcon::Pin => {
            circle(ctx, p, MARKER_RADIUS_PX);
            ctx.set_fill_style_str(MARKER_COLOR);
            ctx.fill();
            ctx.set_line_width(2.0);
            ctx.set_stroke_style_str(MARKER_OUTLINE_COLOR);
            ctx.stroke();
        }
    }
    if marker.kind == MarkerKind::Landmark {
        draw_label(ctx, marker.label, p + DVec2::new(0.0, LABEL_OFFSET_PX));
    }
}

fn draw_label(ctx: &web::CanvasRenderingContext2d, text: &str, at: DVec2) {
    draw_label_with_baseline(ctx, text, at, "top");
}

fn draw_label_with_baseline(
    ctx: &web::CanvasRenderingContext2d,
    text: &str,
    at: DVec2,
    baseline: &str,
) {
    ctx.set_font(LABEL_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline(baseline);
    ctx.set_line_width(3.0);
    ctx.set_stroke_style_str(LABEL_HALO_COLOR);
    _ = ctx.stroke_text(text, at.x, at.y);
    ctx.set_fill_style_str(LABEL_COLOR);
    _ = ctx.fill_text(text, at.x, at.y);
}

fn draw_live_marker(ctx: &web::CanvasRenderingContext2d, marker: &SceneMarker, p: DVec2) {
    circle(ctx, p, LIVE_MARKER_HALO_PX);
    ctx.set_global_alpha(LIVE_MARKER_HALO_ALPHA);
    ctx.set_fill_style_str(LIVE_MARKER_COLOR);
    ctx.fill();
    ctx.set_global_alpha(1.0);

    circle(ctx, p, LIVE_MARKER_RADIUS_PX);
    ctx.fill();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(MARKER_OUTLINE_COLOR);
    ctx.stroke();

    // Permanent tooltip above the dot.
    draw_label_with_baseline(ctx, marker.label, p - DVec2::new(0.0, LIVE_LABEL_OFFSET_PX), "bottom");
}

/// Arrow and "N" in the top-right corner. The map is never rotated.
fn draw_north_indicator(ctx: &web::CanvasRenderingContext2d, size: DVec2) {
    let c = DVec2::new(size.x - NORTH_INDICATOR_MARGIN_PX, NORTH_INDICATOR_MARGIN_PX + 6.0);
    let s = NORTH_INDICATOR_SIZE_PX;
    ctx.begin_path();
    ctx.move_to(c.x, c.y - s);
    ctx.line_to(c.x + s * 0.55, c.y + s * 0.6);
    ctx.line_to(c.x, c.y + s * 0.25);
    ctx.line_to(c.x - s * 0.55, c.y + s * 0.6);
    ctx.close_path();
    ctx.set_fill_style_str(NORTH_INDICATOR_COLOR);
    ctx.fill();

    ctx.set_font(LABEL_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    _ = ctx.fill_text("N", c.x, c.y + s * 0.7);
}

#[inline]
fn circle(ctx: &web::CanvasRenderingContext2d, p: DVec2, r: f64) {
    ctx.begin_path();
    _ = ctx.arc(p.x, p.y, r, 0.0, std::f64::consts::TAU);
}
