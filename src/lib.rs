#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use trail_core::{Capabilities, Coordinate, SiteConfig, SiteMap, SITE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod constants;
mod dom;
mod events;
mod frame;
mod geolocation;
mod input;
mod overlay;
mod render;
mod speech;

use app::App;
use geolocation::Sensor;
use speech::Speech;

thread_local! {
    // Set once by `init`; read by the exported host API.
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&Rc<App>) -> R) -> Option<R> {
    let app = APP.with(|slot| slot.borrow().clone());
    app.as_ref().map(f)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("trail-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("map-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #map-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let sensor = Sensor::detect(&window);
    let speech = Speech::detect(&window);
    let caps = Capabilities {
        geolocation: sensor.is_supported(),
        speech: speech.is_supported(),
    };
    let mut site = SiteMap::new(&SITE, SiteConfig::default(), caps)?;
    let (w, h) = dom::css_size(&canvas);
    site.set_viewport_size(w, h);

    overlay::show_status(&document, site.status());

    let app = Rc::new(App::new(document, canvas, site, sensor, speech));
    overlay::sync_controls(&app.document, &app.site.borrow());
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    events::wire_controls(&app);
    events::wire_lifecycle(&app);
    events::wire_pointer_handlers(&app);
    events::wire_keyboard(&app);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        ctx,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

// ---------------- Host API ----------------

/// Fly the map to a coordinate at the current zoom.
#[wasm_bindgen]
pub fn center_map(lat: f64, lon: f64) {
    with_app(|app| app::update(app, |site, out| site.center_map(Coordinate::new(lat, lon), out)));
}

/// Id of the point of interest the visitor is standing at, if any.
#[wasm_bindgen]
pub fn highlighted_point() -> Option<String> {
    with_app(|app| {
        app.site
            .borrow()
            .highlighted_point()
            .map(|p| p.id().to_owned())
    })
    .flatten()
}

#[wasm_bindgen]
pub fn teardown() {
    with_app(|app| app::update(app, |site, out| site.teardown(out)));
}
