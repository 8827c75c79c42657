use std::rc::Rc;

use web_sys as web;

use crate::app::{self, App};
use crate::{dom, overlay};

/// Map buttons: locate, overview, play and stop.
pub fn wire_controls(app: &Rc<App>) {
    let document = app.document.clone();

    let a = app.clone();
    dom::add_click_listener(&document, "locate-btn", move || {
        log::info!("[controls] locate");
        app::update(&a, |site, out| {
            site.locate_me(out);
        });
    });

    let a = app.clone();
    dom::add_click_listener(&document, "overview-btn", move || {
        overlay::show_popup(&a.document, None);
        app::update(&a, |site, out| site.return_to_overview(out));
    });

    let a = app.clone();
    dom::add_click_listener(&document, "play-audio", move || {
        match app::update(&a, |site, out| site.play_nearest(out)) {
            Ok(Some(u)) => log::info!("[controls] narration {} requested", u),
            Ok(None) => log::debug!("[controls] play pressed with nothing in range"),
            Err(e) => log::warn!("[controls] narration unavailable: {}", e),
        }
    });

    let a = app.clone();
    dom::add_click_listener(&document, "stop-audio", move || {
        app::update(&a, |site, out| site.stop_narration(out));
    });

    let a = app.clone();
    dom::add_click_listener(&document, "map-popup-close", move || {
        overlay::show_popup(&a.document, None);
    });
}

/// Resize keeps the backing store and the viewport in step. `pagehide`
/// silences narration, and releases the timers and the poll only when the
/// page is really going away rather than into the back/forward cache.
pub fn wire_lifecycle(app: &Rc<App>) {
    let a = app.clone();
    dom::add_window_listener("resize", move || {
        dom::sync_canvas_backing_size(&a.canvas);
        let (w, h) = dom::css_size(&a.canvas);
        a.site.borrow_mut().set_viewport_size(w, h);
    });

    let a = app.clone();
    dom::add_window_event_listener("pagehide", move |e: web::PageTransitionEvent| {
        let persisted = e.persisted();
        app::update(&a, |site, out| site.on_page_hide(persisted, out));
    });
}
