use trail_core::{Popup, SiteMap, StatusMessage};
use web_sys as web;

use crate::dom;

const STATUS_ID: &str = "map-status";
const PLAY_ID: &str = "play-audio";
const STOP_ID: &str = "stop-audio";
const POPUP_ID: &str = "map-popup";

#[inline]
pub fn show_status(document: &web::Document, status: StatusMessage) {
    dom::set_text(document, STATUS_ID, status.text());
}

/// Play affordance only while a point is in range; stop only while speaking.
pub fn sync_controls(document: &web::Document, site: &SiteMap) {
    match site.proximity().play_label() {
        Some(label) => {
            dom::set_text(document, PLAY_ID, &label);
            dom::set_visible(document, PLAY_ID, true);
        }
        None => dom::set_visible(document, PLAY_ID, false),
    }
    dom::set_visible(document, STOP_ID, site.session().is_playing);

    if let Some(el) = document.get_element_by_id("map-canvas") {
        let highlighted = site.highlighted_point().map(|p| p.id()).unwrap_or("");
        _ = el.set_attribute("data-highlighted", highlighted);
    }
}

pub fn show_popup(document: &web::Document, popup: Option<Popup>) {
    match popup {
        Some(p) => {
            dom::set_text(document, "map-popup-title", p.title);
            dom::set_text(document, "map-popup-body", p.body);
            dom::set_visible(document, POPUP_ID, true);
        }
        None => dom::set_visible(document, POPUP_ID, false),
    }
}
