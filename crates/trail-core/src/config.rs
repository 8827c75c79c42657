use crate::constants::*;
use crate::narration::Voice;

/// Tunables for one site map instance.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub proximity_radius_m: f64,
    pub poll_interval_ms: u32,
    pub locate_timeout_ms: u32,
    pub max_bounds_pad_ratio: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub initial_zoom: f64,
    pub locate_zoom: f64,
    pub fly_duration_sec: f64,
    pub fit_duration_sec: f64,
    pub fit_padding_px: f64,
    pub voice: Voice,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            proximity_radius_m: PROXIMITY_RADIUS_M,
            poll_interval_ms: POLL_INTERVAL_MS,
            locate_timeout_ms: LOCATE_TIMEOUT_MS,
            max_bounds_pad_ratio: MAX_BOUNDS_PAD_RATIO,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            initial_zoom: INITIAL_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            fly_duration_sec: FLY_TO_DURATION_SEC,
            fit_duration_sec: FIT_BOUNDS_DURATION_SEC,
            fit_padding_px: FIT_PADDING_PX,
            voice: Voice::default(),
        }
    }
}

/// Which platform capabilities the host can provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub geolocation: bool,
    pub speech: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            geolocation: true,
            speech: true,
        }
    }
}
