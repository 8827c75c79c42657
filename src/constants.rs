/// Map surface drawing and interaction constants.
///
/// Site tunables (radius, intervals, zoom limits) live in `trail_core::constants`;
/// these only shape how the scene is painted and how the pointer drives it.

// Canvas background and north indicator
pub const BACKGROUND_COLOR: &str = "#eef3e8";
pub const NORTH_INDICATOR_COLOR: &str = "#1d2b1d";
pub const NORTH_INDICATOR_MARGIN_PX: f64 = 28.0;
pub const NORTH_INDICATOR_SIZE_PX: f64 = 14.0;

// Landmark markers
pub const MARKER_RADIUS_PX: f64 = 7.0;
pub const MARKER_COLOR: &str = "#c0392b";
pub const MARKER_OUTLINE_COLOR: &str = "#ffffff";
pub const HIGHLIGHT_COLOR: &str = "#f1c40f";
pub const HIGHLIGHT_RING_PX: f64 = 13.0;
pub const EMOJI_FONT: &str = "20px system-ui";

// Persistent labels, drawn under the marker
pub const LABEL_FONT: &str = "12px system-ui";
pub const LABEL_COLOR: &str = "#1d2b1d";
pub const LABEL_HALO_COLOR: &str = "rgba(255, 255, 255, 0.85)";
pub const LABEL_OFFSET_PX: f64 = 16.0;

// "You are here"
pub const LIVE_MARKER_COLOR: &str = "#2c7be5";
pub const LIVE_MARKER_RADIUS_PX: f64 = 8.0;
pub const LIVE_MARKER_HALO_PX: f64 = 16.0;
pub const LIVE_MARKER_HALO_ALPHA: f64 = 0.25;
// Tooltip sits above the halo
pub const LIVE_LABEL_OFFSET_PX: f64 = 20.0;

// Pointer interaction
pub const MARKER_HIT_RADIUS_PX: f64 = 18.0;
pub const CLICK_SLOP_PX: f64 = 4.0;
pub const WHEEL_NOTCH_PX: f64 = 100.0;
pub const WHEEL_ZOOM_STEP: f64 = 0.5;
pub const WHEEL_ZOOM_MAX_STEP: f64 = 1.0;
pub const KEY_PAN_PX: f64 = 80.0;

// Frame timing
pub const MAX_FRAME_DT_SEC: f64 = 0.1;
