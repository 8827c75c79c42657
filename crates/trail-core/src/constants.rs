// Shared site tuning used by both web and native frontends.

// Geodesy
pub const EARTH_RADIUS_M: f64 = 6_371_000.0; // mean spherical radius

// Proximity
pub const PROXIMITY_RADIUS_M: f64 = 3.0; // visitor must be standing at the marker

// Location sampling
pub const POLL_INTERVAL_MS: u32 = 15_000;
pub const LOCATE_TIMEOUT_MS: u32 = 8_000;

// Map navigation
pub const MAX_BOUNDS_PAD_RATIO: f64 = 0.15; // padding applied to the site box on every side
pub const MIN_ZOOM: f64 = 15.0;
pub const MAX_ZOOM: f64 = 19.0;
pub const INITIAL_ZOOM: f64 = 16.0;
pub const LOCATE_ZOOM: f64 = 18.0;
pub const FLY_TO_DURATION_SEC: f64 = 1.2;
pub const FIT_BOUNDS_DURATION_SEC: f64 = 1.0;
pub const FIT_PADDING_PX: f64 = 40.0;
pub const TILE_SIZE_PX: f64 = 256.0; // web-mercator world size at zoom 0
pub const DEFAULT_VIEWPORT_PX: [f64; 2] = [1024.0, 768.0];

// Narration voice
pub const SPEECH_LANG: &str = "en-CA";
pub const SPEECH_RATE: f32 = 1.0;
