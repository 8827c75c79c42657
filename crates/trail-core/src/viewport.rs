//! Camera state and navigation limits for the site map.
//!
//! Positions are projected with spherical Web-Mercator; at zoom `z` the world
//! is `TILE_SIZE_PX * 2^z` pixels wide. The controller only owns the target
//! camera; animating towards it is left to the frontend via [`Flight`].

use glam::DVec2;

use crate::config::SiteConfig;
use crate::constants::{DEFAULT_VIEWPORT_PX, TILE_SIZE_PX};
use crate::effect::Effect;
use crate::geo::{Boundary, BoundingBox, Coordinate};

const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

#[inline]
fn world_size(zoom: f64) -> f64 {
    TILE_SIZE_PX * zoom.exp2()
}

/// Project a coordinate to world pixels at `zoom`.
pub fn project(c: Coordinate, zoom: f64) -> DVec2 {
    let size = world_size(zoom);
    let lat = c.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let sin = lat.sin();
    let x = (c.lon + 180.0) / 360.0;
    let y = 0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI);
    DVec2::new(x * size, y * size)
}

/// Inverse of [`project`].
pub fn unproject(p: DVec2, zoom: f64) -> Coordinate {
    let size = world_size(zoom);
    let lon = p.x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * p.y / size);
    let lat = n.sinh().atan().to_degrees();
    Coordinate::new(lat, lon)
}

/// Largest whole zoom at which `bounds` fits in `viewport` minus `padding_px`
/// on every side.
pub fn fit_zoom(bounds: &BoundingBox, viewport: DVec2, padding_px: f64) -> f64 {
    let sw = project(bounds.south_west(), 0.0);
    let ne = project(bounds.north_east(), 0.0);
    let extent = DVec2::new((ne.x - sw.x).abs(), (sw.y - ne.y).abs());
    let avail = (viewport - DVec2::splat(2.0 * padding_px)).max(DVec2::ONE);
    if extent.x <= 0.0 || extent.y <= 0.0 {
        return f64::INFINITY;
    }
    (avail.x / extent.x).min(avail.y / extent.y).log2().floor()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Camera {
    /// Screen pixel position of `c` in a viewport of `viewport` pixels.
    pub fn to_screen(&self, c: Coordinate, viewport: DVec2) -> DVec2 {
        project(c, self.zoom) - project(self.center, self.zoom) + viewport * 0.5
    }

    pub fn from_screen(&self, px: DVec2, viewport: DVec2) -> Coordinate {
        unproject(
            px - viewport * 0.5 + project(self.center, self.zoom),
            self.zoom,
        )
    }

    /// Camera moved by a screen-space drag of `delta` pixels.
    pub fn panned_by(&self, delta: DVec2) -> Camera {
        let center = unproject(project(self.center, self.zoom) - delta, self.zoom);
        Camera {
            center,
            zoom: self.zoom,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    FlyTo {
        target: Camera,
        duration_sec: f64,
    },
    FitBounds {
        bounds: BoundingBox,
        target: Camera,
        duration_sec: f64,
    },
}

#[derive(Debug)]
pub struct ViewportController {
    boundary: Boundary,
    max_bounds: BoundingBox,
    min_zoom: f64,
    max_zoom: f64,
    fit_padding_px: f64,
    fly_duration_sec: f64,
    fit_duration_sec: f64,
    viewport_px: DVec2,
    camera: Camera,
}

impl ViewportController {
    pub fn new(boundary: Boundary, initial_center: Coordinate, config: &SiteConfig) -> Self {
        let max_bounds = boundary.bounding_box().pad(config.max_bounds_pad_ratio);
        let mut vc = Self {
            boundary,
            max_bounds,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            fit_padding_px: config.fit_padding_px,
            fly_duration_sec: config.fly_duration_sec,
            fit_duration_sec: config.fit_duration_sec,
            viewport_px: DVec2::from_array(DEFAULT_VIEWPORT_PX),
            camera: Camera {
                center: initial_center,
                zoom: config.initial_zoom,
            },
        };
        vc.camera = vc.clamp(vc.camera);
        vc
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// The boundary's box padded on every side; the center never leaves it.
    #[inline]
    pub fn max_bounds(&self) -> BoundingBox {
        self.max_bounds
    }

    #[inline]
    pub fn zoom_range(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    #[inline]
    pub fn viewport_px(&self) -> DVec2 {
        self.viewport_px
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_px = DVec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn clamp(&self, camera: Camera) -> Camera {
        let zoom = if camera.zoom.is_finite() {
            camera.zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.camera.zoom
        };
        let center = if camera.center.is_finite() {
            self.max_bounds.clamp(camera.center)
        } else {
            self.camera.center
        };
        Camera { center, zoom }
    }

    /// Frame the padded site box.
    pub fn recenter_to_boundary(&mut self, out: &mut Vec<Effect>) -> Camera {
        let bounds = self.max_bounds;
        let zoom = fit_zoom(&bounds, self.viewport_px, self.fit_padding_px);
        self.camera = self.clamp(Camera {
            center: bounds.center(),
            zoom,
        });
        log::debug!(
            "[viewport] fit bounds -> ({:.5}, {:.5}) z{}",
            self.camera.center.lat,
            self.camera.center.lon,
            self.camera.zoom
        );
        out.push(
            CameraCommand::FitBounds {
                bounds,
                target: self.camera,
                duration_sec: self.fit_duration_sec,
            }
            .into(),
        );
        self.camera
    }

    pub fn fly_to(&mut self, center: Coordinate, zoom: f64, out: &mut Vec<Effect>) -> Camera {
        self.camera = self.clamp(Camera { center, zoom });
        if self.camera.center != center {
            log::debug!(
                "[viewport] fly target ({:.5}, {:.5}) clamped into site bounds",
                center.lat,
                center.lon
            );
        }
        out.push(
            CameraCommand::FlyTo {
                target: self.camera,
                duration_sec: self.fly_duration_sec,
            }
            .into(),
        );
        self.camera
    }

    /// Immediate user pan; no animation is requested.
    pub fn pan_to(&mut self, center: Coordinate) -> Camera {
        self.camera = self.clamp(Camera {
            center,
            zoom: self.camera.zoom,
        });
        self.camera
    }

    pub fn zoom_by(&mut self, delta: f64) -> Camera {
        self.camera = self.clamp(Camera {
            center: self.camera.center,
            zoom: self.camera.zoom + delta,
        });
        self.camera
    }

    /// Take over a camera the host derived from what it is showing, e.g. a
    /// gesture applied mid-flight.
    pub fn set_camera(&mut self, camera: Camera) -> Camera {
        self.camera = self.clamp(camera);
        self.camera
    }
}

/// Eased camera animation between two resolved cameras.
#[derive(Clone, Copy, Debug)]
pub struct Flight {
    from: Camera,
    to: Camera,
    duration_sec: f64,
    elapsed_sec: f64,
}

impl Flight {
    pub fn new(from: Camera, to: Camera, duration_sec: f64) -> Self {
        Self {
            from,
            to,
            duration_sec: duration_sec.max(0.0),
            elapsed_sec: 0.0,
        }
    }

    #[inline]
    pub fn target(&self) -> Camera {
        self.to
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed_sec >= self.duration_sec
    }

    pub fn advance(&mut self, dt_sec: f64) -> Camera {
        self.elapsed_sec = (self.elapsed_sec + dt_sec.max(0.0)).min(self.duration_sec);
        if self.is_finished() {
            return self.to;
        }
        let t = ease_in_out_cubic(self.elapsed_sec / self.duration_sec);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Camera {
            center: Coordinate::new(
                lerp(self.from.center.lat, self.to.center.lat),
                lerp(self.from.center.lon, self.to.center.lon),
            ),
            zoom: lerp(self.from.zoom, self.to.zoom),
        }
    }
}

#[inline]
fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
