//! Georeferenced value types and spherical geodesy.
//!
//! Everything here is immutable and `Copy`; the site catalog is built from
//! these types as compile-time constants.

use crate::constants::EARTH_RADIUS_M;
use crate::error::CatalogError;

/// WGS84 latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub id: &'static str,
    pub name: &'static str,
    pub location: Coordinate,
}

/// A catalog point the visitor can have narrated when standing at it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOfInterest {
    pub point: GeoPoint,
    pub narration: &'static str,
}

impl PointOfInterest {
    #[inline]
    pub fn id(&self) -> &'static str {
        self.point.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.point.name
    }

    #[inline]
    pub fn location(&self) -> Coordinate {
        self.point.location
    }
}

/// Great-circle distance in meters (haversine, spherical earth).
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // h can creep past 1.0 for antipodal inputs
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Coordinate reached by travelling `meters` from `from` along the initial
/// bearing `bearing_deg` (clockwise from north).
pub fn destination(from: Coordinate, bearing_deg: f64, meters: f64) -> Coordinate {
    let delta = meters / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = from.lat.to_radians();
    let lambda1 = from.lon.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * sin_phi2;
    let lambda2 = lambda1 + y.atan2(x);

    Coordinate::new(phi2.to_degrees(), lambda2.to_degrees())
}

/// Axis-aligned lat/lon box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn from_coords(coords: &[Coordinate]) -> Option<Self> {
        let first = coords.first()?;
        let mut bbox = BoundingBox {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };
        for c in &coords[1..] {
            bbox.south = bbox.south.min(c.lat);
            bbox.north = bbox.north.max(c.lat);
            bbox.west = bbox.west.min(c.lon);
            bbox.east = bbox.east.max(c.lon);
        }
        Some(bbox)
    }

    /// Grow every side by `ratio` of the box's own height/width.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buf = (self.north - self.south).abs() * ratio;
        let lon_buf = (self.east - self.west).abs() * ratio;
        BoundingBox {
            south: self.south - lat_buf,
            west: self.west - lon_buf,
            north: self.north + lat_buf,
            east: self.east + lon_buf,
        }
    }

    #[inline]
    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.south, self.west)
    }

    #[inline]
    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.north, self.east)
    }

    #[inline]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.south && c.lat <= self.north && c.lon >= self.west && c.lon <= self.east
    }

    /// Nearest coordinate inside the box.
    #[inline]
    pub fn clamp(&self, c: Coordinate) -> Coordinate {
        Coordinate::new(
            c.lat.clamp(self.south, self.north),
            c.lon.clamp(self.west, self.east),
        )
    }
}

/// Closed polygon with at least three vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    vertices: &'static [Coordinate],
    bbox: BoundingBox,
}

impl Boundary {
    pub fn new(name: &'static str, vertices: &'static [Coordinate]) -> Result<Self, CatalogError> {
        if vertices.len() < 3 {
            return Err(CatalogError::TooFewVertices {
                name,
                count: vertices.len(),
            });
        }
        if !vertices.iter().all(Coordinate::is_finite) {
            return Err(CatalogError::NonFiniteCoordinate(name));
        }
        let bbox = BoundingBox::from_coords(vertices).ok_or(CatalogError::TooFewVertices {
            name,
            count: 0,
        })?;
        Ok(Self { vertices, bbox })
    }

    #[inline]
    pub fn vertices(&self) -> &'static [Coordinate] {
        self.vertices
    }

    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}
