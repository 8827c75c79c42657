//! The compiled-in site: narrated points, map landmarks, the navigable
//! boundary, the rewilding overlay and the walking path.

use fnv::FnvHashSet;

use crate::error::CatalogError;
use crate::geo::{Boundary, Coordinate, GeoPoint, PointOfInterest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerIcon {
    Pin,
    Emoji(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Popup {
    pub title: &'static str,
    pub body: &'static str,
}

/// A labelled marker drawn on the site map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub point: GeoPoint,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
}

#[derive(Debug)]
pub struct Catalog {
    pub points: &'static [PointOfInterest],
    pub landmarks: &'static [Landmark],
    pub boundary: &'static [Coordinate],
    pub rewilding: &'static [Coordinate],
    pub path: &'static [Coordinate],
    pub initial_center: Coordinate,
}

impl Catalog {
    /// Check the catalog's invariants and return the navigable boundary.
    pub fn validate(&self) -> Result<Boundary, CatalogError> {
        let boundary = Boundary::new("boundary", self.boundary)?;
        Boundary::new("rewilding", self.rewilding)?;

        let mut seen = FnvHashSet::default();
        for p in self.points {
            if !seen.insert(p.id()) {
                return Err(CatalogError::DuplicateId(p.id()));
            }
            if !p.location().is_finite() {
                return Err(CatalogError::NonFiniteCoordinate(p.id()));
            }
        }
        // Landmarks share ids with narrated points, so they get their own set.
        let mut seen = FnvHashSet::default();
        for l in self.landmarks {
            if !seen.insert(l.point.id) {
                return Err(CatalogError::DuplicateId(l.point.id));
            }
            if !l.point.location.is_finite() {
                return Err(CatalogError::NonFiniteCoordinate(l.point.id));
            }
        }
        Ok(boundary)
    }

    pub fn point(&self, id: &str) -> Option<&'static PointOfInterest> {
        self.points.iter().find(|p| p.id() == id)
    }
}

const DOCK: Coordinate = Coordinate::new(44.620807, -63.914325);
const BIRCH_FOREST: Coordinate = Coordinate::new(44.62464, -63.920329);
const LABYRINTH_ENTRANCE: Coordinate = Coordinate::new(44.624081, -63.919488);
const SITTING_AREA: Coordinate = Coordinate::new(44.62506, -63.921247);
const FARMHOUSE: Coordinate = Coordinate::new(44.62643, -63.923172);
const TRAILHEAD: Coordinate = Coordinate::new(44.626556, -63.923382);
const WELL: Coordinate = Coordinate::new(44.6256, -63.9224);

const fn geo(id: &'static str, name: &'static str, location: Coordinate) -> GeoPoint {
    GeoPoint { id, name, location }
}

static POINTS: [PointOfInterest; 5] = [
    PointOfInterest {
        point: geo("trailhead", "Trailhead", TRAILHEAD),
        narration: "You are at the trailhead. This path leads into the St. Margaret's Bay woodland, where visitors begin their walk through the conservation area.",
    },
    PointOfInterest {
        point: geo("farmhouse", "Farmhouse Foundation", FARMHOUSE),
        narration: "This is the farmhouse foundation. It is a remaining footprint of an early homestead and shows how people once lived and worked in this woodland area.",
    },
    PointOfInterest {
        point: geo("well", "Well", WELL),
        narration: "You are near the old well. It once provided fresh water for residents and visitors.",
    },
    PointOfInterest {
        point: geo("sittingArea", "Sitting Area", SITTING_AREA),
        narration: "This is a sitting area. People use this space to rest, listen to the forest, and observe wildlife.",
    },
    PointOfInterest {
        point: geo("yellowBirch", "Coastal Yellow Birch", BIRCH_FOREST),
        narration: "You are near a Coastal Yellow Birch. This species is important for local biodiversity.",
    },
];

static LANDMARKS: [Landmark; 7] = [
    Landmark {
        point: geo("dock", "Dock", DOCK),
        icon: MarkerIcon::Pin,
        popup: None,
    },
    Landmark {
        point: geo("trailhead", "Trailhead", TRAILHEAD),
        icon: MarkerIcon::Emoji("🚶"),
        popup: Some(Popup {
            title: "Trailhead",
            body: "Main entrance to the woodland trails.",
        }),
    },
    Landmark {
        point: geo("farmhouse", "Farmhouse Foundation", FARMHOUSE),
        icon: MarkerIcon::Emoji("🏠"),
        popup: Some(Popup {
            title: "Farmhouse Foundation",
            body: "The remains of an early farmhouse.",
        }),
    },
    Landmark {
        point: geo("well", "Well", WELL),
        icon: MarkerIcon::Emoji("💧"),
        popup: Some(Popup {
            title: "Well",
            body: "This old well supplied water to the area.",
        }),
    },
    Landmark {
        point: geo("sittingArea", "Sitting Area", SITTING_AREA),
        icon: MarkerIcon::Emoji("🪑"),
        popup: Some(Popup {
            title: "Sitting Area",
            body: "A quiet place to rest and observe nature.",
        }),
    },
    Landmark {
        point: geo("yellowBirch", "Coastal Yellow Birch", BIRCH_FOREST),
        icon: MarkerIcon::Emoji("🌳"),
        popup: Some(Popup {
            title: "Coastal Yellow Birch",
            body: "An important tree species for biodiversity.",
        }),
    },
    Landmark {
        point: geo("labyrinthEntrance", "Labyrinth Entrance", LABYRINTH_ENTRANCE),
        icon: MarkerIcon::Emoji("🧭"),
        popup: Some(Popup {
            title: "Labyrinth Entrance",
            body: "Entrance to the small woodland labyrinth.",
        }),
    },
];

static SITE_BOUNDS: [Coordinate; 4] = [
    Coordinate::new(44.6235, -63.9255),
    Coordinate::new(44.6235, -63.9185),
    Coordinate::new(44.6277, -63.9185),
    Coordinate::new(44.6277, -63.9255),
];

static REWILDING: [Coordinate; 4] = [
    Coordinate::new(44.6248, -63.9237),
    Coordinate::new(44.6248, -63.9204),
    Coordinate::new(44.6269, -63.9204),
    Coordinate::new(44.6269, -63.9237),
];

static PATH: [Coordinate; 6] = [
    TRAILHEAD,
    FARMHOUSE,
    WELL,
    SITTING_AREA,
    BIRCH_FOREST,
    LABYRINTH_ENTRANCE,
];

/// The woodland conservation site.
pub static SITE: Catalog = Catalog {
    points: &POINTS,
    landmarks: &LANDMARKS,
    boundary: &SITE_BOUNDS,
    rewilding: &REWILDING,
    path: &PATH,
    initial_center: Coordinate::new(44.6255, -63.9222),
};
