//! Resolved drawing data for the site map.
//!
//! A [`MapScene`] is everything a renderer needs for one frame. The renderer
//! projects and paints it; it never decides what is shown.

use crate::catalog::{Catalog, MarkerIcon, Popup};
use crate::geo::Coordinate;
use crate::proximity::ProximityResult;
use crate::sampler::LiveFix;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub weight: f64,
    pub dash: Option<[f64; 2]>,
    pub fill: Option<Fill>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub vertices: &'static [Coordinate],
    pub closed: bool,
    pub stroke: Stroke,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Landmark,
    LivePosition,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneMarker {
    pub id: &'static str,
    pub label: &'static str,
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
    pub kind: MarkerKind,
    pub highlighted: bool,
}

pub const BOUNDARY_STROKE: Stroke = Stroke {
    color: "green",
    weight: 2.0,
    dash: None,
    fill: None,
};

pub const REWILDING_STROKE: Stroke = Stroke {
    color: "darkgreen",
    weight: 2.0,
    dash: None,
    fill: Some(Fill {
        color: "#3fbf3f",
        opacity: 0.1,
    }),
};

pub const PATH_STROKE: Stroke = Stroke {
    color: "#2c7be5",
    weight: 3.0,
    dash: Some([6.0, 6.0]),
    fill: None,
};

pub const LIVE_MARKER_ID: &str = "you-are-here";

#[derive(Clone, Debug, PartialEq)]
pub struct MapScene {
    pub boundary: Layer,
    pub rewilding: Layer,
    pub path: Layer,
    pub markers: Vec<SceneMarker>,
    pub live: Option<SceneMarker>,
}

impl MapScene {
    pub fn build(catalog: &Catalog, live_fix: Option<LiveFix>, proximity: &ProximityResult<'_>) -> Self {
        let highlighted = proximity.point.map(|p| p.id());
        let markers = catalog
            .landmarks
            .iter()
            .map(|l| SceneMarker {
                id: l.point.id,
                label: l.point.name,
                position: l.point.location,
                icon: l.icon,
                popup: l.popup,
                kind: MarkerKind::Landmark,
                highlighted: highlighted == Some(l.point.id),
            })
            .collect();
        let live = live_fix.map(|fix| SceneMarker {
            id: LIVE_MARKER_ID,
            label: "You are here",
            position: fix.location,
            icon: MarkerIcon::Pin,
            popup: None,
            kind: MarkerKind::LivePosition,
            highlighted: false,
        });

        Self {
            boundary: Layer {
                vertices: catalog.boundary,
                closed: true,
                stroke: BOUNDARY_STROKE,
            },
            rewilding: Layer {
                vertices: catalog.rewilding,
                closed: true,
                stroke: REWILDING_STROKE,
            },
            path: Layer {
                vertices: catalog.path,
                closed: false,
                stroke: PATH_STROKE,
            },
            markers,
            live,
        }
    }

    /// Layers in paint order.
    pub fn layers(&self) -> [&Layer; 3] {
        [&self.boundary, &self.rewilding, &self.path]
    }

    /// The topmost marker within `radius_px` of a screen point, live marker first.
    pub fn marker_at(
        &self,
        hit: impl Fn(Coordinate) -> f64,
        radius_px: f64,
    ) -> Option<&SceneMarker> {
        self.live
            .iter()
            .chain(self.markers.iter().rev())
            .map(|m| (m, hit(m.position)))
            .filter(|&(_, d)| d <= radius_px)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(m, _)| m)
    }
}
