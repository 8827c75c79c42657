use smallvec::SmallVec;

use crate::constants::PROXIMITY_RADIUS_M;
use crate::geo::{distance_m, Coordinate, PointOfInterest};

/// Which narrated point, if any, the visitor is standing at.
///
/// `point` is only set when `distance_m` is within the proximity radius;
/// otherwise `distance_m` is NaN.
#[derive(Clone, Copy, Debug)]
pub struct ProximityResult<'a> {
    pub point: Option<&'a PointOfInterest>,
    pub distance_m: f64,
}

impl<'a> ProximityResult<'a> {
    pub const NONE: ProximityResult<'static> = ProximityResult {
        point: None,
        distance_m: f64::NAN,
    };

    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.point.is_some()
    }

    /// Text for the host's play affordance, e.g. `Play Audio — Well (1.4 m)`.
    pub fn play_label(&self) -> Option<String> {
        self.point
            .map(|p| format!("Play Audio — {} ({:.1} m)", p.name(), self.distance_m))
    }
}

/// Nearest point within [`PROXIMITY_RADIUS_M`] of `fix`.
pub fn resolve(fix: Coordinate, points: &[PointOfInterest]) -> ProximityResult<'_> {
    resolve_within(fix, points, PROXIMITY_RADIUS_M)
}

/// Nearest point within `radius_m` (inclusive). Ties keep the earlier
/// catalog entry. A linear scan; the catalog holds a handful of points.
pub fn resolve_within(
    fix: Coordinate,
    points: &[PointOfInterest],
    radius_m: f64,
) -> ProximityResult<'_> {
    let in_range: SmallVec<[(usize, f64); 8]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, distance_m(fix, p.location())))
        .filter(|&(_, d)| d <= radius_m)
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for &(i, d) in &in_range {
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }

    match best {
        Some((i, d)) => ProximityResult {
            point: Some(&points[i]),
            distance_m: d,
        },
        None => ProximityResult::NONE,
    }
}
