// Host-side tests for the compiled-in site catalog.

use trail_core::*;

#[test]
fn site_catalog_is_valid() {
    let boundary = SITE.validate().expect("site catalog");
    assert_eq!(boundary.vertices().len(), 4);
    assert_eq!(SITE.points.len(), 5);
    assert_eq!(SITE.landmarks.len(), 7);
    assert_eq!(SITE.path.len(), 6);
}

#[test]
fn narrated_points_are_landmarks_inside_the_site() {
    let bbox = BoundingBox::from_coords(SITE.boundary).unwrap();
    for p in SITE.points {
        assert!(!p.narration.is_empty(), "{} has no narration", p.id());
        assert!(bbox.contains(p.location()), "{} lies outside the site", p.id());
        let landmark = SITE.landmarks.iter().find(|l| l.point.id == p.id());
        assert_eq!(landmark.map(|l| l.point.location), Some(p.location()));
    }
}

#[test]
fn well_lookup_by_id() {
    let well = SITE.point("well").expect("well");
    assert_eq!(well.name(), "Well");
    assert_eq!(well.location(), Coordinate::new(44.6256, -63.9224));
    assert!(SITE.point("dock").is_none(), "the dock is not narrated");
}

#[test]
fn narrated_points_are_far_apart_relative_to_the_radius() {
    for (i, a) in SITE.points.iter().enumerate() {
        for b in &SITE.points[i + 1..] {
            let d = distance_m(a.location(), b.location());
            assert!(d > 2.0 * constants::PROXIMITY_RADIUS_M, "{} / {}", a.id(), b.id());
        }
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    static DUP: [PointOfInterest; 2] = [
        PointOfInterest {
            point: GeoPoint {
                id: "a",
                name: "A",
                location: Coordinate::new(44.0, -63.0),
            },
            narration: "first",
        },
        PointOfInterest {
            point: GeoPoint {
                id: "a",
                name: "A again",
                location: Coordinate::new(44.001, -63.0),
            },
            narration: "second",
        },
    ];
    static BAD: Catalog = Catalog {
        points: &DUP,
        landmarks: &[],
        boundary: &[
            Coordinate::new(43.9, -63.1),
            Coordinate::new(43.9, -62.9),
            Coordinate::new(44.1, -62.9),
        ],
        rewilding: &[
            Coordinate::new(43.9, -63.1),
            Coordinate::new(43.9, -62.9),
            Coordinate::new(44.1, -62.9),
        ],
        path: &[],
        initial_center: Coordinate::new(44.0, -63.0),
    };
    assert_eq!(BAD.validate().unwrap_err(), CatalogError::DuplicateId("a"));
}
