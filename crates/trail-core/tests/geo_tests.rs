// Host-side tests for distance and bounding-box geometry.

use trail_core::*;

fn well() -> Coordinate {
    Coordinate::new(44.6256, -63.9224)
}

#[test]
fn distance_is_zero_for_identical_points() {
    let samples = [
        well(),
        Coordinate::new(0.0, 0.0),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(89.9, 179.9),
    ];
    for c in samples {
        assert_eq!(distance_m(c, c), 0.0);
    }
}

#[test]
fn distance_is_symmetric() {
    let pts = [
        well(),
        Coordinate::new(44.626556, -63.923382),
        Coordinate::new(44.620807, -63.914325),
        Coordinate::new(48.2082, 16.3738),
        Coordinate::new(-12.0464, -77.0428),
    ];
    for &a in &pts {
        for &b in &pts {
            let ab = distance_m(a, b);
            let ba = distance_m(b, a);
            assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0), "{ab} vs {ba}");
        }
    }
}

#[test]
fn distance_matches_known_values() {
    // One degree of latitude on the mean sphere.
    let d = distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
    assert!((d - 111_194.93).abs() < 0.5, "got {d}");

    // Vienna to Bratislava, roughly 55 km.
    let d = distance_m(Coordinate::new(48.2082, 16.3738), Coordinate::new(48.1486, 17.1077));
    assert!(d > 50_000.0 && d < 60_000.0, "got {d}");
}

#[test]
fn trailhead_to_farmhouse_is_a_short_walk() {
    // The two first stops are ~21 m apart on the ground.
    let d = distance_m(
        Coordinate::new(44.626556, -63.923382),
        Coordinate::new(44.62643, -63.923172),
    );
    assert!(d > 15.0 && d < 30.0, "got {d}");
}

#[test]
fn destination_round_trips_through_distance() {
    for bearing in [0.0, 45.0, 90.0, 180.0, 270.0, 333.0] {
        for meters in [0.5, 2.999_999, 3.0, 25.0, 400.0] {
            let p = destination(well(), bearing, meters);
            let d = distance_m(well(), p);
            assert!((d - meters).abs() < 1e-6, "bearing {bearing}: {d} vs {meters}");
        }
    }
}

#[test]
fn bounding_box_pad_and_clamp() {
    let bbox = BoundingBox::from_coords(SITE.boundary).unwrap();
    assert_eq!(bbox.south, 44.6235);
    assert_eq!(bbox.north, 44.6277);
    assert_eq!(bbox.west, -63.9255);
    assert_eq!(bbox.east, -63.9185);

    let padded = bbox.pad(0.15);
    assert!((padded.south - (44.6235 - 0.0042 * 0.15)).abs() < 1e-9);
    assert!((padded.east - (-63.9185 + 0.0070 * 0.15)).abs() < 1e-9);
    assert!(padded.contains(bbox.center()));

    let outside = Coordinate::new(45.0, -63.0);
    let clamped = padded.clamp(outside);
    assert_eq!(clamped, padded.north_east());
    let inside = bbox.center();
    assert_eq!(padded.clamp(inside), inside);
}

#[test]
fn boundary_requires_three_vertices() {
    static TWO: [Coordinate; 2] = [Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)];
    let err = Boundary::new("two", &TWO).unwrap_err();
    assert_eq!(
        err,
        CatalogError::TooFewVertices {
            name: "two",
            count: 2
        }
    );
    assert!(Boundary::new("site", SITE.boundary).is_ok());
}
