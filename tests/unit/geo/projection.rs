use super::*;

fn bbox() -> BoundingBox {
    BoundingBox::from_points([
        Coordinate::new(46.9, 7.4),
        Coordinate::new(47.4, 8.6),
        Coordinate::new(47.1, 8.0),
    ])
    .unwrap()
}

#[test]
fn bounding_box_tracks_extremes_and_ignores_nan() {
    let b = BoundingBox::from_points([
        Coordinate::new(1.0, 5.0),
        Coordinate::new(f64::NAN, 100.0),
        Coordinate::new(-2.0, 3.0),
    ])
    .unwrap();
    assert_eq!(b.min, Coordinate::new(-2.0, 3.0));
    assert_eq!(b.max, Coordinate::new(1.0, 5.0));
    assert!(BoundingBox::from_points(std::iter::empty()).is_none());
}

#[test]
fn origin_projects_to_zero() {
    let b = bbox();
    let proj = Projection::new(b, PIXELS_PER_DEGREE);
    let (w, h) = proj.extent();
    assert_eq!(proj.project(b.min, w, h), (0, 0));
}

#[test]
fn extent_uses_linear_longitude() {
    let proj = Projection::new(bbox(), PIXELS_PER_DEGREE);
    let (w, h) = proj.extent();
    assert!((11_999..=12_000).contains(&w), "width {w}");
    // 0.5 degrees of latitude near 47N stretch by ~1/cos(47) under the warp.
    assert!(h > 7_000 && h < 7_700, "height {h}");
}

#[test]
fn project_is_monotonic_in_longitude() {
    let b = bbox();
    let proj = Projection::new(b, PIXELS_PER_DEGREE);
    let (w, h) = proj.extent();
    let mut last = 0;
    for step in 0..=100 {
        let lon = b.min.lon + (b.max.lon - b.min.lon) * f64::from(step) / 100.0;
        let (x, _) = proj.project(Coordinate::new(47.2, lon), w, h);
        assert!(x >= last, "x went backwards at step {step}");
        last = x;
    }
}

#[test]
fn project_stays_within_bounds() {
    let b = bbox();
    let proj = Projection::new(b, PIXELS_PER_DEGREE);
    let (w, h) = proj.extent();
    for i in 0..=20 {
        for j in 0..=20 {
            let lat = b.min.lat + (b.max.lat - b.min.lat) * f64::from(i) / 20.0;
            let lon = b.min.lon + (b.max.lon - b.min.lon) * f64::from(j) / 20.0;
            let p = Coordinate::new(lat, lon);
            assert!(b.contains(p));
            let (x, y) = proj.project(p, w, h);
            assert!(x <= w && y <= h);
        }
    }
}

#[test]
fn project_clamps_outside_points() {
    let b = bbox();
    let proj = Projection::new(b, PIXELS_PER_DEGREE);
    assert_eq!(proj.project(Coordinate::new(40.0, 0.0), 100, 100), (0, 0));
    assert_eq!(proj.project(Coordinate::new(60.0, 20.0), 100, 100), (100, 100));
    assert_eq!(proj.project(Coordinate::new(f64::NAN, 8.0), 100, 100).1, 0);
}

#[test]
fn pole_clamps_to_the_north_edge() {
    let b = BoundingBox::from_points([Coordinate::new(80.0, 0.0), Coordinate::new(90.0, 1.0)])
        .unwrap();
    let proj = Projection::new(b, PIXELS_PER_DEGREE);
    let (w, h) = proj.extent();
    assert_eq!(w, 10_000);
    assert_eq!(h, u32::MAX);

    let near = proj.project(Coordinate::new(89.9, 0.1), w, h);
    let pole = proj.project(Coordinate::new(90.0, 0.1), w, h);
    assert!(near.1 > 0);
    assert_eq!(pole.1, h);
    assert!(pole.1 >= near.1);
    assert_eq!(proj.project(Coordinate::new(90.0, 0.1), 100, 50), (100, 50));
}
