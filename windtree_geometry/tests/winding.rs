// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Winding behavior over closed loops made of monotonic pieces.

use kurbo::{Point, Rect};
use windtree_geometry::{ProbeRay, SegmentShape, compute_winding};

/// A clockwise (in screen space) square split into four edges.
fn square() -> Vec<SegmentShape> {
    [
        "M 10 10 L 90 10",
        "M 90 10 L 90 90",
        "M 90 90 L 10 90",
        "M 10 90 L 10 10",
    ]
    .iter()
    .map(|d| SegmentShape::from_svg(d).unwrap())
    .collect()
}

/// A circle-like loop of four monotonic cubic quarter arcs, counter-clockwise on screen.
fn blob() -> Vec<SegmentShape> {
    [
        "M 150 100 C 150 127.6 127.6 150 100 150",
        "M 100 150 C 72.4 150 50 127.6 50 100",
        "M 50 100 C 50 72.4 72.4 50 100 50",
        "M 100 50 C 127.6 50 150 72.4 150 100",
    ]
    .iter()
    .map(|d| SegmentShape::from_svg(d).unwrap())
    .collect()
}

fn winding_at(shapes: &[SegmentShape], p: Point, far_x: f64) -> i64 {
    compute_winding(&ProbeRay::new(p, far_x), shapes.iter().enumerate()).winding_number
}

#[test]
fn simple_loop_inside_has_unit_magnitude() {
    let sq = square();
    for p in [Point::new(50.0, 50.0), Point::new(11.0, 89.0), Point::new(89.5, 20.0)] {
        assert_eq!(winding_at(&sq, p, 200.0).abs(), 1, "inside point {p:?}");
    }
    let b = blob();
    assert_eq!(winding_at(&b, Point::new(100.0, 110.0), 300.0).abs(), 1);
    assert_eq!(winding_at(&b, Point::new(60.0, 90.0), 300.0).abs(), 1);
}

#[test]
fn simple_loop_outside_is_zero() {
    let sq = square();
    for p in [
        Point::new(0.0, 50.0),
        Point::new(95.0, 50.0),
        Point::new(50.0, 5.0),
        Point::new(50.0, 120.0),
    ] {
        assert_eq!(winding_at(&sq, p, 200.0), 0, "outside point {p:?}");
    }
    assert_eq!(winding_at(&blob(), Point::new(20.0, 105.0), 300.0), 0);
}

#[test]
fn orientation_flips_sign() {
    let reversed: Vec<SegmentShape> = [
        "M 10 10 L 10 90",
        "M 10 90 L 90 90",
        "M 90 90 L 90 10",
        "M 90 10 L 10 10",
    ]
    .iter()
    .map(|d| SegmentShape::from_svg(d).unwrap())
    .collect();
    let p = Point::new(50.0, 50.0);
    assert_eq!(winding_at(&square(), p, 200.0), -winding_at(&reversed, p, 200.0));
}

#[test]
fn extending_far_endpoint_past_bounds_is_stable() {
    let shapes: Vec<SegmentShape> = square().into_iter().chain(blob()).collect();
    let bounds = shapes
        .iter()
        .map(SegmentShape::bounding_box)
        .fold(Rect::ZERO, |acc, r| acc.union(r));
    let beyond = bounds.x1 + 1.0;
    for y in [15.0, 40.0, 75.0, 99.0, 140.0] {
        for x in [0.0, 30.0, 70.0, 120.0] {
            let p = Point::new(x, y);
            let base = winding_at(&shapes, p, beyond);
            for far in [beyond * 2.0, beyond * 10.0, 1.0e6] {
                assert_eq!(winding_at(&shapes, p, far), base, "point {p:?} far {far}");
            }
        }
    }
}

#[test]
fn one_marker_per_crossing() {
    let sq = square();
    let result = compute_winding(
        &ProbeRay::new(Point::new(0.0, 50.0), 200.0),
        sq.iter().enumerate(),
    );
    assert_eq!(result.markers.len(), 2);
    let sources: Vec<usize> = result.markers.iter().map(|m| m.source).collect();
    assert_eq!(sources, vec![1, 3]);
    assert!(result.markers.iter().all(|m| (m.point.y - 50.0).abs() < 1e-9));
}
