// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path adapter: SVG path data wrapped for intersection queries.

use kurbo::{BezPath, Line, ParamCurve, PathEl, Point, Rect, Shape};
use smallvec::SmallVec;

use crate::{GeometryError, ProbeRay};

/// Flattening tolerance used when intersecting two curved shapes.
const FLATTEN_TOLERANCE: f64 = 0.05;

/// An immutable curve usable for intersection queries.
///
/// Built from SVG path data. The shape remembers its reference point, the
/// start of its first drawing command, which the winding engine uses to sign
/// every crossing with this shape.
#[derive(Clone, Debug)]
pub struct SegmentShape {
    path: BezPath,
    first_point: Point,
}

impl SegmentShape {
    /// Parses SVG path data into a shape.
    ///
    /// Fails on data Kurbo cannot parse and on paths without any drawing
    /// command, since such paths have no reference point.
    pub fn from_svg(data: &str) -> Result<Self, GeometryError> {
        let path = BezPath::from_svg(data).map_err(|source| GeometryError::InvalidPathData {
            data: data.to_owned(),
            source,
        })?;
        Self::from_path(path)
    }

    /// Wraps an existing path.
    pub fn from_path(path: BezPath) -> Result<Self, GeometryError> {
        let first_point = path
            .segments()
            .next()
            .map(|seg| seg.start())
            .ok_or(GeometryError::EmptyPath)?;
        Ok(Self { path, first_point })
    }

    /// The underlying path.
    #[must_use]
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Start point of the first drawing command.
    #[must_use]
    pub fn first_point(&self) -> Point {
        self.first_point
    }

    /// Tight bounding box of the path.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.path.bounding_box()
    }

    /// Intersection points with a line segment.
    ///
    /// Points come out in path order, and for each path segment in the order
    /// Kurbo reports them. A line through the joint of two path segments hits
    /// both of them.
    #[must_use]
    pub fn intersect_line(&self, line: Line) -> SmallVec<[Point; 4]> {
        let mut hits = SmallVec::new();
        for seg in self.path.segments() {
            for hit in seg.intersect_line(line) {
                hits.push(line.eval(hit.line_t));
            }
        }
        hits
    }

    /// Intersection points with a probe ray.
    #[must_use]
    pub fn intersect_ray(&self, ray: &ProbeRay) -> SmallVec<[Point; 4]> {
        self.intersect_line(ray.line())
    }

    /// Intersection points with another shape.
    ///
    /// `other` is flattened into line segments first, so hits against its
    /// curved parts are approximate. The order is deterministic: by
    /// flattened edge of `other`, then by segment of `self`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Vec<Point> {
        let mut hits = Vec::new();
        for edge in flatten_edges(&other.path) {
            hits.extend(self.intersect_line(edge));
        }
        hits
    }
}

fn flatten_edges(path: &BezPath) -> Vec<Line> {
    let mut edges = Vec::new();
    let mut subpath_start = Point::ZERO;
    let mut last = Point::ZERO;
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            subpath_start = p;
            last = p;
        }
        PathEl::LineTo(p) => {
            edges.push(Line::new(last, p));
            last = p;
        }
        PathEl::ClosePath => {
            if last != subpath_start {
                edges.push(Line::new(last, subpath_start));
            }
            last = subpath_start;
        }
        // Flattening only emits move, line and close elements.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-6
    }

    #[test]
    fn first_point_is_start_of_first_command() {
        let shape = SegmentShape::from_svg("M 4 5 C 10 0 20 0 30 5").unwrap();
        assert_eq!(shape.first_point(), Point::new(4.0, 5.0));
    }

    #[test]
    fn malformed_data_is_an_error() {
        let err = SegmentShape::from_svg("M 1 1 L nope").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidPathData { .. }));
    }

    #[test]
    fn move_only_path_is_empty() {
        let err = SegmentShape::from_svg("M 1 1").unwrap_err();
        assert!(matches!(err, GeometryError::EmptyPath));
    }

    #[test]
    fn vertical_line_hit_once() {
        let shape = SegmentShape::from_svg("M 10 0 L 10 20").unwrap();
        let hits = shape.intersect_line(Line::new((0.0, 5.0), (100.0, 5.0)));
        assert_eq!(hits.len(), 1);
        assert!(approx(hits[0], Point::new(10.0, 5.0)));
    }

    #[test]
    fn ray_stops_at_far_x() {
        let shape = SegmentShape::from_svg("M 250 0 L 250 20").unwrap();
        let ray = ProbeRay::new(Point::new(0.0, 10.0), 200.0);
        assert!(shape.intersect_ray(&ray).is_empty());
        assert_eq!(shape.intersect_ray(&ray.with_far_x(300.0)).len(), 1);
    }

    #[test]
    fn cubic_hit_lies_on_ray() {
        let shape = SegmentShape::from_svg("M 0 0 C 10 0 10 20 20 20").unwrap();
        let hits = shape.intersect_line(Line::new((-5.0, 10.0), (50.0, 10.0)));
        assert_eq!(hits.len(), 1);
        assert!((hits[0].y - 10.0).abs() < 1e-9);
        assert!((hits[0].x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn shape_shape_crossing() {
        let horizontal = SegmentShape::from_svg("M 0 5 L 10 5").unwrap();
        let vertical = SegmentShape::from_svg("M 5 0 L 5 10").unwrap();
        let hits = horizontal.intersect(&vertical);
        assert_eq!(hits.len(), 1);
        assert!(approx(hits[0], Point::new(5.0, 5.0)));
    }

    #[test]
    fn closed_other_contributes_closing_edge() {
        let probe = SegmentShape::from_svg("M -5 5 L 15 5").unwrap();
        let triangle = SegmentShape::from_svg("M 0 0 L 10 0 L 10 10 Z").unwrap();
        // Right edge and the closing diagonal.
        assert_eq!(probe.intersect(&triangle).len(), 2);
    }

    #[test]
    fn curved_other_is_flattened() {
        let horizontal = SegmentShape::from_svg("M -10 10 L 30 10").unwrap();
        let arch = SegmentShape::from_svg("M 0 20 Q 10 -10 20 20").unwrap();
        let hits = horizontal.intersect(&arch);
        assert_eq!(hits.len(), 2);
        for hit in hits {
            assert!((hit.y - 10.0).abs() < 1e-9);
            assert!(hit.x > 0.0 && hit.x < 20.0);
        }
    }
}
