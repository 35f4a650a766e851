// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cutting input paths into monotonic pieces.

use kurbo::{BezPath, Line, ParamCurve, ParamCurveExtrema, PathSeg, Point, Rect};

/// One monotonic piece of an input path.
///
/// Ids are unique across all input paths of a build.
#[derive(Clone, Debug, PartialEq)]
pub struct MonotonicSegment {
    id: usize,
    source: usize,
    seg: PathSeg,
}

impl MonotonicSegment {
    /// Global id, emitted as `segment{id}`.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Index of the input path this piece was cut from.
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// The piece itself.
    #[must_use]
    pub fn seg(&self) -> PathSeg {
        self.seg
    }

    /// Start and end point.
    #[must_use]
    pub fn endpoints(&self) -> (Point, Point) {
        (self.seg.start(), self.seg.end())
    }

    /// Tight bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        ParamCurveExtrema::bounding_box(&self.seg)
    }

    /// The two halves at `t = 0.5`.
    #[must_use]
    pub fn halves(&self) -> (PathSeg, PathSeg) {
        self.seg.subdivide()
    }

    /// Whether the piece meets `line` anywhere.
    #[must_use]
    pub fn crosses(&self, line: Line) -> bool {
        !self.seg.intersect_line(line).is_empty()
    }
}

/// Cuts every path into monotonic pieces and numbers them globally.
///
/// Lines are kept whole, quadratics are cut at their extrema and cubics at
/// their extrema and inflections. Cubic cut parameters closer than
/// `dedup_epsilon` are merged.
#[must_use]
pub fn split_paths(paths: &[BezPath], dedup_epsilon: f64) -> Vec<MonotonicSegment> {
    let mut out = Vec::new();
    for (source, path) in paths.iter().enumerate() {
        for seg in split_path(path, dedup_epsilon) {
            out.push(MonotonicSegment {
                id: out.len(),
                source,
                seg,
            });
        }
    }
    out
}

fn split_path(path: &BezPath, dedup_epsilon: f64) -> Vec<PathSeg> {
    let mut out = Vec::new();
    for seg in path.segments() {
        match seg {
            PathSeg::Line(_) => out.push(seg),
            PathSeg::Quad(quad) => out.extend(
                quad.extrema_ranges()
                    .into_iter()
                    .map(|range| PathSeg::Quad(quad.subsegment(range))),
            ),
            PathSeg::Cubic(cubic) => {
                let mut cuts = vec![0.0, 1.0];
                cuts.extend(
                    cubic
                        .extrema()
                        .into_iter()
                        .chain(cubic.inflections())
                        .filter(|t| *t > 0.0 && *t < 1.0),
                );
                cuts.sort_by(f64::total_cmp);
                cuts.dedup_by(|later, kept| (*later - *kept).abs() < dedup_epsilon);
                // A cut merged into the end must not shorten the curve.
                if let Some(last) = cuts.last_mut() {
                    *last = 1.0;
                }
                out.extend(
                    cuts.windows(2)
                        .map(|w| PathSeg::Cubic(cubic.subsegment(w[0]..w[1]))),
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(d: &str) -> BezPath {
        BezPath::from_svg(d).unwrap()
    }

    fn is_monotonic(seg: PathSeg) -> bool {
        let (a, b) = (seg.start(), seg.end());
        let bbox = ParamCurveExtrema::bounding_box(&seg);
        let tight = Rect::from_points(a, b);
        (bbox.x0 - tight.x0).abs() < 1e-6
            && (bbox.x1 - tight.x1).abs() < 1e-6
            && (bbox.y0 - tight.y0).abs() < 1e-6
            && (bbox.y1 - tight.y1).abs() < 1e-6
    }

    #[test]
    fn ids_are_global_across_paths() {
        let segs = split_paths(
            &[path("M 0 0 L 10 0 L 10 10"), path("M 20 20 L 30 20")],
            0.01,
        );
        assert_eq!(segs.len(), 3);
        assert_eq!(
            segs.iter().map(MonotonicSegment::id).collect::<Vec<_>>(),
            [0, 1, 2]
        );
        assert_eq!(segs[2].source(), 1);
    }

    #[test]
    fn closing_edge_becomes_a_segment() {
        let segs = split_paths(&[path("M 0 0 L 10 0 L 10 10 Z")], 0.01);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].endpoints(), (Point::new(10.0, 10.0), Point::ZERO));
    }

    #[test]
    fn quad_splits_at_extremum() {
        let segs = split_paths(&[path("M 0 0 Q 50 100 100 0")], 0.01);
        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(|s| is_monotonic(s.seg())));
        assert!((segs[0].endpoints().1 - Point::new(50.0, 50.0)).hypot() < 1e-9);
    }

    #[test]
    fn cubic_pieces_are_monotonic_and_contiguous() {
        // S-curve: two y extrema and an inflection.
        let segs = split_paths(&[path("M 0 50 C 30 -40 70 140 100 50")], 0.01);
        assert!(segs.len() >= 3);
        assert!(segs.iter().all(|s| is_monotonic(s.seg())));
        for pair in segs.windows(2) {
            assert!((pair[0].endpoints().1 - pair[1].endpoints().0).hypot() < 1e-9);
        }
        assert!((segs.last().unwrap().endpoints().1 - Point::new(100.0, 50.0)).hypot() < 1e-9);
    }

    #[test]
    fn halves_meet_in_the_middle() {
        let segs = split_paths(&[path("M 0 0 L 10 20")], 0.01);
        let (a, b) = segs[0].halves();
        assert_eq!(a.end(), Point::new(5.0, 10.0));
        assert_eq!(b.start(), Point::new(5.0, 10.0));
    }
}
