// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray-cast winding engine.

use kurbo::Point;
use tracing::trace;

use crate::{ProbeRay, SegmentShape};

/// A crossing between the probe ray and one segment shape.
///
/// `K` is the caller's key for the shape that was crossed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionPoint<K> {
    /// Crossing location in document coordinates.
    pub point: Point,
    /// Key of the crossed shape.
    pub source: K,
    /// Signed contribution of this crossing, `+1` or `-1`.
    pub sign: i64,
}

/// Output of [`compute_winding`].
#[derive(Clone, Debug, PartialEq)]
pub struct WindingResult<K> {
    /// Sum of the signed crossings.
    pub winding_number: i64,
    /// One entry per crossing, in the order the shapes were supplied.
    pub markers: Vec<IntersectionPoint<K>>,
}

impl<K> Default for WindingResult<K> {
    fn default() -> Self {
        Self {
            winding_number: 0,
            markers: Vec::new(),
        }
    }
}

/// Sign of a crossing at `hit` for a shape whose reference point is `reference`.
///
/// `+1` when the reference point lies strictly above the hit (smaller `y`),
/// `-1` otherwise, ties included.
#[must_use]
pub fn crossing_sign(reference: Point, hit: Point) -> i64 {
    if reference.y < hit.y { 1 } else { -1 }
}

/// Computes the winding number at `ray.origin()` against `segments`.
///
/// Every intersection of every supplied shape with `ray` is signed with
/// [`crossing_sign`] against that shape's [`first_point`](SegmentShape::first_point)
/// and summed. Shapes supplied twice are counted twice.
pub fn compute_winding<'a, K, I>(ray: &ProbeRay, segments: I) -> WindingResult<K>
where
    K: Copy,
    I: IntoIterator<Item = (K, &'a SegmentShape)>,
{
    let mut result = WindingResult::default();
    for (key, shape) in segments {
        let reference = shape.first_point();
        for point in shape.intersect_ray(ray) {
            let sign = crossing_sign(reference, point);
            result.winding_number += sign;
            result.markers.push(IntersectionPoint {
                point,
                source: key,
                sign,
            });
        }
    }
    trace!(
        origin = ?ray.origin(),
        far_x = ray.far_x(),
        winding_number = result.winding_number,
        crossings = result.markers.len(),
        "computed winding"
    );
    result
}
