// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point};

/// Default `x` coordinate of the probe ray's far endpoint, in document units.
pub const DEFAULT_FAR_X: f64 = 200.0;

/// A horizontal query ray anchored at a point in document coordinates.
///
/// The ray runs from [`origin`](Self::origin) to `(far_x, origin.y)`. It is a
/// finite segment: anything past `far_x` is invisible to intersection queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeRay {
    origin: Point,
    far_x: f64,
}

impl ProbeRay {
    /// Creates a ray from `origin` to the vertical line `x = far_x`.
    #[must_use]
    pub const fn new(origin: Point, far_x: f64) -> Self {
        Self { origin, far_x }
    }

    /// Returns the anchor point of the ray.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the `x` coordinate of the far endpoint.
    #[must_use]
    pub const fn far_x(&self) -> f64 {
        self.far_x
    }

    /// Returns the far endpoint.
    #[must_use]
    pub fn far_point(&self) -> Point {
        Point::new(self.far_x, self.origin.y)
    }

    /// Returns the same ray with its far endpoint moved to `far_x`.
    #[must_use]
    pub const fn with_far_x(self, far_x: f64) -> Self {
        Self { far_x, ..self }
    }

    /// Returns the ray as a Kurbo line segment.
    #[must_use]
    pub fn line(&self) -> Line {
        Line::new(self.origin, self.far_point())
    }
}

impl From<ProbeRay> for Line {
    fn from(ray: ProbeRay) -> Self {
        ray.line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_horizontal_and_ends_at_far_x() {
        let ray = ProbeRay::new(Point::new(3.0, 7.0), DEFAULT_FAR_X);
        let line = ray.line();
        assert_eq!(line.p0, Point::new(3.0, 7.0));
        assert_eq!(line.p1, Point::new(DEFAULT_FAR_X, 7.0));
    }

    #[test]
    fn with_far_x_keeps_origin() {
        let ray = ProbeRay::new(Point::new(1.0, 2.0), 10.0).with_far_x(50.0);
        assert_eq!(ray.origin(), Point::new(1.0, 2.0));
        assert_eq!(ray.far_x(), 50.0);
    }
}
