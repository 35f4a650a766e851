// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=windtree_geometry --heading-base-level=0

//! Windtree Geometry: path adapter and ray-cast winding engine.
//!
//! This crate holds the two geometric building blocks of the Windtree
//! explainer:
//!
//! - [`SegmentShape`]: wraps SVG path data (a `d` attribute) into a Kurbo
//!   [`BezPath`](kurbo::BezPath) and answers intersection queries against a
//!   line, a [`ProbeRay`], or another shape.
//! - [`compute_winding`]: casts a horizontal [`ProbeRay`] against a set of
//!   segment shapes and sums signed crossings into a winding number, together
//!   with one [`IntersectionPoint`] per crossing for marker rendering.
//!
//! ## Sign rule
//!
//! Crossings are not signed by the tangent at the hit. Each shape carries a
//! reference point, the first point of its first drawing command, and a
//! crossing counts `+1` when that point lies above the hit (smaller `y`, since
//! SVG `y` grows downward) and `-1` otherwise. See [`crossing_sign`]. Shapes
//! produced by the Windtree generator are monotonic, so this matches the
//! orientation of the crossing for those inputs; for arbitrary curves it is a
//! coarse approximation and results differ from the textbook rule.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use windtree_geometry::{ProbeRay, SegmentShape, compute_winding};
//!
//! // A square drawn as four separate monotonic edges.
//! let edges = [
//!     "M 10 10 L 20 10",
//!     "M 20 10 L 20 20",
//!     "M 20 20 L 10 20",
//!     "M 10 20 L 10 10",
//! ];
//! let shapes: Vec<SegmentShape> = edges
//!     .iter()
//!     .map(|d| SegmentShape::from_svg(d).unwrap())
//!     .collect();
//!
//! let inside = ProbeRay::new(Point::new(15.0, 15.0), 200.0);
//! let result = compute_winding(&inside, shapes.iter().enumerate());
//! assert_eq!(result.winding_number, 1);
//! assert_eq!(result.markers.len(), 1);
//!
//! let outside = ProbeRay::new(Point::new(5.0, 15.0), 200.0);
//! assert_eq!(compute_winding(&outside, shapes.iter().enumerate()).winding_number, 0);
//! ```
//!
//! ## Far boundary
//!
//! A [`ProbeRay`] is a finite segment ending at a fixed `far_x` sentinel.
//! Geometry beyond that coordinate is never crossed.

mod error;
mod ray;
mod shape;
mod view_box;
mod winding;

pub use error::GeometryError;
pub use ray::{DEFAULT_FAR_X, ProbeRay};
pub use shape::SegmentShape;
pub use view_box::parse_view_box;
pub use winding::{IntersectionPoint, WindingResult, compute_winding, crossing_sign};
