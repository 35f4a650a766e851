// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=windtree_quadtree --heading-base-level=0

//! Windtree Quadtree: turns a plain SVG drawing into an annotated Windtree
//! document.
//!
//! The build has three stages:
//!
//! - [`split_paths`] cuts every input path into [`MonotonicSegment`]s, so each
//!   piece crosses any horizontal line at most once.
//! - [`QuadTree::build`] subdivides the `viewBox`, distributes the segments
//!   over the cells and derives a base winding number per cell.
//! - [`AnnotatedDrawing::to_document`] writes the result as SVG, in the format
//!   the Windtree explainer loads.
//!
//! Base winding numbers use the same crossing sign as the explainer's
//! winding engine (see [`windtree_geometry::crossing_sign`]). They are an
//! approximation: after a single split, a leaf's base winding plus the live
//! crossings of its own segments and shortcuts gives the winding number
//! inside it, but deeper trees can be off by the crossings of segments that
//! left the cell at an earlier level.
//!
//! ```rust
//! use windtree_quadtree::{BuildConfig, build};
//!
//! let input = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
//!   <path d="M 10 10 L 90 10 L 90 90 L 10 90 Z"/>
//! </svg>"#;
//! let drawing = build(input, &BuildConfig::default()).unwrap();
//! assert_eq!(drawing.segments().len(), 4);
//! assert_eq!(drawing.tree().leaves().count(), 4);
//! let svg = drawing.to_svg_string();
//! assert!(svg.contains(r#"class="treenode""#));
//! ```

mod config;
mod drawing;
mod error;
mod input;
mod split;
mod tree;

pub use config::BuildConfig;
pub use drawing::{AnnotatedDrawing, build};
pub use error::BuildError;
pub use split::{MonotonicSegment, split_paths};
pub use tree::{Cell, CellId, QuadTree};
