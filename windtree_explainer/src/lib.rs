// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=windtree_explainer --heading-base-level=0

//! Windtree Explainer: headless hover highlighting and winding probes over a
//! Windtree path-tree document.
//!
//! A Windtree document is an SVG drawing produced by the Windtree generator.
//! It holds the input paths split into monotonic *segments* and a quadtree of
//! *nodes*, each governing some segments and annotated with a base winding
//! number and optional *shortcuts*. This crate:
//!
//! - loads such a drawing into a [`Document`] ([`Document::from_svg_str`]) or
//!   builds one directly with [`DocumentBuilder`];
//! - tracks the hovered node with [`HighlightState`] and resolves which shapes
//!   count for a probe ([`resolve_segment_set`]);
//! - runs the pointer loop in [`Explainer`], painting through a host-provided
//!   [`Surface`].
//!
//! No rendering backend is bundled. [`MemorySurface`] records every change
//! and is what tests and the command line use.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use windtree_explainer::{
//!     DocumentBuilder, Explainer, ExplainerConfig, MemorySurface, NodeSpec, Toggles,
//! };
//!
//! let mut b = DocumentBuilder::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! b.segment("segment0", ["M 50 0 L 50 100"]).unwrap();
//! b.segment("segment1", ["M 80 100 L 80 0"]).unwrap();
//! b.node(NodeSpec {
//!     segments: vec!["segment0".into()],
//!     bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
//!     ..NodeSpec::default()
//! })
//! .unwrap();
//! let doc = b.finish().unwrap();
//!
//! let mut surface = MemorySurface::default();
//! let mut explainer = Explainer::new(doc, ExplainerConfig::default());
//! explainer.init(&mut surface);
//!
//! // Idle: both segments count and cancel out.
//! let idle = explainer.pointer_move(Point::new(10.0, 50.0), &mut surface);
//! assert_eq!(idle.winding.winding_number, 0);
//!
//! // Hovering the node restricts the probe to the segment it governs.
//! explainer.hover_at(Point::new(10.0, 50.0), &mut surface);
//! let active = explainer.pointer_move(Point::new(10.0, 50.0), &mut surface);
//! assert_eq!(active.winding.winding_number, 1);
//! assert_eq!(surface.markers().count(), 1);
//!
//! explainer.set_all_toggles(true, &mut surface);
//! assert_eq!(explainer.toggles(), Toggles::all());
//! ```

mod config;
mod document;
mod error;
mod explainer;
mod highlight;
mod load;
mod memory;
mod surface;
mod toggles;
mod viewport;

pub use config::ExplainerConfig;
pub use document::{
    Document, DocumentBuilder, NodeId, NodeSpec, PathSegment, SegmentId, SegmentRef, TreeNode,
};
pub use error::LoadError;
pub use explainer::{Explainer, ProbeOutcome};
pub use highlight::{
    HighlightEvent, HighlightState, Transition, apply_entry, apply_exit, resolve_segment_set,
};
pub use memory::MemorySurface;
pub use surface::{OverlayItem, Readout, Surface};
pub use toggles::{ClassRule, FillMode, OriginalFill, ToggleChange, Toggles};
pub use viewport::DocumentViewport;
