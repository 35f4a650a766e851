// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability interface onto the rendering surface.

use kurbo::{Line, Point};

use crate::{ClassRule, NodeId, OriginalFill, SegmentId};

/// One element of the probe overlay layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayItem {
    /// Dot at the probe origin.
    ProbeOrigin {
        /// Centre in document coordinates.
        center: Point,
        /// Radius in document units.
        radius: f64,
    },
    /// The probe ray itself.
    ProbeRay(Line),
    /// Dot marking one crossing.
    Marker {
        /// Centre in document coordinates.
        center: Point,
        /// Radius in document units.
        radius: f64,
    },
}

/// Numeric readout shown next to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    /// Displayed winding number.
    pub value: i64,
    /// Pointer `y` in device space; the readout is centred on it.
    pub device_y: f64,
    /// Upward shift in `em`, so the text's middle lines up with the pointer.
    pub offset_em: f64,
}

/// What the explainer needs from the host rendering surface.
///
/// A browser host maps these onto attribute and class changes of existing
/// elements; [`MemorySurface`](crate::MemorySurface) records them for tests
/// and headless use. Handlers call these methods synchronously and the host
/// presents the result only after the handler returns, so no intermediate
/// state is ever observable.
pub trait Surface {
    /// Sets the opacity of a segment's group.
    fn set_segment_opacity(&mut self, segment: SegmentId, opacity: f64);

    /// Sets the opacity of a tree node's group.
    fn set_node_opacity(&mut self, node: NodeId, opacity: f64);

    /// Shows or hides the shortcut pieces drawn by `node` itself.
    fn set_shortcuts_visible(&mut self, node: NodeId, visible: bool);

    /// Removes every element from the probe overlay layer.
    fn clear_overlay(&mut self);

    /// Appends one element to the probe overlay layer.
    fn append_overlay(&mut self, item: OverlayItem);

    /// Updates or clears the numeric readout.
    fn set_readout(&mut self, readout: Option<Readout>);

    /// Adds (`enabled`) or removes a class on all elements matched by `rule`.
    fn apply_class_rule(&mut self, rule: ClassRule, enabled: bool);

    /// Sets the paint of the original input paths.
    fn set_original_fill(&mut self, fill: OriginalFill);
}
