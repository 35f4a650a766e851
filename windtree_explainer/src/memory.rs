// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Surface`] for headless use and tests.

use hashbrown::HashMap;
use kurbo::Point;
use svg::node::element::{Circle, Group, Line as SvgLine};

use crate::{ClassRule, NodeId, OriginalFill, OverlayItem, Readout, SegmentId, Surface};

/// A [`Surface`] that records the latest state of every attribute it is asked
/// to change.
///
/// Elements never touched report their document defaults: full opacity and
/// visible shortcuts.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    segment_opacity: HashMap<SegmentId, f64>,
    node_opacity: HashMap<NodeId, f64>,
    shortcuts_visible: HashMap<NodeId, bool>,
    overlay: Vec<OverlayItem>,
    readout: Option<Readout>,
    classes: HashMap<(&'static str, &'static str), bool>,
    original_fill: OriginalFill,
}

impl MemorySurface {
    /// Current opacity of a segment.
    #[must_use]
    pub fn segment_opacity(&self, segment: SegmentId) -> f64 {
        self.segment_opacity.get(&segment).copied().unwrap_or(1.0)
    }

    /// Current opacity of a node.
    #[must_use]
    pub fn node_opacity(&self, node: NodeId) -> f64 {
        self.node_opacity.get(&node).copied().unwrap_or(1.0)
    }

    /// Whether the shortcuts drawn by `node` are visible.
    #[must_use]
    pub fn shortcuts_visible(&self, node: NodeId) -> bool {
        self.shortcuts_visible.get(&node).copied().unwrap_or(true)
    }

    /// Elements of the probe overlay, in insertion order.
    #[must_use]
    pub fn overlay(&self) -> &[OverlayItem] {
        &self.overlay
    }

    /// Centres of the crossing markers currently in the overlay.
    pub fn markers(&self) -> impl Iterator<Item = Point> + '_ {
        self.overlay.iter().filter_map(|item| match *item {
            OverlayItem::Marker { center, .. } => Some(center),
            _ => None,
        })
    }

    /// Current readout, if shown.
    #[must_use]
    pub fn readout(&self) -> Option<Readout> {
        self.readout
    }

    /// Whether a class rule's class is present, `None` if never applied.
    #[must_use]
    pub fn class_enabled(&self, rule: ClassRule) -> Option<bool> {
        self.classes.get(&(rule.selector, rule.class)).copied()
    }

    /// Paint of the original input paths.
    #[must_use]
    pub fn original_fill(&self) -> OriginalFill {
        self.original_fill
    }

    /// Renders the overlay layer as an SVG `<g id="winding">` fragment.
    #[must_use]
    pub fn overlay_markup(&self) -> String {
        let dot = |center: Point, radius: f64| {
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", radius)
                .set("fill", "red")
        };
        let mut group = Group::new()
            .set("id", "winding")
            .set("style", "pointer-events: none;");
        for item in &self.overlay {
            group = match *item {
                OverlayItem::ProbeOrigin { center, radius }
                | OverlayItem::Marker { center, radius } => group.add(dot(center, radius)),
                OverlayItem::ProbeRay(line) => group.add(
                    SvgLine::new()
                        .set("x1", line.p0.x)
                        .set("y1", line.p0.y)
                        .set("x2", line.p1.x)
                        .set("y2", line.p1.y)
                        .set("stroke", "red"),
                ),
            };
        }
        group.to_string()
    }
}

impl Surface for MemorySurface {
    fn set_segment_opacity(&mut self, segment: SegmentId, opacity: f64) {
        self.segment_opacity.insert(segment, opacity);
    }

    fn set_node_opacity(&mut self, node: NodeId, opacity: f64) {
        self.node_opacity.insert(node, opacity);
    }

    fn set_shortcuts_visible(&mut self, node: NodeId, visible: bool) {
        self.shortcuts_visible.insert(node, visible);
    }

    fn clear_overlay(&mut self) {
        self.overlay.clear();
    }

    fn append_overlay(&mut self, item: OverlayItem) {
        self.overlay.push(item);
    }

    fn set_readout(&mut self, readout: Option<Readout>) {
        self.readout = readout;
    }

    fn apply_class_rule(&mut self, rule: ClassRule, enabled: bool) {
        self.classes.insert((rule.selector, rule.class), enabled);
    }

    fn set_original_fill(&mut self, fill: OriginalFill) {
        self.original_fill = fill;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Line;

    #[test]
    fn overlay_markup_lists_items() {
        let mut surface = MemorySurface::default();
        surface.append_overlay(OverlayItem::ProbeRay(Line::new((1.0, 2.0), (200.0, 2.0))));
        surface.append_overlay(OverlayItem::Marker {
            center: Point::new(5.0, 2.0),
            radius: 2.0,
        });
        let markup = surface.overlay_markup();
        assert!(markup.starts_with("<g"));
        assert!(markup.contains(r#"id="winding""#));
        assert!(markup.contains("<line"));
        assert_eq!(markup.matches("<circle").count(), 1);

        surface.clear_overlay();
        assert_eq!(surface.markers().count(), 0);
        assert!(!surface.overlay_markup().contains("<circle"));
    }
}
