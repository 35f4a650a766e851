// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use tracing::{debug, trace};
use windtree_geometry::{ProbeRay, WindingResult, compute_winding};

use crate::highlight::{hide_all_shortcuts, show_shortcuts_under};
use crate::{
    Document, DocumentViewport, ExplainerConfig, FillMode, HighlightEvent, HighlightState, NodeId,
    OverlayItem, Readout, SegmentRef, Surface, ToggleChange, Toggles, Transition, apply_entry,
    apply_exit, resolve_segment_set,
};

/// Everything one pointer move computed.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeOutcome {
    /// Pointer position in document coordinates.
    pub local: Point,
    /// The probe ray that was cast.
    pub ray: ProbeRay,
    /// Base winding the readout started from.
    pub seed: i64,
    /// Crossings of the resolved segment set.
    pub winding: WindingResult<SegmentRef>,
    /// The readout that was shown.
    pub readout: Readout,
}

/// Event handlers of the explainer, bound to one loaded document.
///
/// Every handler runs to completion against the [`Surface`] it is given.
/// The explainer owns the only mutable state: the highlight slot, the
/// toggles and the fill mode.
#[derive(Clone, Debug)]
pub struct Explainer {
    document: Document,
    config: ExplainerConfig,
    viewport: DocumentViewport,
    highlight: HighlightState,
    toggles: Toggles,
    fill_mode: FillMode,
}

impl Explainer {
    /// Binds `document` with device and document coordinates coinciding.
    #[must_use]
    pub fn new(document: Document, config: ExplainerConfig) -> Self {
        let viewport = DocumentViewport::identity(document.view_box());
        Self {
            document,
            config,
            viewport,
            highlight: HighlightState::Idle,
            toggles: Toggles::empty(),
            fill_mode: FillMode::None,
        }
    }

    /// Replaces the screen transform.
    #[must_use]
    pub fn with_viewport(mut self, viewport: DocumentViewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Brings `surface` in line with the initial state: idle, every toggle
    /// unchecked and the original paths unfilled.
    pub fn init(&mut self, surface: &mut impl Surface) {
        self.highlight = HighlightState::Idle;
        self.toggles = Toggles::empty();
        self.fill_mode = FillMode::None;
        apply_exit(&self.document, surface);
        for toggle in Toggles::INDIVIDUAL {
            if let Some(rule) = toggle.class_rule() {
                surface.apply_class_rule(rule, rule.enabled(false));
            }
        }
        surface.set_original_fill(self.fill_mode.fill(false));
    }

    /// The bound document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Active tunables.
    #[must_use]
    pub fn config(&self) -> &ExplainerConfig {
        &self.config
    }

    /// Current screen transform.
    #[must_use]
    pub fn viewport(&self) -> &DocumentViewport {
        &self.viewport
    }

    /// Mutable access to the screen transform, for resizes.
    pub fn viewport_mut(&mut self) -> &mut DocumentViewport {
        &mut self.viewport
    }

    /// Current highlight state.
    #[must_use]
    pub fn highlight(&self) -> HighlightState {
        self.highlight
    }

    /// Checked toggles.
    #[must_use]
    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    /// Current fill mode of the original paths.
    #[must_use]
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    /// The pointer entered `node`'s hit region.
    ///
    /// The previous node, if any, is dimmed in the same call.
    pub fn node_enter(&mut self, node: NodeId, surface: &mut impl Surface) -> Transition {
        let transition = self.highlight.handle(HighlightEvent::Enter(node));
        apply_entry(&self.document, node, self.toggles, &self.config, surface);
        transition
    }

    /// Hit-tests `device` against the node rectangles and enters the deepest
    /// node found. Returns `None`, leaving the state untouched, when no node
    /// covers the point.
    pub fn hover_at(&mut self, device: Point, surface: &mut impl Surface) -> Option<Transition> {
        let local = self.viewport.device_to_local(device);
        let node = self.document.node_at(local)?;
        Some(self.node_enter(node, surface))
    }

    /// The pointer left the drawing.
    pub fn pointer_leave(&mut self, surface: &mut impl Surface) -> Transition {
        let transition = self.highlight.handle(HighlightEvent::LeaveDrawing);
        apply_exit(&self.document, surface);
        transition
    }

    /// Probes the winding number under the pointer and repaints the overlay.
    ///
    /// `device` is in screen space. The overlay is rebuilt from scratch, so
    /// each move fully replaces what the previous one drew.
    pub fn pointer_move(&mut self, device: Point, surface: &mut impl Surface) -> ProbeOutcome {
        let local = self.viewport.device_to_local(device);
        let ray = ProbeRay::new(local, self.config.probe_far_x);
        let radius = self.config.marker_radius;

        surface.clear_overlay();
        surface.append_overlay(OverlayItem::ProbeOrigin {
            center: local,
            radius,
        });
        surface.append_overlay(OverlayItem::ProbeRay(ray.line()));

        let set = resolve_segment_set(&self.document, self.highlight, self.toggles);
        let winding = compute_winding(&ray, set);
        for marker in &winding.markers {
            surface.append_overlay(OverlayItem::Marker {
                center: marker.point,
                radius,
            });
        }

        let seed = match self.highlight.active() {
            Some(node) if self.toggles.contains(Toggles::WINDING_NUMBERS) => {
                self.document.node(node).base_winding()
            }
            _ => 0,
        };
        let readout = Readout {
            value: seed + winding.winding_number,
            device_y: device.y,
            offset_em: self.config.readout_offset_em,
        };
        surface.set_readout(Some(readout));
        trace!(?local, seed, value = readout.value, "probe");

        ProbeOutcome {
            local,
            ray,
            seed,
            winding,
            readout,
        }
    }

    /// Sets a single toggle and runs its change handler.
    ///
    /// `toggle` may name several flags; each is handled in control order.
    pub fn set_toggle(&mut self, toggle: Toggles, checked: bool, surface: &mut impl Surface) {
        for single in Toggles::INDIVIDUAL {
            if toggle.contains(single) {
                self.toggles.set(single, checked);
                self.on_toggle(
                    ToggleChange {
                        toggle: single,
                        checked,
                    },
                    surface,
                );
            }
        }
    }

    /// The master toggle: fans `checked` out to every individual toggle.
    pub fn set_all_toggles(&mut self, checked: bool, surface: &mut impl Surface) {
        for change in self.toggles.set_all(checked) {
            self.on_toggle(change, surface);
        }
    }

    /// Changes how the original paths are filled.
    pub fn set_fill_mode(&mut self, mode: FillMode, surface: &mut impl Surface) {
        self.fill_mode = mode;
        surface.set_original_fill(mode.fill(self.toggles.contains(Toggles::TREE)));
    }

    fn on_toggle(&mut self, change: ToggleChange, surface: &mut impl Surface) {
        debug!(toggle = ?change.toggle, checked = change.checked, "toggle changed");
        if let Some(rule) = change.toggle.class_rule() {
            surface.apply_class_rule(rule, rule.enabled(change.checked));
        }
        if change.toggle == Toggles::TREE {
            surface.set_original_fill(self.fill_mode.fill(change.checked));
        }
        if change.toggle == Toggles::SHORTCUTS {
            if let Some(node) = self.highlight.active() {
                hide_all_shortcuts(&self.document, surface);
                if change.checked {
                    show_shortcuts_under(&self.document, node, surface);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentBuilder, MemorySurface, NodeSpec, OriginalFill};
    use kurbo::Rect;

    fn explainer() -> Explainer {
        let mut b = DocumentBuilder::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        b.segment("s1", ["M 50 0 L 50 100"]).unwrap();
        b.node(NodeSpec {
            name: Some("n".into()),
            segments: vec!["s1".into()],
            base_winding: 3,
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            ..NodeSpec::default()
        })
        .unwrap();
        Explainer::new(b.finish().unwrap(), ExplainerConfig::default())
    }

    #[test]
    fn init_hides_everything_toggled() {
        let mut ex = explainer();
        let mut surface = MemorySurface::default();
        ex.init(&mut surface);
        let tree = Toggles::TREE.class_rule().unwrap();
        let arrows = Toggles::ARROWHEADS.class_rule().unwrap();
        assert_eq!(surface.class_enabled(tree), Some(true));
        assert_eq!(surface.class_enabled(arrows), Some(false));
        assert_eq!(surface.original_fill(), OriginalFill::None);
    }

    #[test]
    fn seed_applies_only_while_active_with_toggle() {
        let mut ex = explainer();
        let mut surface = MemorySurface::default();
        let p = Point::new(10.0, 50.0);
        assert_eq!(ex.pointer_move(p, &mut surface).seed, 0);

        ex.set_toggle(Toggles::WINDING_NUMBERS, true, &mut surface);
        assert_eq!(ex.pointer_move(p, &mut surface).seed, 0);

        ex.hover_at(p, &mut surface).unwrap();
        let outcome = ex.pointer_move(p, &mut surface);
        assert_eq!(outcome.seed, 3);
        assert_eq!(outcome.readout.value, 3 + outcome.winding.winding_number);
        assert_eq!(outcome.winding.winding_number.abs(), 1);
    }

    #[test]
    fn fill_mode_tracks_tree_toggle() {
        let mut ex = explainer();
        let mut surface = MemorySurface::default();
        ex.set_fill_mode(FillMode::NonZero, &mut surface);
        assert_eq!(
            surface.original_fill(),
            OriginalFill::Filled {
                rule: "nonzero",
                color: "black"
            }
        );
        ex.set_toggle(Toggles::TREE, true, &mut surface);
        assert_eq!(
            surface.original_fill(),
            OriginalFill::Filled {
                rule: "nonzero",
                color: "#eee"
            }
        );
    }

    #[test]
    fn hover_outside_every_node_keeps_state() {
        let mut ex = explainer();
        let mut surface = MemorySurface::default();
        assert!(ex.hover_at(Point::new(150.0, 50.0), &mut surface).is_none());
        assert_eq!(ex.highlight(), HighlightState::Idle);
    }
}
