// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover, probe and toggle behavior of the explainer over a loaded drawing.

use kurbo::{Point, Rect};
use windtree_explainer::{
    Document, DocumentViewport, Explainer, ExplainerConfig, HighlightState, MemorySurface,
    OverlayItem, Toggles, Transition,
};

// `outer` governs a vertical line at x = 40 and a horizontal line the probes
// never reach. `inner` covers the right half and governs the line at x = 70;
// it also carries a shortcut at x = 90.
const DRAWING: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <path class="original" d="M 40 0 L 40 100 L 70 100 L 70 0 Z"/>
  <g class="treenode" id="outer" segments="left top">
    <rect x="0" y="0" width="100" height="100"/>
    <text x="1" y="6" class="winding_number">5</text>
  </g>
  <g class="treenode" id="inner" parent="outer" segments="right">
    <rect x="50" y="0" width="50" height="100"/>
    <text x="51" y="6" class="winding_number">-1</text>
    <path class="shortcut firstHalf" d="M 90 0 L 90 50"/>
    <path class="shortcut" d="M 90 50 L 90 100"/>
  </g>
  <g class="segment" id="left">
    <g>
      <path class="firstHalf" d="M 40 0 L 40 50"/>
      <path d="M 40 50 L 40 100"/>
    </g>
  </g>
  <g class="segment" id="top">
    <g><path class="firstHalf" d="M 60 20 L 80 20"/></g>
  </g>
  <g class="segment" id="right">
    <g>
      <path class="firstHalf" d="M 70 100 L 70 70"/>
      <path d="M 70 70 L 70 0"/>
    </g>
  </g>
</svg>"##;

fn setup() -> (Explainer, MemorySurface) {
    let doc = Document::from_svg_str(DRAWING).unwrap();
    let mut surface = MemorySurface::default();
    let mut explainer = Explainer::new(doc, ExplainerConfig::default());
    explainer.init(&mut surface);
    (explainer, surface)
}

const LEFT_OF_ALL: Point = Point::new(10.0, 40.0);
const IN_INNER: Point = Point::new(55.0, 40.0);

#[test]
fn idle_probe_counts_every_segment() {
    let (mut ex, mut surface) = setup();
    let outcome = ex.pointer_move(LEFT_OF_ALL, &mut surface);
    // Downward at x = 40, upward at x = 70.
    assert_eq!(outcome.winding.winding_number, 0);
    assert_eq!(outcome.winding.markers.len(), 2);
    assert_eq!(surface.markers().count(), 2);
    assert_eq!(surface.readout().unwrap().value, 0);
}

#[test]
fn active_probe_counts_only_governed_segments() {
    let (mut ex, mut surface) = setup();
    let outer = ex.document().node_by_name("outer").unwrap();
    ex.node_enter(outer, &mut surface);

    let outcome = ex.pointer_move(LEFT_OF_ALL, &mut surface);
    assert_eq!(outcome.winding.winding_number.abs(), 1);
    assert_eq!(outcome.winding.markers.len(), 1);
    assert!((outcome.winding.markers[0].point - Point::new(40.0, 40.0)).hypot() < 1e-9);

    let overlay = surface.overlay();
    assert_eq!(overlay.len(), 3);
    assert!(matches!(overlay[0], OverlayItem::ProbeOrigin { center, .. } if center == LEFT_OF_ALL));
    assert!(matches!(overlay[1], OverlayItem::ProbeRay(line) if line.p1.x == 200.0));
}

#[test]
fn moving_between_nodes_swaps_highlight_in_one_step() {
    let (mut ex, mut surface) = setup();
    let doc = ex.document().clone();
    let outer = doc.node_by_name("outer").unwrap();
    let inner = doc.node_by_name("inner").unwrap();
    let seg = |n: &str| doc.segment_by_name(n).unwrap();

    ex.node_enter(outer, &mut surface);
    let t = ex.node_enter(inner, &mut surface);
    assert_eq!(
        t,
        Transition::Activated {
            previous: Some(outer),
            node: inner
        }
    );
    assert_eq!(ex.highlight(), HighlightState::Active(inner));
    assert_eq!(surface.node_opacity(outer), 0.1);
    assert_eq!(surface.node_opacity(inner), 1.0);
    assert_eq!(surface.segment_opacity(seg("left")), 0.1);
    assert_eq!(surface.segment_opacity(seg("top")), 0.1);
    assert_eq!(surface.segment_opacity(seg("right")), 1.0);
}

#[test]
fn hover_picks_deepest_node() {
    let (mut ex, mut surface) = setup();
    let inner = ex.document().node_by_name("inner").unwrap();
    ex.hover_at(IN_INNER, &mut surface).unwrap();
    assert_eq!(ex.highlight().active(), Some(inner));
}

#[test]
fn leave_restores_everything_and_is_idempotent() {
    let (mut ex, mut surface) = setup();
    let inner = ex.document().node_by_name("inner").unwrap();
    ex.set_toggle(Toggles::SHORTCUTS, true, &mut surface);
    ex.node_enter(inner, &mut surface);
    ex.pointer_move(IN_INNER, &mut surface);
    assert!(surface.shortcuts_visible(inner));

    for _ in 0..2 {
        ex.pointer_leave(&mut surface);
        assert_eq!(ex.highlight(), HighlightState::Idle);
        assert!(surface.overlay().is_empty());
        assert!(surface.readout().is_none());
        assert!(!surface.shortcuts_visible(inner));
        for id in ex.document().segment_ids() {
            assert_eq!(surface.segment_opacity(id), 1.0);
        }
        for id in ex.document().node_ids() {
            assert_eq!(surface.node_opacity(id), 1.0);
        }
    }
}

#[test]
fn shortcuts_toggle_affects_visibility_now_and_count_next_move() {
    let (mut ex, mut surface) = setup();
    let inner = ex.document().node_by_name("inner").unwrap();
    ex.set_toggle(Toggles::SHORTCUTS | Toggles::TREE, true, &mut surface);
    ex.node_enter(inner, &mut surface);
    assert!(surface.shortcuts_visible(inner));

    // Upward at x = 70 cancels the downward shortcut at x = 90.
    let with = ex.pointer_move(IN_INNER, &mut surface);
    assert_eq!(with.winding.winding_number, 0);
    assert_eq!(with.winding.markers.len(), 2);

    ex.set_toggle(Toggles::SHORTCUTS, false, &mut surface);
    assert!(!surface.shortcuts_visible(inner));
    let without = ex.pointer_move(IN_INNER, &mut surface);
    assert_eq!(without.winding.winding_number, -1);
    assert_eq!(without.winding.markers.len(), 1);
}

#[test]
fn shortcuts_need_the_tree_to_count() {
    let (mut ex, mut surface) = setup();
    let inner = ex.document().node_by_name("inner").unwrap();
    ex.set_toggle(Toggles::SHORTCUTS, true, &mut surface);
    ex.node_enter(inner, &mut surface);
    assert_eq!(ex.pointer_move(IN_INNER, &mut surface).winding.markers.len(), 1);
}

#[test]
fn shortcuts_of_nodes_nested_in_markup_count_for_the_enclosing_node() {
    let content = r#"<svg viewBox="0 0 100 100">
  <g class="treenode" id="outer" segments="">
    <rect x="0" y="0" width="100" height="100"/>
    <text class="winding_number">0</text>
    <g class="treenode" id="inner" segments="">
      <rect x="50" y="0" width="50" height="100"/>
      <text class="winding_number">0</text>
      <path class="shortcut" d="M 90 0 L 90 50"/>
    </g>
  </g>
</svg>"#;
    let doc = Document::from_svg_str(content).unwrap();
    let mut surface = MemorySurface::default();
    let mut ex = Explainer::new(doc, ExplainerConfig::default());
    ex.init(&mut surface);
    let outer = ex.document().node_by_name("outer").unwrap();
    ex.set_toggle(Toggles::SHORTCUTS | Toggles::TREE, true, &mut surface);
    ex.node_enter(outer, &mut surface);

    let outcome = ex.pointer_move(LEFT_OF_ALL, &mut surface);
    assert_eq!(outcome.winding.markers.len(), 1);
    assert_eq!(outcome.winding.winding_number, 1);
}

#[test]
fn master_toggle_fans_out_both_ways() {
    let (mut ex, mut surface) = setup();
    let tree = Toggles::TREE.class_rule().unwrap();
    let arrows = Toggles::ARROWHEADS.class_rule().unwrap();
    let boxes = Toggles::BOUNDING_BOX.class_rule().unwrap();

    ex.set_all_toggles(true, &mut surface);
    assert_eq!(ex.toggles(), Toggles::all());
    assert_eq!(surface.class_enabled(tree), Some(false));
    assert_eq!(surface.class_enabled(arrows), Some(true));
    assert_eq!(surface.class_enabled(boxes), Some(false));

    ex.set_all_toggles(false, &mut surface);
    assert_eq!(ex.toggles(), Toggles::empty());
    assert_eq!(surface.class_enabled(tree), Some(true));
    assert_eq!(surface.class_enabled(arrows), Some(false));
    assert_eq!(surface.class_enabled(boxes), Some(true));
}

#[test]
fn seed_mode_adds_base_winding() {
    let (mut ex, mut surface) = setup();
    let outer = ex.document().node_by_name("outer").unwrap();
    ex.set_toggle(Toggles::WINDING_NUMBERS, true, &mut surface);
    ex.node_enter(outer, &mut surface);
    let outcome = ex.pointer_move(LEFT_OF_ALL, &mut surface);
    assert_eq!(outcome.seed, 5);
    assert_eq!(outcome.readout.value, 5 + outcome.winding.winding_number);
    assert_eq!(surface.readout(), Some(outcome.readout));
}

#[test]
fn device_coordinates_go_through_the_viewport() {
    let doc = Document::from_svg_str(DRAWING).unwrap();
    let view_box = doc.view_box();
    let mut surface = MemorySurface::default();
    let mut ex = Explainer::new(doc, ExplainerConfig::default())
        .with_viewport(DocumentViewport::new(Rect::new(0.0, 0.0, 200.0, 200.0), view_box));
    ex.init(&mut surface);

    let outcome = ex.pointer_move(Point::new(20.0, 80.0), &mut surface);
    assert!((outcome.local - LEFT_OF_ALL).hypot() < 1e-9);
    assert_eq!(outcome.readout.device_y, 80.0);
    assert_eq!(outcome.readout.offset_em, 0.7);
}
