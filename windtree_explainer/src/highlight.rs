// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover highlight state machine.
//!
//! ## States
//!
//! - [`HighlightState::Idle`]: no node is hovered; every segment counts.
//! - [`HighlightState::Active`]: exactly one node is hovered; only its
//!   governed segments (plus, optionally, its shortcuts) count.
//!
//! [`HighlightState::handle`] is a pure transition function. The entry and
//! exit actions that touch the surface live in [`apply_entry`] and
//! [`apply_exit`], so the transitions can be tested on their own.
//!
//! ```
//! use windtree_explainer::{HighlightEvent, HighlightState, Transition};
//! # use windtree_explainer::{DocumentBuilder, NodeSpec};
//! # use kurbo::Rect;
//! # let mut b = DocumentBuilder::new(Rect::new(0.0, 0.0, 1.0, 1.0));
//! # let n = b.node(NodeSpec::default()).unwrap();
//! # let m = b.node(NodeSpec::default()).unwrap();
//!
//! let mut state = HighlightState::default();
//! state.handle(HighlightEvent::Enter(n));
//! // Moving straight to another node never passes through Idle.
//! let t = state.handle(HighlightEvent::Enter(m));
//! assert_eq!(t, Transition::Activated { previous: Some(n), node: m });
//! assert_eq!(state, HighlightState::Active(m));
//! ```

use tracing::debug;
use windtree_geometry::SegmentShape;

use crate::{Document, ExplainerConfig, NodeId, SegmentRef, Surface, Toggles};

/// The single active-node slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HighlightState {
    /// No node is hovered.
    #[default]
    Idle,
    /// `node` is hovered.
    Active(NodeId),
}

/// Pointer events that drive [`HighlightState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightEvent {
    /// The pointer entered a node's hit region.
    Enter(NodeId),
    /// The pointer left the whole drawing surface.
    LeaveDrawing,
}

/// Result of handling a [`HighlightEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// `node` became active, replacing `previous` in the same step.
    Activated {
        /// Node that was active before, if any.
        previous: Option<NodeId>,
        /// Newly active node.
        node: NodeId,
    },
    /// The state became (or stayed) idle.
    Deactivated {
        /// Node that was active before, if any.
        previous: Option<NodeId>,
    },
}

impl HighlightState {
    /// The hovered node, if any.
    #[must_use]
    pub fn active(self) -> Option<NodeId> {
        match self {
            Self::Idle => None,
            Self::Active(node) => Some(node),
        }
    }

    /// Applies `event` and reports the transition taken.
    ///
    /// Entering the already active node re-activates it, and leaving while
    /// idle still reports a deactivation: the corresponding actions are
    /// idempotent, so hosts can run them unconditionally.
    pub fn handle(&mut self, event: HighlightEvent) -> Transition {
        let previous = self.active();
        let transition = match event {
            HighlightEvent::Enter(node) => {
                *self = Self::Active(node);
                Transition::Activated { previous, node }
            }
            HighlightEvent::LeaveDrawing => {
                *self = Self::Idle;
                Transition::Deactivated { previous }
            }
        };
        debug!(?event, ?transition, "highlight transition");
        transition
    }
}

/// Entry action of [`HighlightState::Active`].
///
/// Dims every segment and node, hides all shortcuts, then restores full
/// opacity for `node` and the segments it governs, and shows the shortcuts
/// under it when [`Toggles::SHORTCUTS`] is checked. Whatever was highlighted
/// before is dimmed in the same call.
pub fn apply_entry(
    doc: &Document,
    node: NodeId,
    toggles: Toggles,
    config: &ExplainerConfig,
    surface: &mut impl Surface,
) {
    set_all_opacity(doc, config.dim_opacity, surface);
    hide_all_shortcuts(doc, surface);
    if toggles.contains(Toggles::SHORTCUTS) {
        show_shortcuts_under(doc, node, surface);
    }
    surface.set_node_opacity(node, 1.0);
    for &segment in doc.node(node).segments() {
        surface.set_segment_opacity(segment, 1.0);
    }
}

/// Exit action into [`HighlightState::Idle`].
///
/// Restores full opacity everywhere, hides all shortcuts, and clears the
/// readout and the probe overlay. Safe to run in any state.
pub fn apply_exit(doc: &Document, surface: &mut impl Surface) {
    set_all_opacity(doc, 1.0, surface);
    hide_all_shortcuts(doc, surface);
    surface.set_readout(None);
    surface.clear_overlay();
}

/// Shapes the winding engine must count in `state`.
///
/// Idle: every piece of every segment. Active: the pieces of the node's
/// governed segments, plus the shortcuts under it when both
/// [`Toggles::SHORTCUTS`] and [`Toggles::TREE`] are checked.
#[must_use]
pub fn resolve_segment_set(
    doc: &Document,
    state: HighlightState,
    toggles: Toggles,
) -> Vec<(SegmentRef, &SegmentShape)> {
    let Some(node) = state.active() else {
        return doc.all_pieces().collect();
    };
    let mut set: Vec<_> = doc
        .node(node)
        .segments()
        .iter()
        .flat_map(|&segment| doc.segment_pieces(segment))
        .collect();
    if toggles.contains(Toggles::SHORTCUTS | Toggles::TREE) {
        set.extend(doc.shortcuts_under(node));
    }
    set
}

pub(crate) fn show_shortcuts_under(doc: &Document, node: NodeId, surface: &mut impl Surface) {
    for id in doc.subtree(node) {
        if !doc.node(id).shortcuts().is_empty() {
            surface.set_shortcuts_visible(id, true);
        }
    }
}

pub(crate) fn hide_all_shortcuts(doc: &Document, surface: &mut impl Surface) {
    for id in doc.node_ids() {
        surface.set_shortcuts_visible(id, false);
    }
}

fn set_all_opacity(doc: &Document, opacity: f64, surface: &mut impl Surface) {
    for id in doc.segment_ids() {
        surface.set_segment_opacity(id, opacity);
    }
    for id in doc.node_ids() {
        surface.set_node_opacity(id, opacity);
    }
}
