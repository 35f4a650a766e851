// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use serde::Serialize;
use windtree_explainer::{Explainer, MemorySurface, ProbeOutcome, SegmentRef};

/// JSON record of one probe.
#[derive(Serialize, Debug)]
pub(crate) struct ProbeReport {
    pub(crate) device: [f64; 2],
    pub(crate) local: [f64; 2],
    pub(crate) active_node: Option<String>,
    pub(crate) seed: i64,
    pub(crate) winding_number: i64,
    pub(crate) readout: i64,
    pub(crate) markers: Vec<MarkerReport>,
    pub(crate) overlay: String,
}

#[derive(Serialize, Debug)]
pub(crate) struct MarkerReport {
    pub(crate) point: [f64; 2],
    /// Segment id, or `shortcut:<node id>` for shortcut pieces.
    pub(crate) source: String,
    pub(crate) sign: i64,
}

impl ProbeReport {
    pub(crate) fn new(
        explainer: &Explainer,
        device: Point,
        outcome: &ProbeOutcome,
        surface: &MemorySurface,
    ) -> Self {
        let doc = explainer.document();
        let markers = outcome
            .winding
            .markers
            .iter()
            .map(|m| MarkerReport {
                point: [m.point.x, m.point.y],
                source: match m.source {
                    SegmentRef::Segment(id) => doc.segment(id).name().to_owned(),
                    SegmentRef::Shortcut(node) => format!("shortcut:{}", doc.node(node).name()),
                },
                sign: m.sign,
            })
            .collect();
        Self {
            device: [device.x, device.y],
            local: [outcome.local.x, outcome.local.y],
            active_node: explainer
                .highlight()
                .active()
                .map(|node| doc.node(node).name().to_owned()),
            seed: outcome.seed,
            winding_number: outcome.winding.winding_number,
            readout: outcome.readout.value,
            markers,
            overlay: surface.overlay_markup(),
        }
    }
}
