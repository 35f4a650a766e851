// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use windtree_geometry::DEFAULT_FAR_X;

/// Tunables of the explainer.
///
/// Missing fields take their defaults when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainerConfig {
    /// Opacity of segments and nodes that are not part of the hovered node.
    pub dim_opacity: f64,
    /// `x` coordinate where every probe ray ends.
    pub probe_far_x: f64,
    /// Radius of the probe origin and crossing markers.
    pub marker_radius: f64,
    /// Upward shift of the readout, in `em`.
    pub readout_offset_em: f64,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.1,
            probe_far_x: DEFAULT_FAR_X,
            marker_radius: 2.0,
            readout_offset_em: 0.7,
        }
    }
}
