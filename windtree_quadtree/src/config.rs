// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Tunables of the quadtree build.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Cells at this depth are never split.
    pub max_depth: usize,
    /// Cells holding this many segments or fewer are never split.
    pub min_segments: usize,
    /// How far above a leaf's top edge shortcuts reach.
    pub shortcut_rise: f64,
    /// `x` coordinate where the horizontal section used for base winding
    /// numbers ends. Must lie right of all geometry.
    pub far_x: f64,
    /// Curve cut parameters closer than this are merged.
    pub dedup_epsilon: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_segments: 2,
            shortcut_rise: 20.0,
            far_x: 1000.0,
            dedup_epsilon: 0.01,
        }
    }
}
