// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;
use windtree_geometry::GeometryError;

/// Errors raised while building an annotated document from an input drawing.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The input is not well-formed SVG.
    #[error("failed to parse input SVG: {0}")]
    Parse(String),

    /// The root `<svg>` element or its `viewBox` is missing.
    #[error("input has no root viewBox")]
    MissingViewBox,

    /// A `<path>` element carries no `d` attribute.
    #[error("input path #{index} has no `d` attribute")]
    MissingPathData {
        /// Position of the path among the input paths.
        index: usize,
    },

    /// A `viewBox` or `d` attribute did not parse.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
