// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::SvgParseError;
use thiserror::Error;

/// Errors raised while turning SVG attribute text into geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The `d` attribute could not be parsed as SVG path data.
    #[error("invalid path data {data:?}: {source}")]
    InvalidPathData {
        /// The offending path data.
        data: String,
        /// Parser failure reported by Kurbo.
        #[source]
        source: SvgParseError,
    },

    /// The path parsed but contains no drawing command after its move-to.
    #[error("path data contains no drawable segment")]
    EmptyPath,

    /// A `viewBox` attribute did not hold four finite numbers with a positive size.
    #[error("invalid viewBox {0:?}")]
    InvalidViewBox(String),
}
