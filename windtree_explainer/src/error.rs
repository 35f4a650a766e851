// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;
use windtree_geometry::GeometryError;

/// Errors that prevent a document from being loaded.
///
/// Every variant is fatal to initialization. Malformed path data inside an
/// otherwise well-formed document is not an error: the affected piece is
/// logged and omitted.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The SVG text could not be read.
    #[error("failed to read SVG: {0}")]
    Read(#[from] std::io::Error),

    /// The SVG parser reported a syntax error.
    #[error("malformed SVG: {0}")]
    Parse(String),

    /// A required element or attribute is absent.
    #[error("missing {0}")]
    MissingElement(&'static str),

    /// The root `viewBox` is unusable.
    #[error(transparent)]
    ViewBox(#[from] GeometryError),

    /// A tree node's base winding number text is not an integer.
    #[error("node {node}: invalid winding number {text:?}")]
    InvalidWindingNumber {
        /// Node identifier.
        node: String,
        /// Offending text.
        text: String,
    },

    /// A tree node lists a segment identifier that does not exist.
    #[error("node {node} refers to unknown segment {segment}")]
    UnknownSegment {
        /// Node identifier.
        node: String,
        /// Missing segment identifier.
        segment: String,
    },

    /// A tree node names a parent that was not declared before it.
    #[error("node {node} refers to unknown parent {parent}")]
    UnknownParent {
        /// Node identifier.
        node: String,
        /// Missing parent identifier.
        parent: String,
    },

    /// Two segments or two nodes share an identifier.
    #[error("duplicate identifier {0}")]
    DuplicateId(String),

    /// More entities than a `u32` handle can address.
    #[error("document has too many elements")]
    TooLarge,
}
