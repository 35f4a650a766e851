// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Line, ParamCurve, PathSeg, Rect};
use svg::node::element::{Circle, Definitions, Group, Marker, Path, Rectangle, Text};
use tracing::debug;

use crate::input::{AttrList, InputPath, read_input};
use crate::{BuildConfig, BuildError, Cell, MonotonicSegment, QuadTree, split_paths};

/// An input drawing together with its monotonic segments and quadtree.
#[derive(Clone, Debug)]
pub struct AnnotatedDrawing {
    root: AttrList,
    view_box: Rect,
    originals: Vec<InputPath>,
    segments: Vec<MonotonicSegment>,
    tree: QuadTree,
}

/// Splits every path of `input` and builds the quadtree over its `viewBox`.
///
/// Every `<path>` of the input counts, wherever it sits in the tree.
pub fn build(input: &str, config: &BuildConfig) -> Result<AnnotatedDrawing, BuildError> {
    let drawing = read_input(input)?;
    let paths: Vec<BezPath> = drawing.paths.iter().map(|p| p.path.clone()).collect();
    let segments = split_paths(&paths, config.dedup_epsilon);
    let tree = QuadTree::build(drawing.view_box, &segments, config);
    debug!(
        paths = paths.len(),
        segments = segments.len(),
        cells = tree.cells().len(),
        "annotated drawing"
    );
    Ok(AnnotatedDrawing {
        root: drawing.root,
        view_box: drawing.view_box,
        originals: drawing.paths,
        segments,
        tree,
    })
}

impl AnnotatedDrawing {
    /// The input `viewBox`.
    #[must_use]
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Monotonic segments, indexed by id.
    #[must_use]
    pub fn segments(&self) -> &[MonotonicSegment] {
        &self.segments
    }

    /// The quadtree.
    #[must_use]
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Renders the annotated SVG document.
    ///
    /// Layers, bottom to top: the arrow marker definition, the original
    /// paths, one group per quadtree cell (parents first), segment bounding
    /// boxes and the segment groups.
    #[must_use]
    pub fn to_document(&self) -> svg::Document {
        let mut doc = svg::Document::new();
        for (k, v) in &self.root {
            doc = doc.set(k.as_str(), v.as_str());
        }
        doc = doc.add(arrow_marker());
        for original in &self.originals {
            doc = doc.add(with_attributes(Path::new(), &original.attributes)
                .set("d", original.path.to_svg())
                .set("class", "original"));
        }
        for (id, cell) in self.tree.cells().iter().enumerate() {
            doc = doc.add(self.cell_group(id, cell));
        }
        for seg in &self.segments {
            let bbox = seg.bounding_box();
            doc = doc.add(
                Rectangle::new()
                    .set("class", "segment_bounding_box")
                    .set("x", bbox.x0)
                    .set("y", bbox.y0)
                    .set("width", bbox.width())
                    .set("height", bbox.height())
                    .set("stroke", "blue")
                    .set("fill", "none")
                    .set("stroke-dasharray", "4"),
            );
        }
        for seg in &self.segments {
            doc = doc.add(self.segment_group(seg));
        }
        doc
    }

    /// [`to_document`](Self::to_document) serialized.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    fn cell_group(&self, id: usize, cell: &Cell) -> Group {
        let names: Vec<String> = cell
            .segments()
            .iter()
            .map(|&i| format!("segment{}", self.segments[i].id()))
            .collect();
        let b = cell.bounds();

        let label = Text::new(cell.base_winding().to_string())
            .set("x", b.x0 + 1.0)
            .set("y", b.y0 + 6.0)
            .set("class", "winding_number");

        let mut group = Group::new()
            .set("class", "treenode")
            .set("id", format!("node{id}"));
        if let Some(parent) = cell.parent() {
            group = group.set("parent", format!("node{parent}"));
        }
        group = group
            .set("segments", names.join(" "))
            .add(
                Rectangle::new()
                    .set("x", b.x0)
                    .set("y", b.y0)
                    .set("width", b.width())
                    .set("height", b.height())
                    .set("stroke", "#aaa")
                    .set("fill", "transparent"),
            )
            .add(label);
        for &shortcut in cell.shortcuts() {
            let (first, second) = shortcut.subdivide();
            group = group
                .add(shortcut_path(first).set("class", "shortcut firstHalf arrowhead"))
                .add(shortcut_path(second).set("class", "shortcut"));
        }
        group
    }

    fn segment_group(&self, seg: &MonotonicSegment) -> Group {
        let attributes: &[(String, String)] = self
            .originals
            .get(seg.source())
            .map(|p| p.attributes.as_slice())
            .unwrap_or_default();
        let (first, second) = seg.halves();
        let halves = Group::new()
            .add(
                with_attributes(Path::new(), attributes)
                    .set("d", seg_data(first))
                    .set("class", "firstHalf"),
            )
            .add(with_attributes(Path::new(), attributes).set("d", seg_data(second)));
        let (start, end) = seg.endpoints();
        let mut group = Group::new()
            .set("id", format!("segment{}", seg.id()))
            .set("class", "segment")
            .add(halves);
        for p in [start, end] {
            group = group.add(
                Circle::new()
                    .set("cx", p.x)
                    .set("cy", p.y)
                    .set("r", 2)
                    .set("fill", "black")
                    .set("class", "segmentBoundary"),
            );
        }
        group
    }
}

fn arrow_marker() -> Definitions {
    Definitions::new().add(
        Marker::new()
            .set("id", "arrow")
            .set("viewBox", (0, 0, 10, 10))
            .set("refX", 5)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto-start-reverse")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", "black")
                    .set("stroke", "black"),
            ),
    )
}

fn with_attributes(mut path: Path, attributes: &[(String, String)]) -> Path {
    for (k, v) in attributes {
        path = path.set(k.as_str(), v.as_str());
    }
    path
}

fn seg_data(seg: PathSeg) -> String {
    BezPath::from_path_segments(std::iter::once(seg)).to_svg()
}

fn shortcut_path(line: Line) -> Path {
    Path::new()
        .set("d", seg_data(PathSeg::Line(line)))
        .set("stroke", "black")
        .set("stroke-dasharray", "2")
}
