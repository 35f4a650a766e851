// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed registry of path segments and tree nodes.

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use tracing::{debug, warn};
use windtree_geometry::SegmentShape;

use crate::LoadError;

/// Handle of a [`PathSegment`] inside a [`Document`].
///
/// Handles are dense indices assigned at load time and are only meaningful
/// for the document that produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub(crate) u32);

/// Handle of a [`TreeNode`] inside a [`Document`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl SegmentId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl NodeId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which piece of geometry a crossing came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentRef {
    /// A piece of a path segment.
    Segment(SegmentId),
    /// A shortcut piece owned by a tree node.
    Shortcut(NodeId),
}

/// A path segment: one or more drawable pieces under a stable name.
///
/// Generated documents draw each segment as two halves so arrowheads can be
/// attached to the first one; every piece is an independent shape for the
/// winding engine.
#[derive(Clone, Debug)]
pub struct PathSegment {
    name: String,
    pieces: Vec<SegmentShape>,
}

impl PathSegment {
    /// Stable identifier from the document (`id` attribute).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drawable pieces. Pieces whose path data failed to parse are absent.
    #[must_use]
    pub fn pieces(&self) -> &[SegmentShape] {
        &self.pieces
    }
}

/// A node of the decomposition tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    segments: Vec<SegmentId>,
    shortcuts: Vec<SegmentShape>,
    base_winding: i64,
    bounds: Rect,
}

impl TreeNode {
    /// Stable identifier (`id` attribute, or a generated `nodeN`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Segments this node governs directly. May be empty.
    #[must_use]
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// Shortcut pieces drawn by this node itself.
    #[must_use]
    pub fn shortcuts(&self) -> &[SegmentShape] {
        &self.shortcuts
    }

    /// Precomputed winding number annotated on the node.
    #[must_use]
    pub fn base_winding(&self) -> i64 {
        self.base_winding
    }

    /// Region covered by the node, in document coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// The loaded document: segments, tree nodes and the document `viewBox`.
///
/// Constructed once through [`DocumentBuilder`] (or
/// [`Document::from_svg_str`](crate::Document::from_svg_str)) and immutable
/// afterwards. All cross references are resolved to typed handles at build
/// time, so lookups by handle cannot fail.
#[derive(Clone, Debug)]
pub struct Document {
    view_box: Rect,
    segments: Vec<PathSegment>,
    nodes: Vec<TreeNode>,
    segment_names: HashMap<String, SegmentId>,
    node_names: HashMap<String, NodeId>,
    original_paths: usize,
}

impl Document {
    /// The document's `viewBox`.
    #[must_use]
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Number of `original` input paths carried for fill demonstrations.
    #[must_use]
    pub fn original_paths(&self) -> usize {
        self.original_paths
    }

    /// Returns the segment for a handle.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> &PathSegment {
        &self.segments[id.idx()]
    }

    /// Returns the node for a handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.idx()]
    }

    /// Looks up a segment by its document identifier.
    #[must_use]
    pub fn segment_by_name(&self, name: &str) -> Option<SegmentId> {
        self.segment_names.get(name).copied()
    }

    /// Looks up a node by its document identifier.
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.node_names.get(name).copied()
    }

    /// All segment handles in document order.
    pub fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        id_range(self.segments.len()).map(SegmentId)
    }

    /// All node handles in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        id_range(self.nodes.len()).map(NodeId)
    }

    /// Nodes without a parent, in document order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&id| self.node(id).parent.is_none())
    }

    /// `node` followed by all of its descendants in pre-order.
    #[must_use]
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// Every piece of every segment, keyed for the winding engine.
    pub fn all_pieces(&self) -> impl Iterator<Item = (SegmentRef, &SegmentShape)> + '_ {
        self.segment_ids().flat_map(move |id| self.segment_pieces(id))
    }

    /// The pieces of one segment, keyed for the winding engine.
    pub fn segment_pieces(
        &self,
        id: SegmentId,
    ) -> impl Iterator<Item = (SegmentRef, &SegmentShape)> + '_ {
        self.segment(id)
            .pieces
            .iter()
            .map(move |shape| (SegmentRef::Segment(id), shape))
    }

    /// Shortcut pieces of `node` and all of its descendants.
    #[must_use]
    pub fn shortcuts_under(&self, node: NodeId) -> Vec<(SegmentRef, &SegmentShape)> {
        self.subtree(node)
            .into_iter()
            .flat_map(|id| {
                self.node(id)
                    .shortcuts
                    .iter()
                    .map(move |shape| (SegmentRef::Shortcut(id), shape))
            })
            .collect()
    }

    /// Deepest node whose bounds contain `local`.
    ///
    /// Among nodes of equal depth the one declared last wins, matching paint
    /// order.
    #[must_use]
    pub fn node_at(&self, local: Point) -> Option<NodeId> {
        let mut best: Option<(usize, NodeId)> = None;
        for id in self.node_ids() {
            if !self.node(id).bounds.contains(local) {
                continue;
            }
            let depth = self.depth(id);
            if best.is_none_or(|(d, _)| depth >= d) {
                best = Some((depth, id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.node(node).parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.node(p).parent;
        }
        depth
    }
}

/// Description of a tree node handed to [`DocumentBuilder::node`].
#[derive(Clone, Debug, Default)]
pub struct NodeSpec {
    /// Identifier; a `nodeN` name is generated when absent.
    pub name: Option<String>,
    /// Identifier of the parent node, which must already have been added.
    pub parent: Option<String>,
    /// Identifiers of the governed segments. They may be added later.
    pub segments: Vec<String>,
    /// Path data of the shortcut pieces drawn by this node.
    pub shortcuts: Vec<String>,
    /// Precomputed base winding number.
    pub base_winding: i64,
    /// Region covered by the node.
    pub bounds: Rect,
}

/// Incremental constructor for a [`Document`].
///
/// Segment references on nodes are resolved in [`finish`](Self::finish), so
/// nodes and segments may be added in any order. Parents must be added before
/// their children.
#[derive(Debug)]
pub struct DocumentBuilder {
    view_box: Rect,
    segments: Vec<PathSegment>,
    segment_names: HashMap<String, SegmentId>,
    nodes: Vec<TreeNode>,
    node_names: HashMap<String, NodeId>,
    pending_segments: Vec<Vec<String>>,
    original_paths: usize,
}

impl DocumentBuilder {
    /// Starts an empty document with the given `viewBox`.
    #[must_use]
    pub fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            segments: Vec::new(),
            segment_names: HashMap::new(),
            nodes: Vec::new(),
            node_names: HashMap::new(),
            pending_segments: Vec::new(),
            original_paths: 0,
        }
    }

    /// Adds a segment made of the given path data pieces.
    ///
    /// Pieces that fail to parse are logged and left out; the segment still
    /// exists so nodes may refer to it.
    pub fn segment<'a>(
        &mut self,
        name: &str,
        pieces: impl IntoIterator<Item = &'a str>,
    ) -> Result<SegmentId, LoadError> {
        if self.segment_names.contains_key(name) {
            return Err(LoadError::DuplicateId(name.to_owned()));
        }
        let id = SegmentId(index_u32(self.segments.len())?);
        let pieces = parse_pieces(name, pieces);
        self.segments.push(PathSegment {
            name: name.to_owned(),
            pieces,
        });
        self.segment_names.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Adds a tree node.
    pub fn node(&mut self, spec: NodeSpec) -> Result<NodeId, LoadError> {
        let id = NodeId(index_u32(self.nodes.len())?);
        let name = spec.name.unwrap_or_else(|| format!("node{}", id.0));
        if self.node_names.contains_key(&name) {
            return Err(LoadError::DuplicateId(name));
        }
        let parent = match spec.parent {
            Some(parent) => Some(
                self.node_names
                    .get(&parent)
                    .copied()
                    .ok_or_else(|| LoadError::UnknownParent {
                        node: name.clone(),
                        parent,
                    })?,
            ),
            None => None,
        };
        if let Some(parent) = parent {
            self.nodes[parent.idx()].children.push(id);
        }
        let shortcuts = parse_pieces(&name, spec.shortcuts.iter().map(String::as_str));
        self.node_names.insert(name.clone(), id);
        self.nodes.push(TreeNode {
            name,
            parent,
            children: Vec::new(),
            segments: Vec::new(),
            shortcuts,
            base_winding: spec.base_winding,
            bounds: spec.bounds,
        });
        self.pending_segments.push(spec.segments);
        Ok(id)
    }

    /// Records one `original` input path.
    pub fn original_path(&mut self) {
        self.original_paths += 1;
    }

    /// Resolves node segment references and returns the document.
    pub fn finish(mut self) -> Result<Document, LoadError> {
        for (node, names) in self.nodes.iter_mut().zip(self.pending_segments) {
            node.segments = names
                .into_iter()
                .map(|segment| {
                    self.segment_names
                        .get(&segment)
                        .copied()
                        .ok_or_else(|| LoadError::UnknownSegment {
                            node: node.name.clone(),
                            segment,
                        })
                })
                .collect::<Result<_, _>>()?;
        }
        debug!(
            segments = self.segments.len(),
            nodes = self.nodes.len(),
            originals = self.original_paths,
            "document registry built"
        );
        Ok(Document {
            view_box: self.view_box,
            segments: self.segments,
            nodes: self.nodes,
            segment_names: self.segment_names,
            node_names: self.node_names,
            original_paths: self.original_paths,
        })
    }
}

fn parse_pieces<'a>(owner: &str, pieces: impl IntoIterator<Item = &'a str>) -> Vec<SegmentShape> {
    pieces
        .into_iter()
        .filter_map(|data| match SegmentShape::from_svg(data) {
            Ok(shape) => Some(shape),
            Err(err) => {
                warn!(owner, %err, "omitting unusable path data");
                None
            }
        })
        .collect()
}

fn index_u32(len: usize) -> Result<u32, LoadError> {
    u32::try_from(len).map_err(|_| LoadError::TooLarge)
}

// The builder rejects registries that outgrow `u32`.
fn id_range(len: usize) -> core::ops::Range<u32> {
    0..u32::try_from(len).unwrap_or(u32::MAX)
}
