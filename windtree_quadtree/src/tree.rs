// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The winding-number quadtree.

use kurbo::{Line, Point, Rect};
use tracing::debug;
use windtree_geometry::crossing_sign;

use crate::{BuildConfig, MonotonicSegment};

/// Index of a cell inside a [`QuadTree`].
pub type CellId = usize;

/// One cell of the quadtree.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    bounds: Rect,
    parent: Option<CellId>,
    children: Option<[CellId; 4]>,
    base_winding: i64,
    segments: Vec<usize>,
    shortcuts: Vec<Line>,
}

impl Cell {
    fn new(bounds: Rect, parent: Option<CellId>, base_winding: i64, segments: Vec<usize>) -> Self {
        Self {
            bounds,
            parent,
            children: None,
            base_winding,
            segments,
            shortcuts: Vec::new(),
        }
    }

    /// Area covered by the cell.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Enclosing cell, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<CellId> {
        self.parent
    }

    /// Top-left, top-right, bottom-left and bottom-right children of a branch.
    #[must_use]
    pub fn children(&self) -> Option<[CellId; 4]> {
        self.children
    }

    /// Whether the cell was not split.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Winding number of the cell, minus the crossings of its own segments.
    #[must_use]
    pub fn base_winding(&self) -> i64 {
        self.base_winding
    }

    /// Indices of the segments a leaf governs. Empty for branches.
    #[must_use]
    pub fn segments(&self) -> &[usize] {
        &self.segments
    }

    /// Shortcut lines of a leaf, oriented like the segments they stand for.
    #[must_use]
    pub fn shortcuts(&self) -> &[Line] {
        &self.shortcuts
    }
}

/// A quadtree over the drawing's `viewBox`.
///
/// Cells are stored so that every parent precedes its children; the root is
/// cell `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadTree {
    cells: Vec<Cell>,
}

impl QuadTree {
    /// Subdivides `bounds` over `segments`.
    ///
    /// A cell is split into four quadrants while it holds more than
    /// `min_segments` segments and lies above `max_depth`. A quadrant keeps a
    /// segment when one of its endpoints lies inside or it crosses one of the
    /// quadrant's edges.
    #[must_use]
    pub fn build(bounds: Rect, segments: &[MonotonicSegment], config: &BuildConfig) -> Self {
        let mut tree = Self {
            cells: vec![Cell::new(bounds, None, 0, (0..segments.len()).collect())],
        };
        tree.split(0, 0, segments, config);
        for cell in &mut tree.cells {
            if cell.is_leaf() {
                cell.shortcuts = shortcuts(cell, segments, config.shortcut_rise);
            }
        }
        debug!(
            cells = tree.cells.len(),
            leaves = tree.leaves().count(),
            "built quadtree"
        );
        tree
    }

    /// All cells, parents first.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One cell.
    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    /// Ids of all unsplit cells.
    pub fn leaves(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_leaf())
            .map(|(id, _)| id)
    }

    fn split(
        &mut self,
        cell: CellId,
        depth: usize,
        segments: &[MonotonicSegment],
        config: &BuildConfig,
    ) {
        if self.cells[cell].segments.len() <= config.min_segments || depth >= config.max_depth {
            return;
        }
        let bounds = self.cells[cell].bounds;
        let base = self.cells[cell].base_winding;
        let held = std::mem::take(&mut self.cells[cell].segments);

        let c = bounds.center();
        let quadrants = [
            Rect::new(bounds.x0, bounds.y0, c.x, c.y),
            Rect::new(c.x, bounds.y0, bounds.x1, c.y),
            Rect::new(bounds.x0, c.y, c.x, bounds.y1),
            Rect::new(c.x, c.y, bounds.x1, bounds.y1),
        ];
        let [tl, tr, bl, br] = quadrants.map(|q| keep_segments(q, &held, segments));

        let section = section_crossings(bounds, &held, segments, config.far_x);
        let windings = [
            base + bottom_crossings(quadrants[1], &tr, segments) + section,
            base + section,
            base + bottom_crossings(quadrants[3], &br, segments),
            base,
        ];

        let first = self.cells.len();
        for ((bounds, held), winding) in quadrants.into_iter().zip([tl, tr, bl, br]).zip(windings) {
            self.cells.push(Cell::new(bounds, Some(cell), winding, held));
        }
        self.cells[cell].children = Some([first, first + 1, first + 2, first + 3]);
        for child in first..first + 4 {
            self.split(child, depth + 1, segments, config);
        }
    }
}

fn edges(r: Rect) -> [Line; 4] {
    let (tl, tr) = (Point::new(r.x0, r.y0), Point::new(r.x1, r.y0));
    let (bl, br) = (Point::new(r.x0, r.y1), Point::new(r.x1, r.y1));
    [
        Line::new(tl, tr),
        Line::new(tr, br),
        Line::new(bl, br),
        Line::new(tl, bl),
    ]
}

fn right_edge(r: Rect) -> Line {
    Line::new((r.x1, r.y0), (r.x1, r.y1))
}

fn keep_segments(quadrant: Rect, held: &[usize], segments: &[MonotonicSegment]) -> Vec<usize> {
    let edges = edges(quadrant);
    held.iter()
        .copied()
        .filter(|&i| {
            let seg = &segments[i];
            let (start, end) = seg.endpoints();
            quadrant.contains(start)
                || quadrant.contains(end)
                || edges.iter().any(|&edge| seg.crosses(edge))
        })
        .collect()
}

/// Signed crossings of the horizontal section from the middle of the right
/// edge out to `far_x`, corrected for segments that enter or leave through
/// the right edge below it.
fn section_crossings(
    bounds: Rect,
    held: &[usize],
    segments: &[MonotonicSegment],
    far_x: f64,
) -> i64 {
    let mid = bounds.center().y;
    let hit = Point::new(bounds.x1, mid);
    let section = Line::new(hit, (far_x, mid));
    let edge = right_edge(bounds);
    let mut count = 0;
    for seg in held.iter().map(|&i| &segments[i]) {
        let (start, end) = seg.endpoints();
        if seg.crosses(section) {
            count += crossing_sign(start, hit);
        }
        if seg.crosses(edge) {
            if start.x > bounds.x1 && start.y > mid {
                count += 1;
            }
            if end.x > bounds.x1 && end.y > mid {
                count -= 1;
            }
        }
    }
    count
}

fn bottom_crossings(quadrant: Rect, held: &[usize], segments: &[MonotonicSegment]) -> i64 {
    let bottom = Line::new((quadrant.x0, quadrant.y1), (quadrant.x1, quadrant.y1));
    held.iter()
        .map(|&i| &segments[i])
        .filter(|seg| seg.crosses(bottom))
        .map(|seg| crossing_sign(seg.endpoints().0, bottom.p0))
        .sum()
}

fn shortcuts(leaf: &Cell, segments: &[MonotonicSegment], rise: f64) -> Vec<Line> {
    let edge = right_edge(leaf.bounds);
    let top = leaf.bounds.y0 - rise;
    leaf.segments
        .iter()
        .map(|&i| &segments[i])
        .filter(|seg| seg.crosses(edge))
        .map(|seg| {
            let (start, end) = seg.endpoints();
            if start.x > end.x {
                // Incoming: drops onto the start of a segment running leftward.
                Line::new((start.x, top), start)
            } else {
                // Outgoing: rises from the end of a segment running rightward.
                Line::new(end, (end.x, top))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_paths;
    use kurbo::BezPath;

    fn square() -> Vec<MonotonicSegment> {
        split_paths(&[BezPath::from_svg("M 10 10 L 90 10 L 90 90 L 10 90 Z").unwrap()], 0.01)
    }

    const VIEW: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn few_segments_stay_a_single_leaf() {
        let segs = square();
        let tree = QuadTree::build(VIEW, &segs[..2], &BuildConfig::default());
        assert_eq!(tree.cells().len(), 1);
        assert_eq!(tree.cell(0).segments(), &[0, 1]);
    }

    #[test]
    fn max_depth_zero_never_splits() {
        let config = BuildConfig {
            max_depth: 0,
            ..BuildConfig::default()
        };
        let tree = QuadTree::build(VIEW, &square(), &config);
        assert!(tree.cell(0).is_leaf());
    }

    #[test]
    fn square_splits_once_into_corner_leaves() {
        let tree = QuadTree::build(VIEW, &square(), &BuildConfig::default());
        assert_eq!(tree.cells().len(), 5);
        let [tl, tr, bl, br] = tree.cell(0).children().unwrap();
        assert!(tree.cell(0).segments().is_empty());
        assert_eq!(tree.cell(tl).segments(), &[0, 3]);
        assert_eq!(tree.cell(tr).segments(), &[0, 1]);
        assert_eq!(tree.cell(bl).segments(), &[2, 3]);
        assert_eq!(tree.cell(br).segments(), &[1, 2]);
        assert_eq!(tree.cell(br).parent(), Some(0));
    }

    #[test]
    fn base_windings_of_square_quadrants() {
        let tree = QuadTree::build(VIEW, &square(), &BuildConfig::default());
        let [tl, tr, bl, br] = tree.cell(0).children().unwrap();
        // The right edge runs downward through the top-right bottom edge.
        assert_eq!(tree.cell(tl).base_winding(), 1);
        assert_eq!(tree.cell(tr).base_winding(), 0);
        assert_eq!(tree.cell(bl).base_winding(), 0);
        assert_eq!(tree.cell(br).base_winding(), 0);
    }

    #[test]
    fn shortcuts_follow_segment_direction() {
        let tree = QuadTree::build(VIEW, &square(), &BuildConfig::default());
        let [tl, tr, bl, _] = tree.cell(0).children().unwrap();
        // Top edge runs rightward out of the top-left leaf.
        assert_eq!(
            tree.cell(tl).shortcuts(),
            &[Line::new((90.0, 10.0), (90.0, -20.0))]
        );
        // Bottom edge runs leftward into the bottom-left leaf.
        assert_eq!(
            tree.cell(bl).shortcuts(),
            &[Line::new((90.0, 30.0), (90.0, 90.0))]
        );
        assert!(tree.cell(tr).shortcuts().is_empty());
    }
}
