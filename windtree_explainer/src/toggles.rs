// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display toggles and the original-path fill mode.

bitflags::bitflags! {
    /// Checked display toggles.
    ///
    /// Every toggle starts unchecked.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Toggles: u8 {
        /// Show the tree node rectangles and labels.
        const TREE            = 0b0000_0001;
        /// Show segment boundary dots.
        const BOUNDARIES      = 0b0000_0010;
        /// Draw arrowheads on the first half of each segment.
        const ARROWHEADS      = 0b0000_0100;
        /// Show shortcuts of the hovered node and count them while probing.
        const SHORTCUTS       = 0b0000_1000;
        /// Show per-segment bounding boxes.
        const BOUNDING_BOX    = 0b0001_0000;
        /// Show base winding numbers and seed the readout with them.
        const WINDING_NUMBERS = 0b0010_0000;
    }
}

const CLASS_RULES: [(Toggles, ClassRule); 5] = [
    (Toggles::TREE, ClassRule::hidden_unless_checked(".treenode")),
    (
        Toggles::BOUNDARIES,
        ClassRule::hidden_unless_checked(".segmentBoundary"),
    ),
    (
        Toggles::ARROWHEADS,
        ClassRule {
            selector: ".firstHalf",
            class: "arrowhead",
            present_when_checked: true,
        },
    ),
    (
        Toggles::BOUNDING_BOX,
        ClassRule::hidden_unless_checked(".segment_bounding_box"),
    ),
    (
        Toggles::WINDING_NUMBERS,
        ClassRule::hidden_unless_checked(".winding_number"),
    ),
];

impl Toggles {
    /// The individual toggles, in the order their controls appear.
    pub const INDIVIDUAL: [Self; 6] = [
        Self::TREE,
        Self::BOUNDARIES,
        Self::ARROWHEADS,
        Self::SHORTCUTS,
        Self::BOUNDING_BOX,
        Self::WINDING_NUMBERS,
    ];

    /// The declarative class rule driven by a single toggle, if any.
    ///
    /// Shortcut visibility is driven by hover instead, so
    /// [`Toggles::SHORTCUTS`] has no rule.
    #[must_use]
    pub fn class_rule(self) -> Option<ClassRule> {
        CLASS_RULES
            .iter()
            .find(|(toggle, _)| *toggle == self)
            .map(|&(_, rule)| rule)
    }

    /// Sets every individual toggle to `checked`.
    ///
    /// Returns one change per individual toggle, whether or not its state
    /// actually changed, in control order. Each change must be dispatched to
    /// the toggle's change handler.
    pub fn set_all(&mut self, checked: bool) -> Vec<ToggleChange> {
        Self::INDIVIDUAL
            .iter()
            .map(|&toggle| {
                self.set(toggle, checked);
                ToggleChange { toggle, checked }
            })
            .collect()
    }
}

/// A dispatched change of one toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleChange {
    /// The single toggle that changed.
    pub toggle: Toggles,
    /// Its new checked state.
    pub checked: bool,
}

/// A class applied to every element matching a selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassRule {
    /// Target selector, for example `.treenode`.
    pub selector: &'static str,
    /// Class toggled on the targets.
    pub class: &'static str,
    /// Whether the class is present while the toggle is checked.
    pub present_when_checked: bool,
}

impl ClassRule {
    const fn hidden_unless_checked(selector: &'static str) -> Self {
        Self {
            selector,
            class: "invisible",
            present_when_checked: false,
        }
    }

    /// Whether the class should be present for a given checked state.
    #[must_use]
    pub fn enabled(self, checked: bool) -> bool {
        checked == self.present_when_checked
    }
}

/// Fill rule choice for the original input paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Outlines only.
    #[default]
    None,
    /// Non-zero fill rule.
    NonZero,
    /// Even-odd fill rule.
    EvenOdd,
}

impl FillMode {
    /// Resolves the fill for the original paths.
    ///
    /// Fills are light grey while the tree is shown, so the tree stays
    /// readable, and black otherwise.
    #[must_use]
    pub fn fill(self, tree_visible: bool) -> OriginalFill {
        let color = if tree_visible { "#eee" } else { "black" };
        match self {
            Self::None => OriginalFill::None,
            Self::NonZero => OriginalFill::Filled {
                rule: "nonzero",
                color,
            },
            Self::EvenOdd => OriginalFill::Filled {
                rule: "evenodd",
                color,
            },
        }
    }
}

/// Paint applied to the original input paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OriginalFill {
    /// No fill and no stroke.
    #[default]
    None,
    /// Filled with `color` under the SVG `fill-rule` named by `rule`.
    Filled {
        /// SVG `fill-rule` value.
        rule: &'static str,
        /// CSS colour.
        color: &'static str,
    },
}
