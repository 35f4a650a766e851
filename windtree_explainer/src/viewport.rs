// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

/// Screen-to-document transform of the drawing.
///
/// The drawing's `viewBox` is fitted into a device-space rectangle preserving
/// aspect ratio and centred on both axes, the way SVG's default
/// `preserveAspectRatio="xMidYMid meet"` lays it out. A host that already
/// knows the screen transform can supply it directly with
/// [`DocumentViewport::from_screen_ctm`].
#[derive(Clone, Debug)]
pub struct DocumentViewport {
    view_rect: Rect,
    view_box: Rect,
    local_to_device: Affine,
    device_to_local: Affine,
}

impl DocumentViewport {
    /// Fits `view_box` into the device rectangle `view_rect`.
    #[must_use]
    pub fn new(view_rect: Rect, view_box: Rect) -> Self {
        let mut vp = Self {
            view_rect,
            view_box,
            local_to_device: Affine::IDENTITY,
            device_to_local: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Device and document coordinates coincide.
    #[must_use]
    pub fn identity(view_box: Rect) -> Self {
        Self::new(view_box, view_box)
    }

    /// Uses an explicit document-to-screen matrix.
    ///
    /// Non-invertible matrices fall back to the identity.
    #[must_use]
    pub fn from_screen_ctm(view_box: Rect, ctm: Affine) -> Self {
        let ctm = if ctm.determinant().abs() > f64::EPSILON {
            ctm
        } else {
            Affine::IDENTITY
        };
        Self {
            view_rect: ctm.transform_rect_bbox(view_box),
            view_box,
            local_to_device: ctm,
            device_to_local: ctm.inverse(),
        }
    }

    /// Device rectangle the drawing is fitted into.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// The document's `viewBox`.
    #[must_use]
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Document-to-device matrix.
    #[must_use]
    pub fn screen_ctm(&self) -> Affine {
        self.local_to_device
    }

    /// Refits the drawing after the host resized it.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
    }

    /// Converts a device-space point into document coordinates.
    #[must_use]
    pub fn device_to_local(&self, pt: Point) -> Point {
        self.device_to_local * pt
    }

    /// Converts a document point into device space.
    #[must_use]
    pub fn local_to_device(&self, pt: Point) -> Point {
        self.local_to_device * pt
    }

    /// Document-space rectangle covered by the device rectangle.
    #[must_use]
    pub fn visible_local_rect(&self) -> Rect {
        self.device_to_local.transform_rect_bbox(self.view_rect)
    }

    fn rebuild_transforms(&mut self) {
        let (view, bounds) = (self.view_rect, self.view_box);
        if view.width() <= 0.0
            || view.height() <= 0.0
            || bounds.width() <= 0.0
            || bounds.height() <= 0.0
        {
            self.local_to_device = Affine::IDENTITY;
            self.device_to_local = Affine::IDENTITY;
            return;
        }
        let zoom = (view.width() / bounds.width()).min(view.height() / bounds.height());
        // Document → device: centre the box on the origin, scale, move onto the view centre.
        self.local_to_device = Affine::translate(view.center().to_vec2())
            * Affine::scale(zoom)
            * Affine::translate(-bounds.center().to_vec2());
        self.device_to_local = self.local_to_device.inverse();
    }
}
