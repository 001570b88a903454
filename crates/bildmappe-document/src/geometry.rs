// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas-to-page coordinate transform.
//
// Elements are authored on a fixed 794×1123 pixel surface (A4 at 96 DPI).
// Each output page gets its own transform because orientation can change the
// physical page dimensions between pages.

use bildmappe_core::layout::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX};

/// Stateless mapping from canvas pixels to page millimetres.
///
/// The two axes scale independently; a landscape page stretches x and
/// compresses y relative to the portrait design surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl CanvasTransform {
    /// Build the transform for a target page of the given physical size.
    pub fn for_page(page_width_mm: f32, page_height_mm: f32) -> Self {
        Self {
            scale_x: page_width_mm / CANVAS_WIDTH_PX,
            scale_y: page_height_mm / CANVAS_HEIGHT_PX,
        }
    }

    /// Map a horizontal pixel coordinate or extent to millimetres.
    pub fn x(&self, px: f32) -> f32 {
        px * self.scale_x
    }

    /// Map a vertical pixel coordinate or extent to millimetres.
    pub fn y(&self, px: f32) -> f32 {
        px * self.scale_y
    }
}
