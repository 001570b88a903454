// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout policy constants.
//
// The design surfaces author elements in a fixed pixel space (A4 at 96 DPI);
// everything here describes how that space maps onto physical pages. Kept in
// one place so the tunables can be adjusted and tested independently of the
// render control flow.

/// Width of the design surface in pixels (A4 at 96 DPI).
pub const CANVAS_WIDTH_PX: f32 = 794.0;

/// Height of the design surface in pixels (A4 at 96 DPI).
pub const CANVAS_HEIGHT_PX: f32 = 1123.0;

/// Conversion factor from a pixel font size to the sink's point size.
pub const FONT_PX_TO_PT: f32 = 0.35;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Fraction of the canvas height that a vertical gap between unpaged elements
/// must exceed before the pagination resolver starts a new page.
///
/// This is a grouping heuristic, not a derived quantity. Elements sitting
/// near the boundary may group either way after small position edits.
pub const PAGE_BREAK_THRESHOLD: f32 = 0.9;

/// Fixed right margin in mm for right-aligned text.
pub const RIGHT_ALIGN_MARGIN_MM: f32 = 10.0;

/// Margin in mm on all sides when fitting a whole-page image.
pub const PAGE_IMAGE_MARGIN_MM: f32 = 10.0;

/// Fallback width in pixels for comment images without an explicit width.
pub const DEFAULT_IMAGE_WIDTH_PX: f32 = 200.0;

/// Fallback font size in pixels for text elements without one.
pub const DEFAULT_FONT_SIZE_PX: f32 = 24.0;
