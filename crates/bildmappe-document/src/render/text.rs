// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text rendering shared by both design surfaces.
//
// Both surfaces author text the same way; only the style resolution differs
// (comment layer: bold × italic, front page: weight only) and that is done by
// the callers before the shared path runs.

use bildmappe_core::layout::{FONT_PX_TO_PT, LINE_HEIGHT_FACTOR, RIGHT_ALIGN_MARGIN_MM};
use bildmappe_core::{FontStyle, Rgb, TextAlign, parse_hex_color};

use crate::geometry::CanvasTransform;
use crate::sink::PageSink;

/// Everything the shared text path needs, already surface-resolved.
pub struct TextSpec<'a> {
    pub text: &'a str,
    pub x_px: f32,
    pub y_px: f32,
    pub font_size_px: f32,
    pub style: FontStyle,
    pub color: Option<&'a str>,
    pub align: TextAlign,
}

/// Paint a (possibly multi-line) text element onto the current page.
///
/// Whitespace-only content is skipped. Unparseable colors fall back to black
/// rather than failing the element.
pub fn draw_text(sink: &mut dyn PageSink, transform: &CanvasTransform, spec: &TextSpec) {
    if spec.text.trim().is_empty() {
        return;
    }

    let font_size = spec.font_size_px * FONT_PX_TO_PT;
    sink.set_font_size(font_size);
    sink.set_font(spec.style);

    let color = spec
        .color
        .and_then(parse_hex_color)
        .unwrap_or(Rgb::BLACK);
    sink.set_text_color(color);

    let x = transform.x(spec.x_px);
    let y = transform.y(spec.y_px);
    let line_height = font_size * LINE_HEIGHT_FACTOR;

    for (index, line) in spec.text.split('\n').enumerate() {
        let line_y = y + index as f32 * line_height;
        match spec.align {
            TextAlign::Left => sink.text(line, x, line_y),
            TextAlign::Center => {
                let line_x = (sink.page_width() - sink.text_width(line)) / 2.0;
                sink.text(line, line_x, line_y);
            }
            TextAlign::Right => {
                let line_x = sink.page_width() - sink.text_width(line) - RIGHT_ALIGN_MARGIN_MM;
                sink.text(line, line_x, line_y);
            }
        }
    }
}
