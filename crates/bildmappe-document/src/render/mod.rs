// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Element renderers — paint positioned text and image elements onto the
// current page. One dispatcher per design surface; the two surfaces share
// the text path but differ in style resolution and image sizing rules.

pub mod image;
pub mod text;

use bildmappe_core::error::Result;
use bildmappe_core::{CommentElement, ElementContent, FrontPageContent, FrontPageElement};

use crate::geometry::CanvasTransform;
use crate::sink::PageSink;
use crate::transcode::Transcoder;

use self::text::TextSpec;

/// Paint one comment-layer element onto the current page.
pub fn render_comment_element(
    sink: &mut dyn PageSink,
    transform: &CanvasTransform,
    transcoder: &Transcoder,
    element: &CommentElement,
) -> Result<()> {
    match &element.content {
        ElementContent::Text(content) => {
            text::draw_text(
                sink,
                transform,
                &TextSpec {
                    text: &content.content,
                    x_px: element.x,
                    y_px: element.y,
                    font_size_px: content.font_size_px(),
                    style: content.style(),
                    color: content.color.as_deref(),
                    align: content.align,
                },
            );
            Ok(())
        }
        ElementContent::Image(content) => image::render_comment_image(
            sink,
            transform,
            transcoder,
            element.x,
            element.y,
            content,
        ),
    }
}

/// Paint one front-page element onto the current page.
pub fn render_front_element(
    sink: &mut dyn PageSink,
    transform: &CanvasTransform,
    transcoder: &Transcoder,
    element: &FrontPageElement,
) -> Result<()> {
    match &element.content {
        FrontPageContent::Text {
            content,
            font_size,
            font_weight,
            text_align,
            color,
        } => {
            text::draw_text(
                sink,
                transform,
                &TextSpec {
                    text: content,
                    x_px: element.x,
                    y_px: element.y,
                    font_size_px: (*font_size)
                        .unwrap_or(bildmappe_core::layout::DEFAULT_FONT_SIZE_PX),
                    style: (*font_weight).into(),
                    color: color.as_deref(),
                    align: *text_align,
                },
            );
            Ok(())
        }
        FrontPageContent::Image { data, .. } => image::render_front_image(
            sink,
            transform,
            transcoder,
            element.x,
            element.y,
            element.width,
            element.height,
            data,
        ),
    }
}
