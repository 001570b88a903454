// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image element rendering.
//
// Comment images derive their height from the image's own aspect ratio, so
// the ratio survives even when the two page scale factors differ. Front-page
// images take both extents from the element and scale each axis
// independently — the designer's literal box wins over the intrinsic ratio.
// The asymmetry is intentional, not an oversight.

use bildmappe_core::error::{BildmappeError, Result};
use bildmappe_core::layout::DEFAULT_IMAGE_WIDTH_PX;
use bildmappe_core::types::ImageContent;

use crate::geometry::CanvasTransform;
use crate::sink::PageSink;
use crate::transcode::{EncodedImage, Transcoder};

/// Transcode when the blob is not yet in the lossy output format.
fn prepare(transcoder: &Transcoder, data: &[u8]) -> EncodedImage {
    let encoded = EncodedImage::from_encoded(data.to_vec());
    if encoded.encoding.is_lossy() {
        encoded
    } else {
        transcoder.transcode_bytes(data)
    }
}

/// Paint a comment-layer image at its transformed position.
pub fn render_comment_image(
    sink: &mut dyn PageSink,
    transform: &CanvasTransform,
    transcoder: &Transcoder,
    x_px: f32,
    y_px: f32,
    content: &ImageContent,
) -> Result<()> {
    let prepared = prepare(transcoder, &content.data);
    let aspect = prepared.aspect_ratio().ok_or_else(|| {
        BildmappeError::RenderError("comment image has unreadable dimensions".into())
    })?;

    let width = content.width.unwrap_or(DEFAULT_IMAGE_WIDTH_PX) * transform.scale_x;
    let height = width / aspect;

    sink.add_image(&prepared, transform.x(x_px), transform.y(y_px), width, height)
}

/// Paint a front-page image into the element's explicit box.
#[allow(clippy::too_many_arguments)]
pub fn render_front_image(
    sink: &mut dyn PageSink,
    transform: &CanvasTransform,
    transcoder: &Transcoder,
    x_px: f32,
    y_px: f32,
    width_px: f32,
    height_px: f32,
    data: &[u8],
) -> Result<()> {
    let prepared = prepare(transcoder, data);
    if prepared.width == 0 || prepared.height == 0 {
        return Err(BildmappeError::RenderError(
            "front-page image has unreadable dimensions".into(),
        ));
    }

    sink.add_image(
        &prepared,
        transform.x(x_px),
        transform.y(y_px),
        transform.x(width_px),
        transform.y(height_px),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([60, 90, 120]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn comment_image_preserves_intrinsic_aspect_ratio() {
        let mut sink = RecordingSink::a4();
        // Landscape page: scale_x != scale_y.
        let transform = CanvasTransform::for_page(297.0, 210.0);
        let transcoder = Transcoder::new(1920, 0.75);
        let content = ImageContent {
            data: png_bytes(40, 20),
            width: Some(100.0),
            opacity: None,
        };

        render_comment_image(&mut sink, &transform, &transcoder, 0.0, 0.0, &content).unwrap();

        let (_, _, w, h) = sink.images()[0];
        // Height derives from the 2:1 image ratio, not from scale_y.
        assert!((w / h - 2.0).abs() < 1e-3);
        assert!((w - 100.0 * transform.scale_x).abs() < 1e-3);
    }

    #[test]
    fn comment_image_width_defaults_to_200px() {
        let mut sink = RecordingSink::a4();
        let transform = CanvasTransform::for_page(210.0, 297.0);
        let transcoder = Transcoder::new(1920, 0.75);
        let content = ImageContent {
            data: png_bytes(10, 10),
            width: None,
            opacity: None,
        };

        render_comment_image(&mut sink, &transform, &transcoder, 0.0, 0.0, &content).unwrap();

        let (_, _, w, _) = sink.images()[0];
        assert!((w - 200.0 * transform.scale_x).abs() < 1e-3);
    }

    #[test]
    fn front_image_scales_axes_independently() {
        let mut sink = RecordingSink::new(297.0, 210.0);
        let transform = CanvasTransform::for_page(297.0, 210.0);
        let transcoder = Transcoder::new(1920, 0.75);

        render_front_image(
            &mut sink,
            &transform,
            &transcoder,
            10.0,
            20.0,
            100.0,
            100.0,
            &png_bytes(40, 20),
        )
        .unwrap();

        let (x, y, w, h) = sink.images()[0];
        // A square element box ends up non-square: each axis uses its own
        // scale factor regardless of the image's 2:1 ratio.
        assert!((x - 10.0 * transform.scale_x).abs() < 1e-3);
        assert!((y - 20.0 * transform.scale_y).abs() < 1e-3);
        assert!((w - 100.0 * transform.scale_x).abs() < 1e-3);
        assert!((h - 100.0 * transform.scale_y).abs() < 1e-3);
        assert!(w != h);
    }

    #[test]
    fn unreadable_image_is_an_error_not_a_panic() {
        let mut sink = RecordingSink::a4();
        let transform = CanvasTransform::for_page(210.0, 297.0);
        let transcoder = Transcoder::new(1920, 0.75);
        let content = ImageContent {
            data: vec![1, 2, 3],
            width: None,
            opacity: None,
        };

        let result =
            render_comment_image(&mut sink, &transform, &transcoder, 0.0, 0.0, &content);
        assert!(result.is_err());
        assert!(sink.images().is_empty());
    }
}
