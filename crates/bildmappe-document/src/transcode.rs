// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image transcoder — downscale and re-encode raster data to keep output small.
//
// Everything that passes through here comes out as JPEG at the configured
// quality, regardless of the input format; the fidelity loss is the price of
// a small output file. Failures are non-fatal by contract: the original
// bytes are returned unmodified and the caller carries on.

use std::io::Cursor;

use bildmappe_core::error::{BildmappeError, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::{debug, instrument, warn};

/// Declared encoding of a raster blob, sniffed from its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Jpeg,
    Png,
    Other,
}

impl ImageEncoding {
    /// Sniff the encoding from the blob's magic bytes.
    pub fn sniff(data: &[u8]) -> Self {
        match image::guess_format(data) {
            Ok(ImageFormat::Jpeg) => Self::Jpeg,
            Ok(ImageFormat::Png) => Self::Png,
            _ => Self::Other,
        }
    }

    /// Whether this encoding still needs the lossy re-encode pass.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

/// An encoded raster blob together with its declared format and intrinsic
/// pixel dimensions.
///
/// Dimensions are `0×0` when the bytes could not be read; renderers treat
/// that as a skippable element rather than an error.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub encoding: ImageEncoding,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// Wrap already-encoded bytes, sniffing format and header dimensions.
    pub fn from_encoded(data: Vec<u8>) -> Self {
        let encoding = ImageEncoding::sniff(&data);
        let (width, height) = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok())
            .unwrap_or((0, 0));
        Self {
            data,
            encoding,
            width,
            height,
        }
    }

    /// Aspect ratio from the intrinsic dimensions, or `None` when unknown.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }
}

/// Compute target dimensions for the downscale rule.
///
/// Both sides within `max` → unchanged. Otherwise the larger side is clamped
/// to `max` and the other side scales by the same ratio, rounded to nearest.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    if width > height {
        let scaled = (height as f32 / width as f32 * max as f32).round() as u32;
        (max, scaled)
    } else {
        let scaled = (width as f32 / height as f32 * max as f32).round() as u32;
        (scaled, max)
    }
}

/// Resize-and-re-encode pipeline with fixed settings for one export pass.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder {
    max_dimension: u32,
    /// JPEG quality in 0.0–1.0.
    quality: f32,
}

impl Transcoder {
    pub fn new(max_dimension: u32, quality: f32) -> Self {
        Self {
            max_dimension,
            quality,
        }
    }

    /// Quality mapped to the JPEG encoder's 1–100 scale.
    fn encoder_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }

    /// Decode, downscale, and re-encode a blob as JPEG.
    ///
    /// Never fails: if the bytes cannot be decoded or the encoder is
    /// unavailable, the original blob comes back unmodified (original format,
    /// original dimensions).
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn transcode_bytes(&self, data: &[u8]) -> EncodedImage {
        let decoded = match image::load_from_memory(data) {
            Ok(img) => img,
            Err(err) => {
                warn!(%err, "image decode failed — using original bytes");
                return EncodedImage::from_encoded(data.to_vec());
            }
        };

        match self.transcode_raster(&decoded) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(%err, "JPEG re-encode failed — using original bytes");
                EncodedImage::from_encoded(data.to_vec())
            }
        }
    }

    /// Downscale and JPEG-encode an already-decoded raster surface.
    ///
    /// The resized buffer is transient: it lives only for this call.
    pub fn transcode_raster(&self, source: &DynamicImage) -> Result<EncodedImage> {
        let (width, height) = (source.width(), source.height());
        let (target_w, target_h) = fit_within(width, height, self.max_dimension);

        let resized: DynamicImage;
        let working = if (target_w, target_h) == (width, height) {
            source
        } else {
            debug!(
                from_w = width,
                from_h = height,
                to_w = target_w,
                to_h = target_h,
                "downscaling image"
            );
            resized = source.resize_exact(
                target_w,
                target_h,
                image::imageops::FilterType::Lanczos3,
            );
            &resized
        };

        let mut buffer = Vec::new();
        let rgb = working.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            &mut buffer,
            self.encoder_quality(),
        );
        rgb.write_with_encoder(encoder)
            .map_err(|err| BildmappeError::ImageError(format!("JPEG encoding failed: {}", err)))?;

        Ok(EncodedImage {
            data: buffer,
            encoding: ImageEncoding::Jpeg,
            width: target_w,
            height: target_h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 120, 40]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn oversized_image_clamps_to_max_dimension() {
        assert_eq!(fit_within(3000, 2000, 1920), (1920, 1280));
    }

    #[test]
    fn tall_image_clamps_on_height() {
        assert_eq!(fit_within(2000, 3000, 1920), (1280, 1920));
    }

    #[test]
    fn small_image_keeps_its_dimensions() {
        assert_eq!(fit_within(800, 600, 1920), (800, 600));
    }

    #[test]
    fn transcode_converts_png_to_jpeg() {
        let transcoder = Transcoder::new(1920, 0.75);
        let result = transcoder.transcode_bytes(&png_bytes(40, 30));
        assert_eq!(result.encoding, ImageEncoding::Jpeg);
        assert_eq!((result.width, result.height), (40, 30));
    }

    #[test]
    fn transcode_downscales_past_limit() {
        let transcoder = Transcoder::new(192, 0.75);
        let result = transcoder.transcode_bytes(&png_bytes(600, 400));
        assert_eq!((result.width, result.height), (192, 128));
        assert_eq!(result.encoding, ImageEncoding::Jpeg);
    }

    #[test]
    fn transcode_is_idempotent_on_format() {
        let transcoder = Transcoder::new(1920, 0.6);
        let first = transcoder.transcode_bytes(&png_bytes(40, 30));
        let second = transcoder.transcode_bytes(&first.data);
        assert_eq!(first.encoding, ImageEncoding::Jpeg);
        assert_eq!(second.encoding, ImageEncoding::Jpeg);
        assert_eq!((second.width, second.height), (first.width, first.height));
    }

    #[test]
    fn undecodable_bytes_fall_back_to_original() {
        let transcoder = Transcoder::new(1920, 0.75);
        let garbage = vec![0u8, 1, 2, 3, 4, 5];
        let result = transcoder.transcode_bytes(&garbage);
        assert_eq!(result.data, garbage);
        assert_eq!(result.encoding, ImageEncoding::Other);
        assert_eq!((result.width, result.height), (0, 0));
    }

    #[test]
    fn sniff_recognises_formats() {
        assert_eq!(ImageEncoding::sniff(&png_bytes(4, 4)), ImageEncoding::Png);
        let jpeg = Transcoder::new(1920, 0.75).transcode_bytes(&png_bytes(4, 4));
        assert_eq!(ImageEncoding::sniff(&jpeg.data), ImageEncoding::Jpeg);
    }
}
