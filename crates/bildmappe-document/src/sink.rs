// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page sink — the minimal document-writing surface the composer drives.
//
// `PdfSink` implements it over printpdf 0.8's data-oriented API: pages are
// accumulated as `Vec<Op>` operation lists and serialised once at the end via
// `PdfDocument::save()`. Coordinates arrive top-left in millimetres (the
// composer's space) and are converted to printpdf's bottom-left point space
// here and nowhere else.

use std::mem;
use std::path::Path;

use bildmappe_core::error::{BildmappeError, Result};
use bildmappe_core::{FontStyle, Rgb};
use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, Rgb as PdfRgb, TextItem, XObjectTransform,
};
use tracing::{debug, info};

use crate::transcode::EncodedImage;

/// Average Helvetica glyph width as a fraction of the font size, in points.
const AVG_GLYPH_WIDTH_FACTOR: f32 = 0.50;

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 0.3528;

/// The capability set the composer requires from a document backend.
///
/// Positions and extents are in millimetres from the top-left page corner;
/// font sizes are in points. The sink starts with one open page, so the
/// composer only ever requests *additional* pages.
pub trait PageSink {
    /// Finish the current page and open a new one.
    fn add_page(&mut self);

    /// Place an encoded raster at the given position and extent.
    fn add_image(&mut self, image: &EncodedImage, x: f32, y: f32, w: f32, h: f32) -> Result<()>;

    fn set_font(&mut self, style: FontStyle);
    fn set_font_size(&mut self, size_pt: f32);
    fn set_text_color(&mut self, color: Rgb);

    /// Paint a single line of text with the current font state.
    fn text(&mut self, s: &str, x: f32, y: f32);

    /// Estimated width of `s` in millimetres at the current font size.
    fn text_width(&self, s: &str) -> f32;

    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
}

/// printpdf-backed page sink.
pub struct PdfSink {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    page_w: Mm,
    page_h: Mm,
    font: BuiltinFont,
    font_size: Pt,
    color: Rgb,
    warnings: Vec<PdfWarnMsg>,
}

impl PdfSink {
    /// Create a sink with one open page of the given size.
    pub fn new(title: &str, page_width_mm: f32, page_height_mm: f32) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            ops: Vec::new(),
            page_w: Mm(page_width_mm),
            page_h: Mm(page_height_mm),
            font: BuiltinFont::Helvetica,
            font_size: Pt(12.0),
            color: Rgb::BLACK,
            warnings: Vec::new(),
        }
    }

    /// Flush the open page and serialise the document.
    pub fn finish(mut self) -> Vec<u8> {
        self.pages
            .push(PdfPage::new(self.page_w, self.page_h, mem::take(&mut self.ops)));

        debug!(pages = self.pages.len(), "serialising document");
        self.doc.with_pages(mem::take(&mut self.pages));

        let mut warnings = mem::take(&mut self.warnings);
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        info!(bytes = bytes.len(), "document serialised");
        bytes
    }

    /// Serialise and write the document to a file.
    pub fn save_to_file(self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finish();
        std::fs::write(path.as_ref(), &bytes)?;
        info!("wrote PDF to {}", path.as_ref().display());
        Ok(())
    }

    fn builtin_font(style: FontStyle) -> BuiltinFont {
        match style {
            FontStyle::Regular => BuiltinFont::Helvetica,
            FontStyle::Bold => BuiltinFont::HelveticaBold,
            FontStyle::Italic => BuiltinFont::HelveticaOblique,
            FontStyle::BoldItalic => BuiltinFont::HelveticaBoldOblique,
        }
    }
}

impl PageSink for PdfSink {
    fn add_page(&mut self) {
        self.pages
            .push(PdfPage::new(self.page_w, self.page_h, mem::take(&mut self.ops)));
    }

    fn add_image(&mut self, image: &EncodedImage, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        // Decode to RGB8 pixels for embedding; printpdf re-compresses on save.
        let decoded = image::load_from_memory(&image.data).map_err(|err| {
            BildmappeError::ImageError(format!("failed to decode image for embedding: {}", err))
        })?;
        let px_w = decoded.width();
        let px_h = decoded.height();
        let rgb = decoded.to_rgb8();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: px_w as usize,
            height: px_h as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // At 72 DPI the image's native size in points equals its pixel size,
        // so the scale factors are just target-over-native.
        let dpi: f32 = 72.0;
        let target_w_pt = Mm(w).into_pt().0;
        let target_h_pt = Mm(h).into_pt().0;
        let scale_x = target_w_pt / px_w as f32;
        let scale_y = target_h_pt / px_h as f32;

        // printpdf places the XObject from its bottom-left corner.
        let x_pt = Mm(x).into_pt().0;
        let y_pt = self.page_h.into_pt().0 - Mm(y).into_pt().0 - target_h_pt;

        self.ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_pt)),
                translate_y: Some(Pt(y_pt)),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                rotate: None,
            },
        });
        Ok(())
    }

    fn set_font(&mut self, style: FontStyle) {
        self.font = Self::builtin_font(style);
    }

    fn set_font_size(&mut self, size_pt: f32) {
        self.font_size = Pt(size_pt);
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn text(&mut self, s: &str, x: f32, y: f32) {
        // Baseline at `y` from the page top, like the canvas the elements
        // were authored on.
        let x_pt = Mm(x).into_pt().0;
        let y_pt = self.page_h.into_pt().0 - Mm(y).into_pt().0;

        self.ops.push(Op::SetFillColor {
            col: Color::Rgb(PdfRgb {
                r: self.color.r as f32 / 255.0,
                g: self.color.g as f32 / 255.0,
                b: self.color.b as f32 / 255.0,
                icc_profile: None,
            }),
        });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(x_pt),
                y: Pt(y_pt),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: self.font_size,
            font: self.font,
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(s.to_string())],
            font: self.font,
        });
        self.ops.push(Op::EndTextSection);
    }

    fn text_width(&self, s: &str) -> f32 {
        // Approximation based on the average Helvetica glyph width; good
        // enough for centring and right-aligning.
        s.chars().count() as f32 * AVG_GLYPH_WIDTH_FACTOR * self.font_size.0 * MM_PER_PT
    }

    fn page_width(&self) -> f32 {
        self.page_w.0
    }

    fn page_height(&self) -> f32 {
        self.page_h.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::Transcoder;
    use image::{DynamicImage, RgbImage};

    fn sample_image() -> EncodedImage {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30])));
        Transcoder::new(1920, 0.75).transcode_raster(&img).unwrap()
    }

    #[test]
    fn finish_emits_at_least_one_page() {
        let sink = PdfSink::new("Test", 210.0, 297.0);
        let bytes = sink.finish();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn text_and_image_ops_serialise() {
        let mut sink = PdfSink::new("Test", 210.0, 297.0);
        sink.set_font(FontStyle::Bold);
        sink.set_font_size(14.0);
        sink.set_text_color(Rgb::new(120, 120, 120));
        sink.text("Hallo Welt", 20.0, 40.0);
        sink.add_image(&sample_image(), 10.0, 60.0, 80.0, 60.0).unwrap();
        sink.add_page();
        sink.text("Seite 2", 20.0, 40.0);

        let bytes = sink.finish();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn text_width_scales_with_font_size() {
        let mut sink = PdfSink::new("Test", 210.0, 297.0);
        sink.set_font_size(10.0);
        let narrow = sink.text_width("abc");
        sink.set_font_size(20.0);
        let wide = sink.text_width("abc");
        assert!((wide - 2.0 * narrow).abs() < 1e-4);
    }

    #[test]
    fn undecodable_image_is_an_error() {
        let mut sink = PdfSink::new("Test", 210.0, 297.0);
        let bad = EncodedImage::from_encoded(vec![0, 1, 2, 3]);
        assert!(sink.add_image(&bad, 0.0, 0.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn save_to_file_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let mut sink = PdfSink::new("Test", 210.0, 297.0);
        sink.text("Datei", 20.0, 40.0);
        sink.save_to_file(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
