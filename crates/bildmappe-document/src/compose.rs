// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document composer — sequences the optional sections into one PDF pass.
//
// Section order is fixed: front page (custom designer page, else automatic
// title page), comment pages, whole-page images. Each content page is opened
// through the `Sections` cursor, which owns the "has anything been emitted
// yet" state and requests a page break for every page after the first. The
// whole pass is best-effort: a failing element or image is logged, counted,
// and skipped — a document is always produced.
//
// Everything runs on one thread as a sequential fold. Decode and transcode
// happen inline, one item at a time, so page order is deterministic and at
// most one transient raster buffer is alive at any point.

use std::collections::BTreeMap;

use bildmappe_core::error::{BildmappeError, Result};
use bildmappe_core::layout::PAGE_IMAGE_MARGIN_MM;
use bildmappe_core::{CommentElement, ExportConfig, FontStyle, Rgb};
use chrono::{Datelike, Local, NaiveDate};
use image::DynamicImage;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::geometry::CanvasTransform;
use crate::paginate::resolve_pages;
use crate::render;
use crate::sink::{PageSink, PdfSink};
use crate::transcode::Transcoder;

/// Fixed caption on the automatic title page.
const FOOTER_CAPTION: &str = "Erstellt mit Bildmappe";

const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// A whole-page image: sole content of one output page.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Display name, painted below the image when enabled.
    pub name: String,
    pub source: PageImageSource,
}

/// Where the image's pixels come from. Exactly one source per image; an
/// unreadable source is skipped, never fatal.
#[derive(Debug, Clone)]
pub enum PageImageSource {
    /// Encoded raster bytes (PNG, JPEG, ...).
    Encoded(Vec<u8>),
    /// An already-decoded raster surface.
    Raster(DynamicImage),
}

impl PageImage {
    pub fn from_encoded(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: PageImageSource::Encoded(data),
        }
    }

    pub fn from_raster(name: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            name: name.into(),
            source: PageImageSource::Raster(image),
        }
    }
}

/// Outcome of one composition pass. The pass itself never fails; callers
/// inspect the counters to surface partial success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeSummary {
    /// Content-bearing pages emitted.
    pub pages: u32,
    pub images_placed: u32,
    pub images_failed: u32,
    pub elements_skipped: u32,
}

/// Page cursor: tracks whether any page has been emitted and requests a
/// break before every page except the very first.
#[derive(Default)]
struct Sections {
    page_added: bool,
    pages: u32,
}

impl Sections {
    fn begin_page(&mut self, sink: &mut dyn PageSink) {
        if self.page_added {
            sink.add_page();
        }
        self.page_added = true;
        self.pages += 1;
    }
}

/// Top-level orchestration for one export pass.
pub struct Composer {
    config: ExportConfig,
}

impl Composer {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run the section sequence against an arbitrary sink.
    #[instrument(skip_all, fields(images = images.len()))]
    pub fn compose(&self, images: &[PageImage], sink: &mut dyn PageSink) -> ComposeSummary {
        let transcoder = Transcoder::new(
            self.config.max_image_dimension,
            self.config.jpeg_quality(),
        );
        let mut sections = Sections::default();
        let mut summary = ComposeSummary::default();

        info!(
            images = images.len(),
            comment_elements = self.config.comment_page_elements.len(),
            front_elements = self.config.front_page_elements.len(),
            quality = self.config.jpeg_quality(),
            max_dimension = self.config.max_image_dimension,
            "starting PDF composition"
        );

        // Front section — mutually exclusive: the designer page wins, the
        // automatic title page is the fallback. At most one of the two runs.
        if self.config.include_custom_front_page && !self.config.front_page_elements.is_empty() {
            sections.begin_page(sink);
            self.render_front_page(sink, &transcoder, &mut summary);
        } else if self.config.include_title_page {
            sections.begin_page(sink);
            self.render_title_page(sink, images.len());
        }

        // Comment section.
        if self.config.include_comment_pages && !self.config.comment_page_elements.is_empty() {
            self.render_comment_section(sink, &transcoder, &mut sections, &mut summary);
        }

        // Whole-page image section.
        if self.config.include_images && !images.is_empty() {
            for image in images {
                // The page is opened before the attempt: a failed image
                // leaves its page blank rather than shifting later images.
                sections.begin_page(sink);
                match self.place_page_image(sink, &transcoder, image) {
                    Ok(()) => summary.images_placed += 1,
                    Err(err) => {
                        warn!(image = %image.name, %err, "page image skipped");
                        summary.images_failed += 1;
                    }
                }
            }
        }

        summary.pages = sections.pages;
        info!(
            pages = summary.pages,
            placed = summary.images_placed,
            failed = summary.images_failed,
            skipped = summary.elements_skipped,
            "composition finished"
        );
        summary
    }

    /// Compose into a fresh PDF sink and serialise.
    pub fn export_pdf(&self, images: &[PageImage]) -> (Vec<u8>, ComposeSummary) {
        let (page_w, page_h) = self.config.orientation.page_size_mm();
        let mut sink = PdfSink::new(&self.config.title, page_w, page_h);
        let summary = self.compose(images, &mut sink);
        (sink.finish(), summary)
    }

    /// Compose and write the document under the resolved filename.
    pub fn export_to_file(
        &self,
        images: &[PageImage],
        filename: Option<&str>,
    ) -> Result<(String, ComposeSummary)> {
        let name = self.config.resolve_filename(filename);
        let (bytes, summary) = self.export_pdf(images);
        std::fs::write(&name, &bytes)?;
        info!(file = %name, pages = summary.pages, "PDF export complete");
        Ok((name, summary))
    }

    // -- Front section --------------------------------------------------------

    fn render_front_page(
        &self,
        sink: &mut dyn PageSink,
        transcoder: &Transcoder,
        summary: &mut ComposeSummary,
    ) {
        let transform = CanvasTransform::for_page(sink.page_width(), sink.page_height());

        // No z-order on this surface: paint top-to-bottom by position.
        let mut elements: Vec<_> = self.config.front_page_elements.iter().collect();
        elements.sort_by(|a, b| a.y.total_cmp(&b.y));

        for element in elements {
            if let Err(err) = render::render_front_element(sink, &transform, transcoder, element)
            {
                warn!(element = %element.id, %err, "front-page element skipped");
                summary.elements_skipped += 1;
            }
        }
    }

    fn render_title_page(&self, sink: &mut dyn PageSink, image_count: usize) {
        let page_h = sink.page_height();
        let base_y = page_h / 3.0;

        sink.set_font_size(32.0);
        sink.set_font(FontStyle::Bold);
        sink.set_text_color(Rgb::new(102, 126, 234));
        centered(sink, &self.config.title, base_y);

        sink.set_font_size(18.0);
        sink.set_font(FontStyle::Regular);
        sink.set_text_color(Rgb::new(60, 60, 60));
        let count_text = if image_count == 1 {
            "1 Bild".to_string()
        } else {
            format!("{} Bilder", image_count)
        };
        centered(sink, &count_text, base_y + 20.0);

        if let Some(author) = &self.config.author {
            sink.set_font_size(14.0);
            sink.set_text_color(Rgb::new(120, 120, 120));
            centered(sink, &format!("Autor: {}", author), base_y + 35.0);
        }

        sink.set_font_size(12.0);
        sink.set_text_color(Rgb::new(150, 150, 150));
        centered(sink, &german_long_date(Local::now().date_naive()), base_y + 50.0);

        sink.set_font_size(10.0);
        sink.set_text_color(Rgb::new(180, 180, 180));
        centered(sink, FOOTER_CAPTION, page_h - 20.0);
    }

    // -- Comment section ------------------------------------------------------

    fn render_comment_section(
        &self,
        sink: &mut dyn PageSink,
        transcoder: &Transcoder,
        sections: &mut Sections,
        summary: &mut ComposeSummary,
    ) {
        let resolved = resolve_pages(&self.config.comment_page_elements);

        // Group by resolved page; the BTreeMap walks pages in ascending order.
        let mut by_page: BTreeMap<u32, Vec<&CommentElement>> = BTreeMap::new();
        for element in &resolved {
            by_page
                .entry(element.page.unwrap_or(1))
                .or_default()
                .push(element);
        }
        let total_pages = by_page.len();

        for (page_number, mut elements) in by_page {
            sections.begin_page(sink);
            let transform = CanvasTransform::for_page(sink.page_width(), sink.page_height());

            elements.sort_by_key(|element| element.z_index);
            for element in elements {
                if let Err(err) =
                    render::render_comment_element(sink, &transform, transcoder, element)
                {
                    warn!(element = %element.id, %err, "comment element skipped");
                    summary.elements_skipped += 1;
                }
            }

            self.render_comment_footer(sink, page_number, total_pages);
        }
    }

    fn render_comment_footer(&self, sink: &mut dyn PageSink, page_number: u32, total_pages: usize) {
        sink.set_font_size(9.0);
        sink.set_font(FontStyle::Regular);
        sink.set_text_color(Rgb::new(150, 150, 150));

        let date = german_short_date(Local::now().date_naive());
        let mut footer = format!("Erstellt am {} • Kommentarseite {}", date, page_number);
        if total_pages > 1 {
            footer.push_str(&format!(" von {}", total_pages));
        }
        let footer_y = sink.page_height() - 10.0;
        centered(sink, &footer, footer_y);
    }

    // -- Image section --------------------------------------------------------

    fn place_page_image(
        &self,
        sink: &mut dyn PageSink,
        transcoder: &Transcoder,
        image: &PageImage,
    ) -> Result<()> {
        let encoded = match &image.source {
            PageImageSource::Encoded(data) => transcoder.transcode_bytes(data),
            PageImageSource::Raster(surface) => transcoder.transcode_raster(surface)?,
        };
        let aspect = encoded.aspect_ratio().ok_or_else(|| {
            BildmappeError::ImageError(format!("'{}' has unreadable dimensions", image.name))
        })?;

        let page_w = sink.page_width();
        let page_h = sink.page_height();
        let margin = PAGE_IMAGE_MARGIN_MM;

        // Fit within the margins, preserving the image's own aspect ratio.
        let mut width = page_w - margin * 2.0;
        let mut height = width / aspect;
        if height > page_h - margin * 2.0 {
            height = page_h - margin * 2.0;
            width = height * aspect;
        }

        let x = (page_w - width) / 2.0;
        let y = (page_h - height) / 2.0;
        sink.add_image(&encoded, x, y, width, height)?;

        if self.config.include_file_name {
            sink.set_font_size(10.0);
            sink.set_font(FontStyle::Regular);
            sink.set_text_color(Rgb::new(120, 120, 120));
            centered(sink, &image.name, y + height + 5.0);
        }
        Ok(())
    }
}

/// Paint a line centred horizontally at the given vertical position.
fn centered(sink: &mut dyn PageSink, s: &str, y: f32) {
    let x = (sink.page_width() - sink.text_width(s)) / 2.0;
    sink.text(s, x, y);
}

/// Long-form German date for the title page, e.g. "15. Januar 2026".
fn german_long_date(date: NaiveDate) -> String {
    format!(
        "{}. {} {}",
        date.day(),
        GERMAN_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Short German date for footers, e.g. "15.1.2026".
fn german_short_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}
