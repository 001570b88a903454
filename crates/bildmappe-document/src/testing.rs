// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording fake sink for composer and renderer tests.

use bildmappe_core::error::Result;
use bildmappe_core::{FontStyle, Rgb};

use crate::sink::PageSink;
use crate::transcode::EncodedImage;

/// One recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PageBreak,
    Text { s: String, x: f32, y: f32 },
    Image { x: f32, y: f32, w: f32, h: f32 },
}

/// In-memory sink that records every call instead of painting.
///
/// Mirrors `PdfSink`'s text-width approximation so alignment math matches
/// between the fake and the real backend.
pub struct RecordingSink {
    pub events: Vec<Event>,
    pub fonts: Vec<FontStyle>,
    pub colors: Vec<Rgb>,
    page_w: f32,
    page_h: f32,
    font_size: f32,
    /// When set, every `add_image` call fails — for fault-isolation tests.
    pub fail_images: bool,
}

impl RecordingSink {
    pub fn new(page_w: f32, page_h: f32) -> Self {
        Self {
            events: Vec::new(),
            fonts: Vec::new(),
            colors: Vec::new(),
            page_w,
            page_h,
            font_size: 12.0,
            fail_images: false,
        }
    }

    pub fn a4() -> Self {
        Self::new(210.0, 297.0)
    }

    pub fn page_breaks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::PageBreak))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Text { s, .. } => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<(f32, f32, f32, f32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Image { x, y, w, h } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }
}

impl PageSink for RecordingSink {
    fn add_page(&mut self) {
        self.events.push(Event::PageBreak);
    }

    fn add_image(&mut self, _image: &EncodedImage, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        if self.fail_images {
            return Err(bildmappe_core::BildmappeError::ImageError(
                "simulated placement failure".into(),
            ));
        }
        self.events.push(Event::Image { x, y, w, h });
        Ok(())
    }

    fn set_font(&mut self, style: FontStyle) {
        self.fonts.push(style);
    }

    fn set_font_size(&mut self, size_pt: f32) {
        self.font_size = size_pt;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.colors.push(color);
    }

    fn text(&mut self, s: &str, x: f32, y: f32) {
        self.events.push(Event::Text {
            s: s.to_string(),
            x,
            y,
        });
    }

    fn text_width(&self, s: &str) -> f32 {
        s.chars().count() as f32 * 0.50 * self.font_size * 0.3528
    }

    fn page_width(&self) -> f32 {
        self.page_w
    }

    fn page_height(&self) -> f32 {
        self.page_h
    }
}
