// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export configuration.
//
// One immutable `ExportConfig` drives a single composition pass. It decides
// which optional sections the composer emits and how aggressively images are
// recompressed.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::types::{CommentElement, FrontPageElement, Orientation};

/// JPEG quality chosen when the caller enables size optimisation.
const OPTIMIZED_QUALITY: f32 = 0.65;

/// JPEG quality used when nothing more specific is requested.
const DEFAULT_QUALITY: f32 = 0.75;

/// Settings for one PDF export pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Document title, shown on the automatic title page.
    pub title: String,
    /// Optional author line on the automatic title page.
    pub author: Option<String>,
    /// Emit the automatic title page (ignored when a custom front page wins).
    pub include_title_page: bool,
    /// Prefer the designer-built front page over the automatic title page.
    pub include_custom_front_page: bool,
    pub front_page_elements: Vec<FrontPageElement>,
    /// Emit the comment layer as its own pages.
    pub include_comment_pages: bool,
    pub comment_page_elements: Vec<CommentElement>,
    /// Caption each whole-page image with its display name.
    pub include_file_name: bool,
    /// Emit the whole-page image section.
    pub include_images: bool,
    /// Explicit JPEG quality (0.0–1.0); overrides `optimize_size`.
    pub image_quality: Option<f32>,
    /// Images larger than this on either axis are downscaled (pixels).
    pub max_image_dimension: u32,
    /// Trade image quality for a smaller file.
    pub optimize_size: bool,
    pub orientation: Orientation,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Bildersammlung".into(),
            author: None,
            include_title_page: true,
            include_custom_front_page: false,
            front_page_elements: Vec::new(),
            include_comment_pages: false,
            comment_page_elements: Vec::new(),
            include_file_name: true,
            include_images: true,
            image_quality: None,
            max_image_dimension: 1920,
            optimize_size: false,
            orientation: Orientation::Portrait,
        }
    }
}

impl ExportConfig {
    /// Effective JPEG quality for this pass.
    ///
    /// An explicit `image_quality` always wins; otherwise `optimize_size`
    /// selects a lower quality than the default.
    pub fn jpeg_quality(&self) -> f32 {
        match self.image_quality {
            Some(quality) => quality,
            None if self.optimize_size => OPTIMIZED_QUALITY,
            None => DEFAULT_QUALITY,
        }
    }

    /// Resolve the output filename: the caller's choice, or the default
    /// pattern embedding today's date.
    pub fn resolve_filename(&self, filename: Option<&str>) -> String {
        match filename {
            Some(name) => name.to_string(),
            None => format!("bilder-export-{}.pdf", Local::now().format("%Y-%m-%d")),
        }
    }
}
