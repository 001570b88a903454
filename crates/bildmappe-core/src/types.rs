// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildmappe export engine.
//
// Elements arrive from two independent design surfaces: a single front page
// and a multi-page comment layer. Both author in the same fixed pixel space
// (see `layout`), but carry slightly different fields — comment elements have
// an explicit z-order and an optional page number, front-page elements have
// explicit extents and derive paint order from position. The two collections
// never share an identifier namespace.

use serde::{Deserialize, Serialize};

use crate::layout;

/// Horizontal text alignment within a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight for front-page text (the front-page designer exposes no
/// italic toggle).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Resolved font style as fed to the page sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Resolve the comment-layer bold/italic toggles into a style.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => Self::BoldItalic,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }
}

impl From<FontWeight> for FontStyle {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Normal => Self::Regular,
            FontWeight::Bold => Self::Bold,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// A4 page dimensions in millimetres (width, height) for this orientation.
    pub fn page_size_mm(&self) -> (f32, f32) {
        match self {
            Self::Portrait => (210.0, 297.0),
            Self::Landscape => (297.0, 210.0),
        }
    }
}

// -- Comment layer --------------------------------------------------------

/// A positioned element on the comment layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentElement {
    /// Identifier, unique within the comment collection.
    pub id: String,
    /// Horizontal position in canvas pixels.
    pub x: f32,
    /// Vertical position in canvas pixels.
    pub y: f32,
    /// Paint order within a page (lower paints first).
    #[serde(default)]
    pub z_index: i32,
    /// 1-based page number; computed by the pagination resolver when absent.
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(flatten)]
    pub content: ElementContent,
}

/// Variant payload of a comment element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementContent {
    Text(TextContent),
    Image(ImageContent),
}

/// Text payload on the comment layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub content: String,
    /// Font size in canvas pixels; defaults per `layout::DEFAULT_FONT_SIZE_PX`.
    #[serde(default)]
    pub font_size: Option<f32>,
    /// 6-digit hex color; black when absent or unparseable.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TextContent {
    pub fn style(&self) -> FontStyle {
        FontStyle::from_flags(self.bold, self.italic)
    }

    /// Effective font size in canvas pixels.
    pub fn font_size_px(&self) -> f32 {
        self.font_size.unwrap_or(layout::DEFAULT_FONT_SIZE_PX)
    }
}

/// Image payload on the comment layer. `data` holds encoded raster bytes
/// (PNG or JPEG) exactly as the design surface captured them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub data: Vec<u8>,
    /// Display width in canvas pixels; height follows the image's own aspect
    /// ratio.
    #[serde(default)]
    pub width: Option<f32>,
    /// Carried from the designer but not applied downstream.
    #[serde(default)]
    pub opacity: Option<f32>,
}

// -- Front page -----------------------------------------------------------

/// A positioned element on the custom front page. Paint order is derived
/// from vertical position; there is no z-index on this surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontPageElement {
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// Explicit extent in canvas pixels.
    pub width: f32,
    pub height: f32,
    #[serde(flatten)]
    pub content: FrontPageContent,
}

/// Variant payload of a front-page element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FrontPageContent {
    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        #[serde(default)]
        font_size: Option<f32>,
        #[serde(default)]
        font_weight: FontWeight,
        #[serde(default)]
        text_align: TextAlign,
        #[serde(default)]
        color: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        data: Vec<u8>,
        /// Informational only — the designer records the source dimensions,
        /// but placement uses the element's explicit width/height.
        #[serde(default)]
        original_width: Option<f32>,
        #[serde(default)]
        original_height: Option<f32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_resolution_covers_all_flag_combinations() {
        assert_eq!(FontStyle::from_flags(false, false), FontStyle::Regular);
        assert_eq!(FontStyle::from_flags(true, false), FontStyle::Bold);
        assert_eq!(FontStyle::from_flags(false, true), FontStyle::Italic);
        assert_eq!(FontStyle::from_flags(true, true), FontStyle::BoldItalic);
    }

    #[test]
    fn front_page_weight_maps_to_two_styles() {
        assert_eq!(FontStyle::from(FontWeight::Normal), FontStyle::Regular);
        assert_eq!(FontStyle::from(FontWeight::Bold), FontStyle::Bold);
    }

    #[test]
    fn landscape_swaps_page_dimensions() {
        assert_eq!(Orientation::Portrait.page_size_mm(), (210.0, 297.0));
        assert_eq!(Orientation::Landscape.page_size_mm(), (297.0, 210.0));
    }

    #[test]
    fn comment_element_deserializes_from_designer_json() {
        let json = r#"{
            "id": "el-1",
            "type": "text",
            "x": 40.0,
            "y": 120.0,
            "zIndex": 2,
            "content": "Hallo",
            "fontSize": 18,
            "align": "center",
            "bold": true
        }"#;
        let element: CommentElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.id, "el-1");
        assert_eq!(element.z_index, 2);
        assert_eq!(element.page, None);
        match &element.content {
            ElementContent::Text(text) => {
                assert_eq!(text.content, "Hallo");
                assert_eq!(text.align, TextAlign::Center);
                assert_eq!(text.style(), FontStyle::Bold);
            }
            ElementContent::Image(_) => panic!("expected text element"),
        }
    }

    #[test]
    fn font_size_defaults_when_absent() {
        let text = TextContent {
            content: "x".into(),
            font_size: None,
            color: None,
            align: TextAlign::Left,
            bold: false,
            italic: false,
        };
        assert_eq!(text.font_size_px(), layout::DEFAULT_FONT_SIZE_PX);
    }
}
