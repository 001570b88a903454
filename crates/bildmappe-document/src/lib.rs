// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildmappe-document — Document composition for the Bildmappe export engine.
//
// Turns two independent element collections (custom front page, multi-page
// comment layer) and a sequence of whole-page images into one paginated PDF.
// The pipeline is: coordinate transform (pixel canvas → page mm), pagination
// resolver (spatial page grouping), image transcoder (downscale + JPEG
// re-encode to cap output size), element renderers, and the composer that
// sequences the optional sections onto a page sink.

pub mod compose;
pub mod geometry;
pub mod paginate;
pub mod render;
pub mod sink;
pub mod transcode;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the primary types so callers can use `bildmappe_document::Composer` etc.
pub use compose::{ComposeSummary, Composer, PageImage, PageImageSource};
pub use geometry::CanvasTransform;
pub use paginate::resolve_pages;
pub use sink::{PageSink, PdfSink};
pub use transcode::{EncodedImage, ImageEncoding, Transcoder};
