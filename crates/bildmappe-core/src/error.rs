// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildmappe.
//
// The composer itself commits to best-effort output: element and image
// failures are logged and skipped, never propagated. These variants cover the
// recoverable stages (decode, transcode, render) plus the I/O boundary where
// the finished document leaves the process.

use thiserror::Error;

/// Top-level error type for all Bildmappe operations.
#[derive(Debug, Error)]
pub enum BildmappeError {
    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("element render failed: {0}")]
    RenderError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildmappeError>;
