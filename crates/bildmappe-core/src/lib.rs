// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildmappe — Core types, configuration, and error definitions shared across
// all crates.

pub mod color;
pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use color::{Rgb, parse_hex_color};
pub use config::ExportConfig;
pub use error::BildmappeError;
pub use types::*;
