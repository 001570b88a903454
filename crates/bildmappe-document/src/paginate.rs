// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagination resolver for the comment layer.
//
// Designer elements may arrive without an explicit page number. The resolver
// reconstructs page boundaries spatially: elements are walked in ascending
// vertical order, and a gap larger than 90% of the canvas height signals a
// new logical page. Elements that already carry a page number pass through
// unchanged.

use bildmappe_core::CommentElement;
use bildmappe_core::layout::{CANVAS_HEIGHT_PX, PAGE_BREAK_THRESHOLD};
use tracing::debug;

/// Assign page numbers to elements that lack one.
///
/// Returns the input unchanged (same order) when every element is already
/// paged. Otherwise returns a new collection sorted by vertical position with
/// all pages filled in; the input is never mutated.
///
/// An element with a pre-existing page number never bumps the running page
/// counter, but it still updates the gap baseline `last_y`.
pub fn resolve_pages(elements: &[CommentElement]) -> Vec<CommentElement> {
    if elements.iter().all(|el| el.page.is_some()) {
        return elements.to_vec();
    }

    debug!(
        total = elements.len(),
        unpaged = elements.iter().filter(|el| el.page.is_none()).count(),
        "assigning missing page numbers by vertical grouping"
    );

    let mut sorted = elements.to_vec();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut current_page: u32 = 1;
    let mut last_y: f32 = 0.0;

    sorted
        .into_iter()
        .map(|mut element| {
            if element.page.is_none() {
                if element.y - last_y > PAGE_BREAK_THRESHOLD * CANVAS_HEIGHT_PX {
                    current_page += 1;
                }
                element.page = Some(current_page);
            }
            last_y = element.y;
            element
        })
        .collect()
}
