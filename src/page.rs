//! Slicing of the view output into fixed-size display pages
//!
//! Pages are recomputed from the current filtered/sorted row set on every
//! interaction; nothing is diffed across sort or filter changes. Only the
//! selected page index outlives a render, and it belongs to the presentation
//! layer's session state, not to this module.

use crate::error::Error;
use std::num::NonZeroUsize;

/// Split rows into consecutive pages of `page_size` rows
///
/// Every page holds exactly `page_size` rows except the last one, which may
/// be shorter. Zero rows yield zero pages. Concatenating the pages in order
/// reproduces the input row sequence.
pub fn paginate<T>(rows: &[T], page_size: NonZeroUsize) -> Vec<&[T]> {
    rows.chunks(page_size.get()).collect()
}

/// Pick a page from an externally persisted selection
///
/// An absent selection defaults to page 0. A selection beyond the current
/// page count is a [`PageIndexOutOfRange`](Error::PageIndexOutOfRange) error;
/// use [`select_clamped()`] where it should be tolerated instead.
pub fn select<'rows, T>(
    pages: &[&'rows [T]],
    selection: Option<usize>,
) -> Result<&'rows [T], Error> {
    let index = selection.unwrap_or(0);
    pages.get(index).copied().ok_or(Error::PageIndexOutOfRange {
        index,
        pages: pages.len(),
    })
}

/// Pick a page, clamping out-of-range selections
///
/// The persisted page index is not re-validated when a sort or filter change
/// shrinks the table, so it can legitimately point beyond the last page. This
/// selector resolves that case by clamping to the last valid page, and falls
/// back to an empty page 0 when there are no rows at all. Returns the
/// effective index together with the page.
pub fn select_clamped<'rows, T>(
    pages: &[&'rows [T]],
    selection: Option<usize>,
) -> (usize, &'rows [T]) {
    let index = selection
        .unwrap_or(0)
        .min(pages.len().saturating_sub(1));
    (index, pages.get(index).copied().unwrap_or(&[]))
}
