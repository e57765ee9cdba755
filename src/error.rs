//! Error kinds surfaced by the data pipeline

use std::path::Path;
use thiserror::Error;

/// Failure modes of the load/merge/view/paginate pipeline
///
/// None of these represent transient conditions, so none are retried: the
/// pipeline either produces a complete, consistent page or reports an error.
#[derive(Debug, Error)]
pub enum Error {
    /// An input workbook is missing or unreadable, or a named sheet is absent
    ///
    /// Fatal and reported to the user; there is no partial-load fallback.
    #[error("cannot load source {path}")]
    SourceUnavailable {
        /// Workbook that could not be loaded
        path: Box<Path>,

        /// What went wrong while reading it
        #[source]
        source: calamine::Error,
    },

    /// A sort or filter selector was given a value outside its closed set
    ///
    /// Indicates a UI or configuration bug rather than a user-recoverable
    /// condition, so there is no silent fallback.
    #[error("unrecognized {selector} selection {value:?}")]
    InvalidSelection {
        /// Which selector rejected the value
        selector: &'static str,

        /// The rejected value
        value: Box<str>,
    },

    /// A page was requested beyond the current page count
    ///
    /// Callers that cannot surface this should go through
    /// [`select_clamped()`](crate::page::select_clamped) instead.
    #[error("page index {index} is out of range for {pages} page(s)")]
    PageIndexOutOfRange {
        /// The requested page index
        index: usize,

        /// How many pages currently exist
        pages: usize,
    },
}
