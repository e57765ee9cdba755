//! Viewer configuration

use crate::{pages::PageVariant, view::ViewState, Args, Result};
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

/// Final process configuration
///
/// This is the result of combining digested [`Args`] with the selected page
/// variant. Please refer to [`Args`] to know more about common fields.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub struct Config {
    /// Page variant being displayed
    pub variant: PageVariant,

    /// View settings the selected page starts out with
    pub initial_view: ViewState,

    // Other fields have the same meaning as in Args
    pub stats: PathBuf,
    pub yearly: PathBuf,
    pub style: Option<PathBuf>,
    pub page_size: NonZeroUsize,
}
//
impl Config {
    /// Determine process configuration from initialization products
    pub(crate) fn new(args: Args, variant: PageVariant) -> Result<Arc<Self>> {
        let initial_view = match variant {
            PageVariant::SortExplorer => args.initial_sort()?,
            PageVariant::CategoryBrowser => args.initial_corpus()?,
        };
        let Args {
            stats,
            yearly,
            style,
            page: _,
            page_size,
            sort_by: _,
            order: _,
            corpus: _,
        } = args;
        Ok(Arc::new(Self {
            variant,
            initial_view,
            stats,
            yearly,
            style,
            page_size,
        }))
    }
}
