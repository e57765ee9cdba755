//! Page variants of the viewer
//!
//! Both pages run the same load/merge/paginate pipeline and differ only in
//! which filter/sort is applied before display.

use crate::{Args, Result};
use anyhow::Context;
use dialoguer::FuzzySelect;

/// The two views the merged table can be browsed through
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PageVariant {
    /// Free sorting over every column, no filtering
    SortExplorer,

    /// Corpus filter with a fixed log-likelihood ordering and row numbers
    CategoryBrowser,
}
//
impl PageVariant {
    /// Short name, as given on the command line
    pub fn short_name(self) -> &'static str {
        match self {
            Self::SortExplorer => "sort",
            Self::CategoryBrowser => "category",
        }
    }

    /// Title displayed at the top of the view
    pub fn title(self) -> &'static str {
        match self {
            Self::SortExplorer => "Słowa kluczowe — sortowanie",
            Self::CategoryBrowser => "Słowa kluczowe — korpusy",
        }
    }
}

/// All page variants, in display order
const ALL_PAGES: [PageVariant; 2] = [PageVariant::SortExplorer, PageVariant::CategoryBrowser];

/// Select the page to open, from CLI arguments or an interactive prompt
pub fn pick(args: &Args) -> Result<PageVariant> {
    if let Some(name) = &args.page {
        get(name)
    } else {
        Ok(prompt()?)
    }
}

/// Get a page variant by its short name
pub fn get(short_name: &str) -> Result<PageVariant> {
    ALL_PAGES
        .into_iter()
        .find(|page| page.short_name() == short_name)
        .with_context(|| format!("Failed to find user-requested page {short_name}"))
}

/// Ask the user to select a page
pub fn prompt() -> dialoguer::Result<PageVariant> {
    let page_names = ALL_PAGES
        .iter()
        .map(|page| format!("{} ({})", page.title(), page.short_name()))
        .collect::<Vec<_>>();
    let page_idx = FuzzySelect::new()
        .with_prompt("Which page should I open?")
        .items(&page_names)
        .default(0)
        .max_length(usize::MAX)
        .interact()?;
    Ok(ALL_PAGES[page_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_resolve_by_short_name() {
        assert_eq!(get("sort").unwrap(), PageVariant::SortExplorer);
        assert_eq!(get("category").unwrap(), PageVariant::CategoryBrowser);
        assert!(get("nonsense").is_err());
    }
}
