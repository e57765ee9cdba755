//! Interactive viewer for a keyword-comparison dataset: log-likelihood
//! keyword statistics from two text corpora, merged with per-year average
//! occurrences and browsed as a sorted/filtered, paginated table.

mod config;
mod error;
mod merge;
mod page;
mod pages;
mod source;
mod theme;
mod ui;
mod view;

use crate::{
    config::Config,
    view::{CorpusChoice, SortColumn, SortOrder, ViewState},
};
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::{num::NonZeroUsize, ops::RangeInclusive, path::PathBuf};

/// Browse keyword statistics merged with per-year occurrence averages
///
/// Two workbooks are inner-joined on their keyword column; the per-year
/// columns of the second workbook are folded into an inline time-series
/// column whose year range depends on each row's corpus.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Path to the log-likelihood results workbook
    #[arg(long, default_value = "log_likelihood_results.xlsx")]
    stats: PathBuf,

    /// Path to the per-year average occurrences workbook
    #[arg(long, default_value = "sorted_average_occurrences_per_year.xlsx")]
    yearly: PathBuf,

    /// Style file applied to the rendered table
    ///
    /// One "key = value" entry per line, see the `theme` module for the
    /// recognized keys. Defaults are used when no file is given.
    #[arg(long, default_value = None)]
    style: Option<PathBuf>,

    /// Short name of the page to open, e.g. "sort" or "category"
    ///
    /// Will interactively prompt for a page if not specified.
    #[arg(short, long, default_value = None)]
    page: Option<Box<str>>,

    /// Number of rows per displayed page
    #[arg(long, default_value = "100")]
    page_size: NonZeroUsize,

    /// Initial sort column on the sort page
    ///
    /// One of the merged table's column names, e.g. "keyword" or
    /// "log_likelihood".
    #[arg(long, default_value = "keyword")]
    sort_by: Box<str>,

    /// Initial sort order on the sort page ("Ascending" or "Descending")
    #[arg(long, default_value = "Ascending")]
    order: Box<str>,

    /// Initial corpus choice on the category page
    ///
    /// "wszystkie" shows every row, "pentekostalny" keeps corpus B,
    /// "katolicki" keeps corpus A.
    #[arg(long, default_value = "wszystkie")]
    corpus: Box<str>,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Selector values come from closed sets, reject anything else upfront
        args.initial_sort()?;
        args.initial_corpus()?;
        Ok(args)
    }

    /// Initial view settings of the sort page
    pub fn initial_sort(&self) -> Result<ViewState> {
        Ok(ViewState::Sort {
            column: self.sort_by.parse::<SortColumn>()?,
            order: self.order.parse::<SortOrder>()?,
        })
    }

    /// Initial view settings of the category page
    pub fn initial_corpus(&self) -> Result<ViewState> {
        Ok(ViewState::Category {
            choice: self.corpus.parse::<CorpusChoice>()?,
        })
    }
}
//
fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let args = Args::parse_and_check()?;

    // Pick a page variant
    let variant = pages::pick(&args)?;

    // Determine process configuration
    let config = Config::new(args, variant)?;

    // Load the style file, if any
    let theme = theme::load(config.style.as_deref()).context("loading the style file")?;

    // Load both source workbooks
    let tables = source::load_all(&config)?;

    // Hand over to the interactive table view
    ui::run(config, theme, tables)
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Keyword whose usage is compared across the two corpora
pub type Keyword = Box<str>;

/// Year of Gregorian Calendar
pub type Year = i16;

/// Years for which the yearly-averages workbook carries a column
pub const YEAR_COLUMNS: RangeInclusive<Year> = 1989..=2023;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
