//! Loading of the two source workbooks
//!
//! Both inputs are read-only local files. A missing file or sheet is a
//! [`SourceUnavailable`](Error::SourceUnavailable) error: the viewer either
//! gets both tables in full or reports the failure, there is no partial load.

use crate::{config::Config, error::Error, Keyword, Year, YEAR_COLUMNS};
use calamine::{open_workbook_auto, Data, DataType, RangeDeserializerBuilder, Reader};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

/// Sheet of the statistics workbook holding the keyword data
pub const STATS_SHEET: &str = "All Data 1";

/// Upper bound on the number of statistics rows that are loaded
pub const MAX_STATS_ROWS: usize = 10_000;

/// One row of the log-likelihood statistics workbook
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct KeywordStat {
    /// Keyword whose usage is being compared (join key)
    pub keyword: Keyword,

    /// How distinctively the keyword is associated with one corpus
    pub log_likelihood: f64,

    /// Raw occurrence count in corpus A
    #[serde(rename = "occurrences_A")]
    pub occurrences_a: f64,

    /// Occurrences per 1000 words of corpus A
    #[serde(rename = "occurrences_per_1000_A")]
    pub occurrences_per_1000_a: f64,

    /// Raw occurrence count in corpus B
    #[serde(rename = "occurrences_B")]
    pub occurrences_b: f64,

    /// Occurrences per 1000 words of corpus B
    #[serde(rename = "occurrences_per_1000_B")]
    pub occurrences_per_1000_b: f64,

    /// Corpus the statistic was computed from ("A" or "B")
    pub corpus: Box<str>,
}

/// Per-year average occurrences, keyed by keyword
///
/// The per-keyword map is ordered by year, so corpus-dependent sub-ranges can
/// be sliced out of it in year order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YearlyTable(HashMap<Keyword, BTreeMap<Year, f64>>);
//
impl YearlyTable {
    /// Look up the yearly averages recorded for a keyword
    pub fn get(&self, keyword: &str) -> Option<&BTreeMap<Year, f64>> {
        self.0.get(keyword)
    }

    /// Number of keywords with yearly averages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truth that no yearly averages were recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
//
impl FromIterator<(Keyword, BTreeMap<Year, f64>)> for YearlyTable {
    fn from_iter<I: IntoIterator<Item = (Keyword, BTreeMap<Year, f64>)>>(iter: I) -> Self {
        let mut table = HashMap::new();
        for (keyword, years) in iter {
            // First occurrence wins for duplicate keywords
            table.entry(keyword).or_insert(years);
        }
        Self(table)
    }
}

/// In-memory form of both source workbooks
#[derive(Clone, Debug)]
pub struct SourceTables {
    /// Rows of the log-likelihood statistics workbook
    pub stats: Vec<KeywordStat>,

    /// Contents of the yearly-averages workbook
    pub yearly: YearlyTable,
}

/// Load both source workbooks, reporting progress on the terminal
pub fn load_all(config: &Config) -> Result<SourceTables, Error> {
    let bar = ProgressBar::new(2).with_prefix("Loading workbooks").with_style(
        ProgressStyle::with_template("{prefix} {wide_bar} {pos}/{len}")
            .expect("the template above is a valid indicatif style"),
    );
    let stats = load_stats(&config.stats)?;
    bar.inc(1);
    let yearly = load_yearly(&config.yearly)?;
    bar.inc(1);
    bar.finish_and_clear();
    Ok(SourceTables { stats, yearly })
}

/// Load the log-likelihood statistics from the named sub-sheet of workbook 1
///
/// At most [`MAX_STATS_ROWS`] rows are read.
pub fn load_stats(path: &Path) -> Result<Vec<KeywordStat>, Error> {
    let source_unavailable = |source| Error::SourceUnavailable {
        path: path.into(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(source_unavailable)?;
    let range = workbook
        .worksheet_range(STATS_SHEET)
        .map_err(source_unavailable)?;
    let deserializer = RangeDeserializerBuilder::new()
        .from_range(&range)
        .map_err(|e| source_unavailable(calamine::Error::from(e)))?;
    let stats = deserializer
        .take(MAX_STATS_ROWS)
        .collect::<Result<Vec<KeywordStat>, _>>()
        .map_err(|e| source_unavailable(calamine::Error::from(e)))?;
    log::info!(
        "Loaded {} keyword statistics from {}",
        stats.len(),
        path.display()
    );
    Ok(stats)
}

/// Load the per-year averages from the single sheet of workbook 2
pub fn load_yearly(path: &Path) -> Result<YearlyTable, Error> {
    let source_unavailable = |source| Error::SourceUnavailable {
        path: path.into(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(source_unavailable)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| source_unavailable(calamine::Error::Msg("workbook has no worksheets")))?
        .map_err(source_unavailable)?;
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| source_unavailable(calamine::Error::Msg("yearly sheet is empty")))?;
    let (keyword_col, year_cols) = classify_header(header);
    let keyword_col = keyword_col.ok_or_else(|| {
        source_unavailable(calamine::Error::Msg("yearly sheet has no keyword column"))
    })?;

    let table = rows
        .filter_map(|row| {
            let keyword = row.get(keyword_col).and_then(|cell| cell.as_string())?;
            let years = year_cols
                .iter()
                .filter_map(|&(col, year)| {
                    let value = row.get(col).and_then(|cell| cell.as_f64())?;
                    Some((year, value))
                })
                .collect::<BTreeMap<_, _>>();
            Some((keyword.into_boxed_str(), years))
        })
        .collect::<YearlyTable>();
    log::info!(
        "Loaded yearly averages for {} keywords from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Locate the keyword column and the year-labelled columns of a header row
///
/// Year labels are normalized to string form first, so a numeric cell `2005`
/// and a text cell `"2005"` identify the same column. Only labels within
/// [`YEAR_COLUMNS`] count as year columns.
fn classify_header(header: &[Data]) -> (Option<usize>, Vec<(usize, Year)>) {
    let mut keyword_col = None;
    let mut year_cols = Vec::new();
    for (col, cell) in header.iter().enumerate() {
        let label = cell.as_string().unwrap_or_else(|| cell.to_string());
        if label == "keyword" {
            keyword_col.get_or_insert(col);
        } else if let Ok(year) = label.trim().parse::<Year>() {
            if YEAR_COLUMNS.contains(&year) {
                year_cols.push((col, year));
            } else {
                log::debug!("Ignoring out-of-range year column {year}");
            }
        }
    }
    (keyword_col, year_cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_years_normalize_to_strings() {
        let header = vec![
            Data::String("keyword".into()),
            Data::Float(1989.0),
            Data::String("2005".into()),
            Data::Int(2023),
            Data::String("notes".into()),
        ];
        let (keyword_col, year_cols) = classify_header(&header);
        assert_eq!(keyword_col, Some(0));
        assert_eq!(year_cols, vec![(1, 1989), (2, 2005), (3, 2023)]);
    }

    #[test]
    fn header_ignores_years_outside_the_fixed_range() {
        let header = vec![
            Data::String("keyword".into()),
            Data::Int(1988),
            Data::Int(2024),
            Data::Int(2023),
        ];
        let (_, year_cols) = classify_header(&header);
        assert_eq!(year_cols, vec![(3, 2023)]);
    }

    #[test]
    fn header_without_keyword_column_is_detected() {
        let header = vec![Data::Int(1989), Data::Int(1990)];
        let (keyword_col, year_cols) = classify_header(&header);
        assert_eq!(keyword_col, None);
        assert_eq!(year_cols.len(), 2);
    }

    #[test]
    fn missing_workbook_is_source_unavailable() {
        let err = load_stats(Path::new("definitely/not/there.xlsx")).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn duplicate_keywords_keep_the_first_row() {
        let first = [(2005, 1.0)].into_iter().collect::<BTreeMap<_, _>>();
        let second = [(2005, 9.0)].into_iter().collect::<BTreeMap<_, _>>();
        let table = [
            (Keyword::from("x"), first.clone()),
            (Keyword::from("x"), second),
        ]
        .into_iter()
        .collect::<YearlyTable>();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x"), Some(&first));
    }
}
