//! Inner join of the two source tables and per-year column reshaping
//!
//! Each joined row's block of year-labelled values collapses into a single
//! ordered time series whose year range depends on the row's corpus. The raw
//! per-year columns are fully consumed in the process and never reach the
//! displayed table.

use crate::{
    source::{KeywordStat, YearlyTable},
    Keyword, Year,
};
use std::{fmt, ops::RangeInclusive};

/// Years whose averages make up a corpus A time series
pub const CORPUS_A_YEARS: RangeInclusive<Year> = 2005..=2023;

/// Years whose averages make up a corpus B time series
pub const CORPUS_B_YEARS: RangeInclusive<Year> = 1989..=2022;

/// Corpus a keyword statistic was computed from
///
/// The corpus decides which sub-range of the yearly columns is semantically
/// valid for a row's time series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Corpus {
    /// The Catholic corpus
    A,

    /// The Pentecostal corpus
    B,

    /// Any unexpected label, kept visible in the output rather than dropped
    Other(Box<str>),
}
//
impl Corpus {
    /// Decode a corpus label from the statistics workbook
    pub fn from_label(label: &str) -> Self {
        match label {
            "A" => Self::A,
            "B" => Self::B,
            other => Self::Other(other.into()),
        }
    }

    /// Year range of this corpus' time series, if it has one
    pub fn series_years(&self) -> Option<RangeInclusive<Year>> {
        match self {
            Self::A => Some(CORPUS_A_YEARS),
            Self::B => Some(CORPUS_B_YEARS),
            Self::Other(_) => None,
        }
    }

    /// Label displayed in the corpus column
    pub fn label(&self) -> &str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Other(label) => label,
        }
    }
}
//
impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row of the merged table
#[derive(Clone, Debug, PartialEq)]
pub struct MergedRow {
    /// Keyword shared by both source tables (join key)
    pub keyword: Keyword,

    // Statistics carried over unchanged from the first table
    #[allow(missing_docs)]
    pub log_likelihood: f64,
    #[allow(missing_docs)]
    pub occurrences_a: f64,
    #[allow(missing_docs)]
    pub occurrences_per_1000_a: f64,
    #[allow(missing_docs)]
    pub occurrences_b: f64,
    #[allow(missing_docs)]
    pub occurrences_per_1000_b: f64,

    /// Corpus this row's statistic was computed from
    pub corpus: Corpus,

    /// Average occurrences over this row's corpus-dependent year range
    pub occurrences_over_time: Box<[f64]>,

    /// 1-based display row number, assigned by the category page only
    pub index: Option<usize>,
}

/// Inner-join the statistics table with the yearly averages and fold each
/// joined row's per-year columns into a single time series
///
/// Keywords present in only one of the two tables are dropped entirely; no
/// row is synthesized for missing keys. Output rows keep statistics-table
/// order, which makes the join stable for equal keys. Rows with an unexpected
/// corpus label are retained with an empty series so they stay visible in the
/// final table.
pub fn merge(stats: &[KeywordStat], yearly: &YearlyTable) -> Vec<MergedRow> {
    let mut rows = Vec::with_capacity(stats.len());
    for stat in stats {
        let Some(years) = yearly.get(&stat.keyword) else {
            log::trace!(
                "Dropped keyword {:?}: no yearly averages recorded for it",
                stat.keyword
            );
            continue;
        };
        let corpus = Corpus::from_label(&stat.corpus);
        let occurrences_over_time = match corpus.series_years() {
            Some(range) => years.range(range).map(|(_year, &avg)| avg).collect(),
            None => {
                log::debug!(
                    "Keyword {:?} has unexpected corpus label {:?}, keeping it with an empty time series",
                    stat.keyword,
                    stat.corpus
                );
                Box::default()
            }
        };
        rows.push(MergedRow {
            keyword: stat.keyword.clone(),
            log_likelihood: stat.log_likelihood,
            occurrences_a: stat.occurrences_a,
            occurrences_per_1000_a: stat.occurrences_per_1000_a,
            occurrences_b: stat.occurrences_b,
            occurrences_per_1000_b: stat.occurrences_per_1000_b,
            corpus,
            occurrences_over_time,
            index: None,
        });
    }
    log::info!(
        "Merged {} of {} keyword statistics with yearly averages",
        rows.len(),
        stats.len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::YEAR_COLUMNS;
    use std::collections::BTreeMap;

    fn stat(keyword: &str, corpus: &str) -> KeywordStat {
        KeywordStat {
            keyword: keyword.into(),
            log_likelihood: 1.5,
            occurrences_a: 10.0,
            occurrences_per_1000_a: 0.1,
            occurrences_b: 20.0,
            occurrences_per_1000_b: 0.2,
            corpus: corpus.into(),
        }
    }

    /// One average per year of the full column range, valued year + base
    fn full_years(base: f64) -> BTreeMap<Year, f64> {
        YEAR_COLUMNS
            .map(|year| (year, base + f64::from(year)))
            .collect()
    }

    fn yearly(keywords: &[&str]) -> YearlyTable {
        keywords
            .iter()
            .map(|&k| (Keyword::from(k), full_years(0.0)))
            .collect()
    }

    #[test]
    fn corpus_a_series_covers_2005_to_2023() {
        let rows = merge(&[stat("x", "A")], &yearly(&["x"]));
        let series = &rows[0].occurrences_over_time;
        assert_eq!(series.len(), 19);
        assert_eq!(series.first(), Some(&2005.0));
        assert_eq!(series.last(), Some(&2023.0));
    }

    #[test]
    fn corpus_b_series_covers_1989_to_2022() {
        let rows = merge(&[stat("y", "B")], &yearly(&["y"]));
        let series = &rows[0].occurrences_over_time;
        assert_eq!(series.len(), 34);
        assert_eq!(series.first(), Some(&1989.0));
        assert_eq!(series.last(), Some(&2022.0));
    }

    #[test]
    fn unexpected_corpus_keeps_the_row_with_an_empty_series() {
        let rows = merge(&[stat("z", "C")], &yearly(&["z"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].corpus, Corpus::Other("C".into()));
        assert!(rows[0].occurrences_over_time.is_empty());
    }

    #[test]
    fn join_keeps_exactly_the_keyword_intersection() {
        let stats = [stat("w", "A"), stat("x", "B")];
        let rows = merge(&stats, &yearly(&["x", "y"]));
        let keywords = rows.iter().map(|row| &*row.keyword).collect::<Vec<_>>();
        assert_eq!(keywords, ["x"]);
    }

    #[test]
    fn join_preserves_statistics_table_order() {
        let stats = [stat("c", "A"), stat("a", "B"), stat("b", "A")];
        let rows = merge(&stats, &yearly(&["a", "b", "c"]));
        let keywords = rows.iter().map(|row| &*row.keyword).collect::<Vec<_>>();
        assert_eq!(keywords, ["c", "a", "b"]);
    }

    #[test]
    fn series_values_follow_year_order() {
        let years = yearly(&["x"]);
        let rows = merge(&[stat("x", "B")], &years);
        let series = &rows[0].occurrences_over_time;
        let expected = (1989..=2022).map(f64::from).collect::<Vec<_>>();
        assert_eq!(&series[..], &expected[..]);
    }

    #[test]
    fn three_corpora_scenario() {
        let stats = [stat("x", "A"), stat("y", "B"), stat("z", "C")];
        let rows = merge(&stats, &yearly(&["x", "y", "z"]));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].occurrences_over_time.len(), 19);
        assert_eq!(rows[1].occurrences_over_time.len(), 34);
        assert_eq!(rows[2].occurrences_over_time.len(), 0);
    }
}
