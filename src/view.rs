//! View variants applied to the merged table before pagination
//!
//! The sort page orders the rows by a user-chosen column and direction. The
//! category page filters them by corpus, orders them by decreasing
//! log-likelihood and numbers the surviving rows. Both are thin layers over
//! the same merged row set.

use crate::{
    error::Error,
    merge::{Corpus, MergedRow},
};
use std::{cmp::Ordering, str::FromStr};

/// Columns the sort page can order by
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum SortColumn {
    Keyword,
    LogLikelihood,
    OccurrencesA,
    OccurrencesPer1000A,
    OccurrencesB,
    OccurrencesPer1000B,
    Corpus,
}
//
impl SortColumn {
    /// All sortable columns, in selector order
    pub const ALL: [Self; 7] = [
        Self::Keyword,
        Self::LogLikelihood,
        Self::OccurrencesA,
        Self::OccurrencesPer1000A,
        Self::OccurrencesB,
        Self::OccurrencesPer1000B,
        Self::Corpus,
    ];

    /// Column name, as used in the workbook and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::LogLikelihood => "log_likelihood",
            Self::OccurrencesA => "occurrences_A",
            Self::OccurrencesPer1000A => "occurrences_per_1000_A",
            Self::OccurrencesB => "occurrences_B",
            Self::OccurrencesPer1000B => "occurrences_per_1000_B",
            Self::Corpus => "corpus",
        }
    }

    /// Next column in selector order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL
            .iter()
            .position(|column| *column == self)
            .expect("ALL lists every column");
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Compare two rows by this column
    fn compare(self, lhs: &MergedRow, rhs: &MergedRow) -> Ordering {
        match self {
            Self::Keyword => lhs.keyword.cmp(&rhs.keyword),
            Self::LogLikelihood => lhs.log_likelihood.total_cmp(&rhs.log_likelihood),
            Self::OccurrencesA => lhs.occurrences_a.total_cmp(&rhs.occurrences_a),
            Self::OccurrencesPer1000A => lhs
                .occurrences_per_1000_a
                .total_cmp(&rhs.occurrences_per_1000_a),
            Self::OccurrencesB => lhs.occurrences_b.total_cmp(&rhs.occurrences_b),
            Self::OccurrencesPer1000B => lhs
                .occurrences_per_1000_b
                .total_cmp(&rhs.occurrences_per_1000_b),
            Self::Corpus => lhs.corpus.label().cmp(rhs.corpus.label()),
        }
    }
}
//
impl FromStr for SortColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|column| column.name() == s)
            .ok_or_else(|| Error::InvalidSelection {
                selector: "sort column",
                value: s.into(),
            })
    }
}

/// Direction of the sort page's ordering
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum SortOrder {
    Ascending,
    Descending,
}
//
impl SortOrder {
    /// Name displayed in the order selector
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }

    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}
//
impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "Ascending" => Ok(Self::Ascending),
            "Descending" => Ok(Self::Descending),
            other => Err(Error::InvalidSelection {
                selector: "sort order",
                value: other.into(),
            }),
        }
    }
}

/// Corpus filter choices of the category page
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CorpusChoice {
    /// All rows, no filtering
    Wszystkie,

    /// Rows from the Pentecostal corpus (corpus B)
    Pentekostalny,

    /// Rows from the Catholic corpus (corpus A)
    Katolicki,
}
//
impl CorpusChoice {
    /// All corpus choices, in selector order
    pub const ALL: [Self; 3] = [Self::Wszystkie, Self::Pentekostalny, Self::Katolicki];

    /// Name displayed in the corpus selector
    pub fn name(self) -> &'static str {
        match self {
            Self::Wszystkie => "wszystkie",
            Self::Pentekostalny => "pentekostalny",
            Self::Katolicki => "katolicki",
        }
    }

    /// Next choice in selector order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .expect("ALL lists every choice");
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Truth that a row from the given corpus passes this filter
    pub fn admits(self, corpus: &Corpus) -> bool {
        match self {
            Self::Wszystkie => true,
            Self::Pentekostalny => *corpus == Corpus::B,
            Self::Katolicki => *corpus == Corpus::A,
        }
    }
}
//
impl FromStr for CorpusChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.name() == s)
            .ok_or_else(|| Error::InvalidSelection {
                selector: "corpus",
                value: s.into(),
            })
    }
}

/// View settings of the active page
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ViewState {
    /// Sort page: user-chosen ordering, no filtering
    Sort {
        /// Column the table is ordered by
        column: SortColumn,

        /// Direction of the ordering
        order: SortOrder,
    },

    /// Category page: corpus filter, fixed ordering, fresh row numbers
    Category {
        /// Which corpus' rows are displayed
        choice: CorpusChoice,
    },
}
//
impl ViewState {
    /// Apply this view to the merged rows
    pub fn apply(&self, rows: Vec<MergedRow>) -> Vec<MergedRow> {
        match *self {
            Self::Sort { column, order } => sort_rows(rows, column, order),
            Self::Category { choice } => filter_by_corpus(rows, choice),
        }
    }

    /// Truth that this view adds a row-number column
    pub fn shows_index(&self) -> bool {
        matches!(self, Self::Category { .. })
    }
}

/// Sort the merged rows by a column and direction
///
/// The sort is stable in both directions: rows that compare equal keep their
/// relative order.
pub fn sort_rows(mut rows: Vec<MergedRow>, column: SortColumn, order: SortOrder) -> Vec<MergedRow> {
    rows.sort_by(|lhs, rhs| {
        let ordering = column.compare(lhs, rhs);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    rows
}

/// Keep the rows matching a corpus choice, order them by decreasing
/// log-likelihood and assign fresh 1-based row numbers
///
/// Ties keep their relative order. The row numbers reflect the final display
/// order, not the rows' original positions.
pub fn filter_by_corpus(mut rows: Vec<MergedRow>, choice: CorpusChoice) -> Vec<MergedRow> {
    rows.retain(|row| choice.admits(&row.corpus));
    let mut rows = sort_rows(rows, SortColumn::LogLikelihood, SortOrder::Descending);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.index = Some(idx + 1);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(keyword: &str, corpus: Corpus, log_likelihood: f64) -> MergedRow {
        MergedRow {
            keyword: keyword.into(),
            log_likelihood,
            occurrences_a: 0.0,
            occurrences_per_1000_a: 0.0,
            occurrences_b: 0.0,
            occurrences_per_1000_b: 0.0,
            corpus,
            occurrences_over_time: Box::default(),
            index: None,
        }
    }

    fn sample() -> Vec<MergedRow> {
        vec![
            row("raz", Corpus::A, 3.0),
            row("dwa", Corpus::B, 1.0),
            row("trzy", Corpus::A, 3.0),
            row("cztery", Corpus::Other("C".into()), 2.0),
        ]
    }

    fn keywords(rows: &[MergedRow]) -> Vec<&str> {
        rows.iter().map(|row| &*row.keyword).collect()
    }

    #[test]
    fn selectors_parse_their_closed_sets() {
        assert_eq!(
            "log_likelihood".parse::<SortColumn>().unwrap(),
            SortColumn::LogLikelihood
        );
        assert_eq!(
            "Descending".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
        assert_eq!(
            "pentekostalny".parse::<CorpusChoice>().unwrap(),
            CorpusChoice::Pentekostalny
        );
        assert!(matches!(
            "popularity".parse::<SortColumn>(),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(matches!(
            "up".parse::<SortOrder>(),
            Err(Error::InvalidSelection { .. })
        ));
        assert!(matches!(
            "anglikanski".parse::<CorpusChoice>(),
            Err(Error::InvalidSelection { .. })
        ));
    }

    #[test]
    fn sorting_is_stable_for_ties() {
        let sorted = sort_rows(sample(), SortColumn::LogLikelihood, SortOrder::Descending);
        // "raz" and "trzy" tie at 3.0 and must keep their input order
        assert_eq!(keywords(&sorted), ["raz", "trzy", "cztery", "dwa"]);

        // Sorting twice with the same settings changes nothing
        let resorted = sort_rows(
            sorted.clone(),
            SortColumn::LogLikelihood,
            SortOrder::Descending,
        );
        assert_eq!(resorted, sorted);
    }

    #[test]
    fn descending_reverses_ascending_for_distinct_keys() {
        let ascending = sort_rows(sample(), SortColumn::Keyword, SortOrder::Ascending);
        let descending = sort_rows(sample(), SortColumn::Keyword, SortOrder::Descending);
        let mut reversed = ascending;
        reversed.reverse();
        assert_eq!(keywords(&descending), keywords(&reversed));
    }

    #[test]
    fn corpus_filter_is_exact() {
        let katolicki = filter_by_corpus(sample(), CorpusChoice::Katolicki);
        assert!(katolicki.iter().all(|row| row.corpus == Corpus::A));
        assert_eq!(katolicki.len(), 2);

        let pentekostalny = filter_by_corpus(sample(), CorpusChoice::Pentekostalny);
        assert!(pentekostalny.iter().all(|row| row.corpus == Corpus::B));
        assert_eq!(pentekostalny.len(), 1);

        let wszystkie = filter_by_corpus(sample(), CorpusChoice::Wszystkie);
        assert_eq!(wszystkie.len(), sample().len());
    }

    #[test]
    fn category_page_numbers_rows_in_display_order() {
        let rows = filter_by_corpus(sample(), CorpusChoice::Wszystkie);
        let indices = rows.iter().map(|row| row.index).collect::<Vec<_>>();
        assert_eq!(indices, [Some(1), Some(2), Some(3), Some(4)]);
        assert!(rows
            .windows(2)
            .all(|pair| pair[0].log_likelihood >= pair[1].log_likelihood));
    }

    #[test]
    fn view_state_dispatches_to_the_right_variant() {
        let sorted = ViewState::Sort {
            column: SortColumn::Keyword,
            order: SortOrder::Ascending,
        }
        .apply(sample());
        assert_eq!(keywords(&sorted), ["cztery", "dwa", "raz", "trzy"]);
        assert!(sorted.iter().all(|row| row.index.is_none()));

        let filtered = ViewState::Category {
            choice: CorpusChoice::Katolicki,
        }
        .apply(sample());
        assert!(filtered.iter().all(|row| row.index.is_some()));
    }

    #[test]
    fn selector_cycles_wrap_around() {
        let mut column = SortColumn::Keyword;
        for _ in 0..SortColumn::ALL.len() {
            column = column.next();
        }
        assert_eq!(column, SortColumn::Keyword);
        assert_eq!(CorpusChoice::Katolicki.next(), CorpusChoice::Wszystkie);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    }
}
