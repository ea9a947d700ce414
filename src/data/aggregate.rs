use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;
use super::model::{CellValue, Column, ContentType, TableView, Tabular};

// ---------------------------------------------------------------------------
// Group columns
// ---------------------------------------------------------------------------

/// The categorical dimensions a pivot can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupColumn {
    ReleaseYear,
    Rating,
    YearAdded,
}

impl GroupColumn {
    pub const ALL: [GroupColumn; 3] = [
        GroupColumn::ReleaseYear,
        GroupColumn::Rating,
        GroupColumn::YearAdded,
    ];

    pub fn column(self) -> Column {
        match self {
            GroupColumn::ReleaseYear => Column::ReleaseYear,
            GroupColumn::Rating => Column::Rating,
            GroupColumn::YearAdded => Column::YearAdded,
        }
    }

    pub fn name(self) -> &'static str {
        self.column().name()
    }
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupColumn::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| ValidationError::InvalidGroupColumn(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Cross-tabulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTabRow {
    pub key: CellValue,
    pub movies: u64,
    pub tv_shows: u64,
}

impl CrossTabRow {
    pub fn count(&self, kind: ContentType) -> u64 {
        match kind {
            ContentType::Movie => self.movies,
            ContentType::TvShow => self.tv_shows,
        }
    }
}

/// Dense counts per group value and content type, one row per distinct
/// value in ascending order. Absent combinations are 0, never missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab {
    pub group: GroupColumn,
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    /// Column names of [`CrossTab::to_view`].
    pub fn column_names(&self) -> [String; 3] {
        [
            self.group.name().to_string(),
            "no_of_movies".to_string(),
            "no_of_tv_shows".to_string(),
        ]
    }

    pub fn total(&self, kind: ContentType) -> u64 {
        self.rows.iter().map(|r| r.count(kind)).sum()
    }

    /// Plain rows × named columns for a table widget.
    pub fn to_view(&self) -> TableView {
        TableView {
            columns: self.column_names().to_vec(),
            rows: self
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.key.clone(),
                        CellValue::Integer(r.movies as i64),
                        CellValue::Integer(r.tv_shows as i64),
                    ]
                })
                .collect(),
        }
    }
}

/// Count rows of `table` by `group_column`, split by content type.
///
/// `group_column` must be one of `release_year`, `rating` or `year_added`,
/// and both it and `type` must be present in `table`. Rows with an empty
/// group value are not counted.
pub fn aggregate<T: Tabular + ?Sized>(table: &T, group_column: &str) -> Result<CrossTab, ValidationError> {
    let group: GroupColumn = group_column.parse()?;

    let group_idx = table
        .column_index(group.name())
        .ok_or_else(|| ValidationError::UnknownColumn(group.name().to_string()))?;
    let type_idx = table
        .column_index(Column::Type.name())
        .ok_or_else(|| ValidationError::UnknownColumn(Column::Type.name().to_string()))?;

    let mut counts: BTreeMap<CellValue, [u64; 2]> = BTreeMap::new();

    for row in 0..table.row_count() {
        let Some(key) = table.cell(row, group_idx).filter(|k| !k.is_null()) else {
            continue;
        };
        let Some(kind) = table
            .cell(row, type_idx)
            .and_then(|t| t.as_str().and_then(|s| s.parse::<ContentType>().ok()))
        else {
            continue;
        };

        let slot = match kind {
            ContentType::Movie => 0,
            ContentType::TvShow => 1,
        };
        counts.entry(key).or_default()[slot] += 1;
    }

    let rows = counts
        .into_iter()
        .map(|(key, [movies, tv_shows])| CrossTabRow {
            key,
            movies,
            tv_shows,
        })
        .collect();

    Ok(CrossTab { group, rows })
}

// ---------------------------------------------------------------------------
// Percentage normalisation (presentation only)
// ---------------------------------------------------------------------------

/// Denominator used when turning counts into percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentBasis {
    /// Each count over its own type's total, like a per-series histogram.
    #[default]
    PerType,
    /// Each count over the grand total of both types.
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PercentRow {
    pub key: CellValue,
    pub movies: f64,
    pub tv_shows: f64,
}

impl PercentRow {
    pub fn share(&self, kind: ContentType) -> f64 {
        match kind {
            ContentType::Movie => self.movies,
            ContentType::TvShow => self.tv_shows,
        }
    }
}

/// Rescale a cross-tab's counts to percentages. A zero denominator maps
/// every share to 0.
pub fn to_percentages(tab: &CrossTab, basis: PercentBasis) -> Vec<PercentRow> {
    let movie_total = tab.total(ContentType::Movie);
    let tv_total = tab.total(ContentType::TvShow);
    let (movie_den, tv_den) = match basis {
        PercentBasis::PerType => (movie_total, tv_total),
        PercentBasis::Total => (movie_total + tv_total, movie_total + tv_total),
    };

    let pct = |count: u64, den: u64| {
        if den == 0 {
            0.0
        } else {
            count as f64 * 100.0 / den as f64
        }
    };

    tab.rows
        .iter()
        .map(|r| PercentRow {
            key: r.key.clone(),
            movies: pct(r.movies, movie_den),
            tv_shows: pct(r.tv_shows, tv_den),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::ContentTable;
    use crate::data::select::{select, ColumnSelection};

    fn three_records() -> ContentTable {
        ContentTable::from_records(vec![
            record("1", ContentType::Movie, 2020, "PG"),
            record("2", ContentType::TvShow, 2020, "TV-MA"),
            record("3", ContentType::Movie, 2021, "PG"),
        ])
    }

    fn row(key: CellValue, movies: u64, tv_shows: u64) -> CrossTabRow {
        CrossTabRow {
            key,
            movies,
            tv_shows,
        }
    }

    #[test]
    fn release_year_pivot_of_three_records() {
        let tab = aggregate(&three_records(), "release_year").unwrap();
        assert_eq!(
            tab.rows,
            vec![
                row(CellValue::Integer(2020), 1, 1),
                row(CellValue::Integer(2021), 1, 0),
            ]
        );
    }

    #[test]
    fn ratings_sort_lexically() {
        let tab = aggregate(&three_records(), "rating").unwrap();
        let keys: Vec<_> = tab.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["PG", "TV-MA"]);
        assert_eq!(tab.rows[1], row(CellValue::Text("TV-MA".to_string()), 0, 1));
    }

    #[test]
    fn years_sort_numerically() {
        let table = ContentTable::from_records(vec![
            record("a", ContentType::Movie, 2001, "R"),
            record("b", ContentType::Movie, 1999, "R"),
            record("c", ContentType::TvShow, 925, "R"),
        ]);
        let tab = aggregate(&table, "release_year").unwrap();
        let keys: Vec<_> = tab.rows.iter().filter_map(|r| r.key.as_i64()).collect();
        assert_eq!(keys, vec![925, 1999, 2001]);
    }

    #[test]
    fn column_sums_equal_type_totals() {
        let table = ContentTable::from_records(
            (0..40)
                .map(|i| {
                    let kind = if i % 3 == 0 { ContentType::TvShow } else { ContentType::Movie };
                    record(&format!("s{i}"), kind, 2010 + (i % 7), "PG")
                })
                .collect(),
        );
        let tab = aggregate(&table, "release_year").unwrap();
        let counts = table.type_counts();
        assert_eq!(tab.rows.len(), 7);
        assert_eq!(tab.total(ContentType::Movie), counts[&ContentType::Movie] as u64);
        assert_eq!(tab.total(ContentType::TvShow), counts[&ContentType::TvShow] as u64);
    }

    #[test]
    fn empty_group_values_are_skipped() {
        let mut unrated = record("4", ContentType::Movie, 2020, "PG");
        unrated.rating = None;
        let mut records = three_records().records().to_vec();
        records.push(unrated);
        let tab = aggregate(&ContentTable::from_records(records), "rating").unwrap();
        assert_eq!(tab.total(ContentType::Movie), 2);
    }

    #[test]
    fn only_the_three_group_columns_are_accepted() {
        assert_eq!(
            aggregate(&three_records(), "title"),
            Err(ValidationError::InvalidGroupColumn("title".to_string()))
        );
        assert_eq!(
            aggregate(&three_records(), "genre"),
            Err(ValidationError::InvalidGroupColumn("genre".to_string()))
        );
    }

    #[test]
    fn group_column_must_exist_in_the_input() {
        let view = select(
            &three_records(),
            10,
            &ColumnSelection::Named(vec!["type".to_string(), "rating".to_string()]),
        )
        .unwrap();
        assert!(aggregate(&view, "rating").is_ok());
        assert_eq!(
            aggregate(&view, "release_year"),
            Err(ValidationError::UnknownColumn("release_year".to_string()))
        );
    }

    #[test]
    fn view_has_pivot_column_names() {
        let view = aggregate(&three_records(), "year_added").unwrap().to_view();
        assert_eq!(view.columns, vec!["year_added", "no_of_movies", "no_of_tv_shows"]);
        assert_eq!(
            view.rows,
            vec![vec![CellValue::Integer(2021), CellValue::Integer(2), CellValue::Integer(1)]]
        );
    }

    #[test]
    fn percentages_per_type_and_total() {
        let tab = aggregate(&three_records(), "release_year").unwrap();

        let per_type = to_percentages(&tab, PercentBasis::PerType);
        assert_eq!(per_type[0].movies, 50.0);
        assert_eq!(per_type[0].tv_shows, 100.0);
        assert_eq!(per_type[1].tv_shows, 0.0);

        let total = to_percentages(&tab, PercentBasis::Total);
        let sum: f64 = total.iter().map(|r| r.movies + r.tv_shows).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn percentages_of_an_empty_tab_are_empty() {
        let tab = aggregate(&ContentTable::from_records(Vec::new()), "rating").unwrap();
        assert!(to_percentages(&tab, PercentBasis::Total).is_empty());
    }
}
