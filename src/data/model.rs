use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

use super::error::ValidationError;

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// The two kinds of catalog entry. The duration unit follows from this alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    /// Label used in the source file.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Movie" => Ok(ContentType::Movie),
            "TV Show" => Ok(ContentType::TvShow),
            other => Err(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed schema of the catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    ShowId,
    Type,
    Title,
    Director,
    Cast,
    Country,
    DateAdded,
    YearAdded,
    ReleaseYear,
    Rating,
    Duration,
    ListedIn,
    Description,
}

impl Column {
    /// Every column, in file order.
    pub const ALL: [Column; 13] = [
        Column::ShowId,
        Column::Type,
        Column::Title,
        Column::Director,
        Column::Cast,
        Column::Country,
        Column::DateAdded,
        Column::YearAdded,
        Column::ReleaseYear,
        Column::Rating,
        Column::Duration,
        Column::ListedIn,
        Column::Description,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::ShowId => "show_id",
            Column::Type => "type",
            Column::Title => "title",
            Column::Director => "director",
            Column::Cast => "cast",
            Column::Country => "country",
            Column::DateAdded => "date_added",
            Column::YearAdded => "year_added",
            Column::ReleaseYear => "release_year",
            Column::Rating => "rating",
            Column::Duration => "duration",
            Column::ListedIn => "listed_in",
            Column::Description => "description",
        }
    }

    /// Human description shown on the dataset page.
    pub fn description(self) -> &'static str {
        match self {
            Column::ShowId => "Unique ID for every Movie / TV show",
            Column::Type => "Identifier - A Movie or TV Show",
            Column::Title => "Title of the Movie / TV show",
            Column::Director => "Director of the Movie",
            Column::Cast => "Actors involved in the movie / TV show",
            Column::Country => "Country where the movie / TV show was produced",
            Column::DateAdded => "Date the movie / TV show was added to the catalog",
            Column::YearAdded => "Year the movie / TV show was added to the catalog",
            Column::ReleaseYear => "Actual release year of the movie / TV show",
            Column::Rating => "TV rating of the movie / TV show",
            Column::Duration => "Total duration - in minutes or number of seasons",
            Column::ListedIn => "Genres of the movie / TV show",
            Column::Description => "The summary description",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_name(s).ok_or_else(|| ValidationError::UnknownColumn(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of a derived view
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Ordered so it can key a `BTreeMap` downstream:
/// integers compare numerically, text lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    List(Vec<String>),
    Null,
}

impl CellValue {
    fn discriminant(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Integer(_) => 1,
            CellValue::Date(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::List(_) => 4,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn optional_text(value: &Option<String>) -> CellValue {
        value.clone().map(CellValue::Text).unwrap_or(CellValue::Null)
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (List(a), List(b)) => a.cmp(b),
            _ => self.discriminant().cmp(&other.discriminant()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%B %-d, %Y")),
            CellValue::List(items) => write!(f, "{}", items.join(", ")),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// One catalog entry (a Movie or TV Show) with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub show_id: String,
    pub kind: ContentType,
    pub title: String,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub country: Option<String>,
    pub date_added: Option<NaiveDate>,
    /// Taken from the file when present, otherwise derived from `date_added`.
    pub year_added: Option<i32>,
    pub release_year: i32,
    pub rating: Option<String>,
    /// Raw text; the unit depends on `kind`.
    pub duration: String,
    pub listed_in: Vec<String>,
    pub description: String,
}

impl ContentRecord {
    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::ShowId => CellValue::Text(self.show_id.clone()),
            Column::Type => CellValue::Text(self.kind.label().to_string()),
            Column::Title => CellValue::Text(self.title.clone()),
            Column::Director => CellValue::optional_text(&self.director),
            Column::Cast => list_cell(&self.cast),
            Column::Country => CellValue::optional_text(&self.country),
            Column::DateAdded => self.date_added.map(CellValue::Date).unwrap_or(CellValue::Null),
            Column::YearAdded => self
                .year_added
                .map(|y| CellValue::Integer(y.into()))
                .unwrap_or(CellValue::Null),
            Column::ReleaseYear => CellValue::Integer(self.release_year.into()),
            Column::Rating => CellValue::optional_text(&self.rating),
            Column::Duration if self.duration.is_empty() => CellValue::Null,
            Column::Duration => CellValue::Text(self.duration.clone()),
            Column::ListedIn => list_cell(&self.listed_in),
            Column::Description => CellValue::Text(self.description.clone()),
        }
    }
}

fn list_cell(items: &[String]) -> CellValue {
    if items.is_empty() {
        CellValue::Null
    } else {
        CellValue::List(items.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tabular – anything with named columns and rows of cells
// ---------------------------------------------------------------------------

/// Read access shared by the base table and the views derived from it, so
/// selection and aggregation compose.
pub trait Tabular {
    fn column_names(&self) -> Vec<String>;
    fn row_count(&self) -> usize;
    /// Cell at (`row`, `column`), or `None` if either is out of range.
    fn cell(&self, row: usize, column: usize) -> Option<CellValue>;

    fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names().iter().position(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// ContentTable – the immutable loaded dataset
// ---------------------------------------------------------------------------

/// Identity of one loaded table. Every load mints a new one, so caches keyed
/// on it never serve results computed from a different table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(u64);

impl TableId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TableId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table#{}", self.0)
    }
}

/// The full parsed catalog. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ContentTable {
    id: TableId,
    records: Vec<ContentRecord>,
}

impl ContentTable {
    pub fn from_records(records: Vec<ContentRecord>) -> Self {
        ContentTable {
            id: TableId::next(),
            records,
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records per content type.
    pub fn type_counts(&self) -> BTreeMap<ContentType, usize> {
        let mut counts: BTreeMap<ContentType, usize> =
            ContentType::ALL.into_iter().map(|t| (t, 0)).collect();
        for rec in &self.records {
            *counts.entry(rec.kind).or_default() += 1;
        }
        counts
    }
}

impl Tabular for ContentTable {
    fn column_names(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| c.name().to_string()).collect()
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<CellValue> {
        let column = *Column::ALL.get(column)?;
        self.records.get(row).map(|r| r.cell(column))
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        Column::ALL.iter().position(|c| c.name() == name)
    }
}

// ---------------------------------------------------------------------------
// TableView – a derived, owned rows × named-columns result
// ---------------------------------------------------------------------------

/// Plain tabular data handed to the presentation layer. No formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Tabular for TableView {
    fn column_names(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<CellValue> {
        self.rows.get(row)?.get(column).cloned()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, kind: ContentType, release_year: i32, rating: &str) -> ContentRecord {
        ContentRecord {
            show_id: id.to_string(),
            kind,
            title: format!("Title {id}"),
            director: None,
            cast: Vec::new(),
            country: Some("India".to_string()),
            date_added: NaiveDate::from_ymd_opt(2021, 9, 25),
            year_added: Some(2021),
            release_year,
            rating: Some(rating.to_string()),
            duration: match kind {
                ContentType::Movie => "90 min".to_string(),
                ContentType::TvShow => "2 Seasons".to_string(),
            },
            listed_in: vec!["Dramas".to_string()],
            description: String::new(),
        }
    }

    #[test]
    fn integers_order_numerically_not_lexically() {
        let mut vals = vec![
            CellValue::Integer(2021),
            CellValue::Integer(999),
            CellValue::Integer(2020),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![CellValue::Integer(999), CellValue::Integer(2020), CellValue::Integer(2021)]
        );
    }

    #[test]
    fn column_names_round_trip() {
        for col in Column::ALL {
            assert_eq!(col.name().parse::<Column>(), Ok(col));
        }
        assert_eq!(
            "genre".parse::<Column>(),
            Err(ValidationError::UnknownColumn("genre".to_string()))
        );
    }

    #[test]
    fn every_load_gets_a_fresh_identity() {
        let a = ContentTable::from_records(vec![record("s1", ContentType::Movie, 2020, "PG")]);
        let b = ContentTable::from_records(a.records().to_vec());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn table_cells_follow_column_order() {
        let table = ContentTable::from_records(vec![record("s7", ContentType::TvShow, 2019, "TV-MA")]);
        let idx = table.column_index("release_year").unwrap();
        assert_eq!(table.cell(0, idx), Some(CellValue::Integer(2019)));
        assert_eq!(table.cell(0, 1), Some(CellValue::Text("TV Show".to_string())));
        assert_eq!(table.cell(1, 0), None);
        assert_eq!(table.cell(0, Column::ALL.len()), None);
    }

    #[test]
    fn type_counts_include_absent_types() {
        let table = ContentTable::from_records(vec![record("s1", ContentType::Movie, 2020, "PG")]);
        let counts = table.type_counts();
        assert_eq!(counts[&ContentType::Movie], 1);
        assert_eq!(counts[&ContentType::TvShow], 0);
    }
}
