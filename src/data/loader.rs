use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Column, ContentRecord, ContentTable, ContentType};

/// Date layouts seen in `date_added`: "September 25, 2021" and ISO-8601.
const DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%Y-%m-%d"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the catalog column names (recommended)
/// * `.json`    – `[{ "show_id": "s1", "type": "Movie", ... }, ...]`
/// * `.parquet` – one column per catalog field, any scalar Arrow type
///
/// Loading the same file twice yields tables with equal records but distinct
/// identities.
pub fn load_file(path: &Path) -> Result<ContentTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} records ({}) from {}",
        table.len(),
        table.id(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ContentTable, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Malformed(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let index = FieldIndex::resolve(&headers)?;
    let mut builder = TableBuilder::default();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Malformed(format!("CSV row {row_no}: {e}")))?;
        let raw: Vec<Option<String>> = record.iter().map(|v| Some(v.to_string())).collect();
        builder.push(row_no, &index, &raw)?;
    }

    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented layout, the default `to_json(orient='records')`:
///
/// ```json
/// [
///   { "show_id": "s1", "type": "Movie", "release_year": 2020, "duration": "90 min", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ContentTable, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))
        .map_err(|e| LoadError::Malformed(format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".to_string()))?;

    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        objects.push(obj);
    }

    let headers: Vec<String> = objects
        .iter()
        .flat_map(|obj| obj.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let index = FieldIndex::resolve(&headers)?;
    let mut builder = TableBuilder::default();

    for (row_no, obj) in objects.into_iter().enumerate() {
        let raw: Vec<Option<String>> = headers
            .iter()
            .map(|h| obj.get(h).and_then(json_to_text))
            .collect();
        builder.push(row_no, &index, &raw)?;
    }

    Ok(builder.finish())
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(json_to_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every column is cast to Utf8 and then coerced like a CSV cell, so files
/// written by both **Pandas** and **Polars** load regardless of the integer
/// width they chose for the year columns or whether `date_added` was stored
/// as text or as a datetime.
fn load_parquet(path: &Path) -> Result<ContentTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)
        .map_err(|e| LoadError::Malformed(format!("reading parquet metadata: {e}")))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let index = FieldIndex::resolve(&headers)?;
    let reader = builder
        .build()
        .map_err(|e| LoadError::Malformed(format!("building parquet reader: {e}")))?;

    let mut table = TableBuilder::default();
    let mut row_no = 0;

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| LoadError::Malformed(format!("reading parquet record batch: {e}")))?;

        let mut text_columns = Vec::with_capacity(batch.num_columns());
        for (col_idx, col) in batch.columns().iter().enumerate() {
            let as_text = column_as_text(col).map_err(|e| {
                LoadError::Malformed(format!("column '{}': {e}", headers[col_idx]))
            })?;
            text_columns.push(as_text);
        }

        for row in 0..batch.num_rows() {
            let raw: Vec<Option<String>> = text_columns
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        None
                    } else {
                        Some(col.as_string::<i32>().value(row).to_string())
                    }
                })
                .collect();
            table.push(row_no, &index, &raw)?;
            row_no += 1;
        }
    }

    Ok(table.finish())
}

/// Datetime columns go through `Date32` first so they print as plain
/// `%Y-%m-%d` dates instead of `2021-09-25T00:00:00`.
fn column_as_text(col: &ArrayRef) -> Result<ArrayRef, ArrowError> {
    match col.data_type() {
        DataType::Timestamp(_, _) | DataType::Date64 => {
            let dates = cast(col, &DataType::Date32)?;
            cast(&dates, &DataType::Utf8)
        }
        _ => cast(col, &DataType::Utf8),
    }
}

// ---------------------------------------------------------------------------
// Shared row coercion
// ---------------------------------------------------------------------------

/// Header position of every catalog column found in the input.
#[derive(Debug)]
struct FieldIndex {
    positions: BTreeMap<Column, usize>,
}

impl FieldIndex {
    /// Every column but `year_added` is required; that one can be derived.
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let mut positions = BTreeMap::new();
        for col in Column::ALL {
            match headers.iter().position(|h| h == col.name()) {
                Some(i) => {
                    positions.insert(col, i);
                }
                None if col == Column::YearAdded => {}
                None => return Err(LoadError::MissingColumn(col.name().to_string())),
            }
        }
        Ok(FieldIndex { positions })
    }

    /// Trimmed, non-empty text of `col` in `row`.
    fn get<'a>(&self, row: &'a [Option<String>], col: Column) -> Option<&'a str> {
        let idx = *self.positions.get(&col)?;
        row.get(idx)?
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Default)]
struct TableBuilder {
    records: Vec<ContentRecord>,
    seen: HashSet<String>,
}

impl TableBuilder {
    fn push(&mut self, row: usize, index: &FieldIndex, raw: &[Option<String>]) -> Result<(), LoadError> {
        let record = parse_record(row, index, raw)?;
        if !self.seen.insert(record.show_id.clone()) {
            return Err(LoadError::DuplicateId {
                row,
                id: record.show_id,
            });
        }
        self.records.push(record);
        Ok(())
    }

    fn finish(self) -> ContentTable {
        ContentTable::from_records(self.records)
    }
}

fn parse_record(row: usize, index: &FieldIndex, raw: &[Option<String>]) -> Result<ContentRecord, LoadError> {
    let text = |col: Column| index.get(raw, col).map(str::to_string);
    let invalid = |col: Column, value: &str| LoadError::InvalidValue {
        row,
        column: col.name().to_string(),
        value: value.to_string(),
    };

    let show_id = text(Column::ShowId).ok_or_else(|| invalid(Column::ShowId, ""))?;

    let kind: ContentType = index
        .get(raw, Column::Type)
        .unwrap_or("")
        .parse()
        .map_err(|v: String| invalid(Column::Type, &v))?;

    let release_text = index.get(raw, Column::ReleaseYear).unwrap_or("");
    let release_year = parse_year(release_text).ok_or_else(|| invalid(Column::ReleaseYear, release_text))?;

    let date_added = match index.get(raw, Column::DateAdded) {
        Some(s) => Some(parse_date(s).ok_or_else(|| invalid(Column::DateAdded, s))?),
        None => None,
    };

    let year_added = match index.get(raw, Column::YearAdded) {
        Some(s) => Some(parse_year(s).ok_or_else(|| invalid(Column::YearAdded, s))?),
        None => date_added.map(|d| d.year()),
    };

    Ok(ContentRecord {
        show_id,
        kind,
        title: text(Column::Title).unwrap_or_default(),
        director: text(Column::Director),
        cast: split_list(index.get(raw, Column::Cast)),
        country: text(Column::Country),
        date_added,
        year_added,
        release_year,
        rating: text(Column::Rating),
        duration: text(Column::Duration).unwrap_or_default(),
        listed_in: split_list(index.get(raw, Column::ListedIn)),
        description: text(Column::Description).unwrap_or_default(),
    })
}

/// Accepts "2021" as well as the "2021.0" pandas writes for float columns.
fn parse_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn split_list(s: Option<&str>) -> Vec<String> {
    s.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        Column::ALL.iter().map(|c| c.name().to_string()).collect()
    }

    fn row(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    fn movie_row() -> Vec<Option<String>> {
        row(&[
            "s1",
            "Movie",
            "Dick Johnson Is Dead",
            "Kirsten Johnson",
            "",
            "United States",
            "September 25, 2021",
            "2021",
            "2020",
            "PG-13",
            "90 min",
            "Documentaries",
            "As her father nears the end of his life...",
        ])
    }

    #[test]
    fn year_added_column_is_optional() {
        let mut hs = headers();
        hs.retain(|h| h != "year_added");
        let index = FieldIndex::resolve(&hs).unwrap();
        assert!(!index.positions.contains_key(&Column::YearAdded));
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let mut hs = headers();
        hs.retain(|h| h != "rating");
        match FieldIndex::resolve(&hs) {
            Err(LoadError::MissingColumn(c)) => assert_eq!(c, "rating"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn coerces_a_full_row() {
        let index = FieldIndex::resolve(&headers()).unwrap();
        let rec = parse_record(0, &index, &movie_row()).unwrap();
        assert_eq!(rec.kind, ContentType::Movie);
        assert_eq!(rec.director.as_deref(), Some("Kirsten Johnson"));
        assert!(rec.cast.is_empty());
        assert_eq!(rec.date_added, NaiveDate::from_ymd_opt(2021, 9, 25));
        assert_eq!(rec.year_added, Some(2021));
        assert_eq!(rec.release_year, 2020);
        assert_eq!(rec.listed_in, vec!["Documentaries".to_string()]);
    }

    #[test]
    fn year_added_falls_back_to_date_added() {
        let index = FieldIndex::resolve(&headers()).unwrap();
        let mut raw = movie_row();
        raw[7] = Some(String::new());
        raw[6] = Some("2019-04-01".to_string());
        let rec = parse_record(3, &index, &raw).unwrap();
        assert_eq!(rec.year_added, Some(2019));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let index = FieldIndex::resolve(&headers()).unwrap();
        let mut raw = movie_row();
        raw[1] = Some("Podcast".to_string());
        match parse_record(4, &index, &raw) {
            Err(LoadError::InvalidValue { row, column, value }) => {
                assert_eq!((row, column.as_str(), value.as_str()), (4, "type", "Podcast"));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn pandas_float_years_are_accepted() {
        assert_eq!(parse_year("2019.0"), Some(2019));
        assert_eq!(parse_year("2019.5"), None);
        assert_eq!(parse_year("soon"), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let index = FieldIndex::resolve(&headers()).unwrap();
        let mut builder = TableBuilder::default();
        builder.push(0, &index, &movie_row()).unwrap();
        assert!(matches!(
            builder.push(1, &index, &movie_row()),
            Err(LoadError::DuplicateId { row: 1, .. })
        ));
    }

    #[test]
    fn lists_split_on_commas() {
        assert_eq!(
            split_list(Some("Ama Qamata, Khosi Ngema,  Gail Mabalane")),
            vec!["Ama Qamata", "Khosi Ngema", "Gail Mabalane"]
        );
        assert!(split_list(None).is_empty());
    }
}
