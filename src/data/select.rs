use super::error::ValidationError;
use super::model::{CellValue, TableView, Tabular};

/// Column-chooser value meaning "no column restriction".
pub const ALL_COLUMNS: &str = "all";

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Which columns a selection keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ColumnSelection {
    /// Every column of the input, in input order.
    #[default]
    All,
    /// Exactly these columns, in this order.
    Named(Vec<String>),
}

impl ColumnSelection {
    /// Interpret the multi-value column chooser: any occurrence of the
    /// `"all"` sentinel wins over individual names.
    pub fn from_choices<S: AsRef<str>>(choices: &[S]) -> Self {
        if choices.iter().any(|c| c.as_ref() == ALL_COLUMNS) {
            ColumnSelection::All
        } else {
            ColumnSelection::Named(choices.iter().map(|c| c.as_ref().to_string()).collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Row/column selection
// ---------------------------------------------------------------------------

/// Restrict `table` to its leading rows and the chosen columns.
///
/// `row_limit` is an inclusive upper index: a limit of `n` keeps rows
/// `0..=n`, i.e. `n + 1` rows. Limits past the last row are clamped, so the
/// result never has more than `table.row_count()` rows.
///
/// Never touches `table`; the result is an owned copy.
pub fn select<T: Tabular + ?Sized>(
    table: &T,
    row_limit: usize,
    columns: &ColumnSelection,
) -> Result<TableView, ValidationError> {
    let (names, indices) = resolve_columns(table, columns)?;
    let n_rows = row_count_for(table.row_count(), row_limit);

    let rows: Vec<Vec<CellValue>> = (0..n_rows)
        .map(|row| {
            indices
                .iter()
                .filter_map(|&col| table.cell(row, col))
                .collect()
        })
        .collect();

    Ok(TableView {
        columns: names,
        rows,
    })
}

/// Number of rows an inclusive `row_limit` yields from `total` rows.
pub fn row_count_for(total: usize, row_limit: usize) -> usize {
    row_limit.saturating_add(1).min(total)
}

fn resolve_columns<T: Tabular + ?Sized>(
    table: &T,
    columns: &ColumnSelection,
) -> Result<(Vec<String>, Vec<usize>), ValidationError> {
    match columns {
        ColumnSelection::All => {
            let names = table.column_names();
            let indices = (0..names.len()).collect();
            Ok((names, indices))
        }
        ColumnSelection::Named(requested) => {
            let indices = requested
                .iter()
                .map(|name| {
                    table
                        .column_index(name)
                        .ok_or_else(|| ValidationError::UnknownColumn(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((requested.clone(), indices))
        }
    }
}
