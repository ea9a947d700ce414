use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use content_trends::config::AppConfig;
use content_trends::data::{
    load_file, CachedQueries, ColumnSelection, ContentTable, CrossTab, GroupColumn,
    NormalizedDurations, TableView, ValidationError, ALL_COLUMNS,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Dataset,
    OverallTrend,
    RatingPopularity,
    LibraryGrowth,
    DurationAnalysis,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Dataset,
        Page::OverallTrend,
        Page::RatingPopularity,
        Page::LibraryGrowth,
        Page::DurationAnalysis,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dataset => "Dataset",
            Page::OverallTrend => "Overall Trend of Content",
            Page::RatingPopularity => "Popularity of Rating Categories",
            Page::LibraryGrowth => "Growth of the Library",
            Page::DurationAnalysis => "Duration and Release Year",
        }
    }

    /// Pivot dimension of an aggregation page.
    pub fn group(self) -> Option<GroupColumn> {
        match self {
            Page::OverallTrend => Some(GroupColumn::ReleaseYear),
            Page::RatingPopularity => Some(GroupColumn::Rating),
            Page::LibraryGrowth => Some(GroupColumn::YearAdded),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table controls (row slider, column chooser, style toggle)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableControls {
    /// Inclusive index of the last row shown.
    pub row_limit: usize,
    /// Chooser state; may contain the `"all"` sentinel.
    pub chosen_columns: Vec<String>,
    pub dark: bool,
}

impl TableControls {
    pub fn new(row_limit: usize) -> Self {
        Self {
            row_limit,
            chosen_columns: vec![ALL_COLUMNS.to_string()],
            dark: false,
        }
    }

    pub fn selection(&self) -> ColumnSelection {
        ColumnSelection::from_choices(&self.chosen_columns)
    }

    /// Add or remove `column` from the chooser, preserving choice order.
    pub fn toggle_column(&mut self, column: &str) {
        if let Some(pos) = self.chosen_columns.iter().position(|c| c == column) {
            self.chosen_columns.remove(pos);
        } else {
            self.chosen_columns.push(column.to_string());
        }
    }

    /// Keep the slider inside `[0, row_count - 1]`.
    pub fn clamp_to(&mut self, row_count: usize) {
        self.row_limit = self.row_limit.min(row_count.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded catalog (None until a file loads successfully).
    pub table: Option<Arc<ContentTable>>,

    /// Memoized derived views, shared by every page.
    pub queries: Arc<CachedQueries>,

    pub page: Page,

    pub dataset_controls: TableControls,

    /// Per-page "normalize to percent" toggles.
    pub normalize: BTreeMap<GroupColumn, bool>,

    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    default_rows: usize,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            table: None,
            queries: Arc::new(CachedQueries::new()),
            page: Page::Home,
            dataset_controls: TableControls::new(config.default_rows),
            normalize: BTreeMap::new(),
            color_map: ColorMap::default(),
            status_message: None,
            default_rows: config.default_rows,
        }
    }

    /// Load `path`, replacing the current table on success. A failed load
    /// keeps whatever was loaded before and reports the error.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table and reset the controls to it.
    pub fn set_table(&mut self, table: ContentTable) {
        self.dataset_controls = TableControls::new(self.default_rows);
        self.dataset_controls.clamp_to(table.len());
        self.table = Some(Arc::new(table));
        self.status_message = None;
    }

    pub fn dataset_view(&self) -> Option<Result<Arc<TableView>, ValidationError>> {
        let table = self.table.as_ref()?;
        Some(self.queries.select(
            table,
            self.dataset_controls.row_limit,
            &self.dataset_controls.selection(),
        ))
    }

    pub fn pivot(&self, group: GroupColumn) -> Option<Result<Arc<CrossTab>, ValidationError>> {
        let table = self.table.as_ref()?;
        Some(self.queries.aggregate(table, group.name()))
    }

    pub fn durations(&self) -> Option<Arc<NormalizedDurations>> {
        let table = self.table.as_ref()?;
        Some(self.queries.durations(table))
    }

    pub fn is_normalized(&self, group: GroupColumn) -> bool {
        self.normalize.get(&group).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use content_trends::data::CellValue;

    use super::*;

    const CSV: &str = "\
show_id,type,title,director,cast,country,date_added,year_added,release_year,rating,duration,listed_in,description
s1,Movie,A,,,,\"September 25, 2021\",2021,2020,PG,90 min,Dramas,x
s2,TV Show,B,,,,\"September 24, 2021\",2021,2020,TV-MA,2 Seasons,Dramas,y
s3,Movie,C,,,,\"September 24, 2021\",2021,2021,PG,101 min,Comedies,z
";

    fn config() -> AppConfig {
        AppConfig {
            data_path: PathBuf::from("unused.csv"),
            default_rows: 10,
        }
    }

    fn loaded_state() -> AppState {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let mut state = AppState::new(&config());
        state.load(file.path());
        state
    }

    #[test]
    fn load_clamps_row_slider() {
        let state = loaded_state();
        assert!(state.status_message.is_none());
        assert_eq!(state.dataset_controls.row_limit, 2);
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let mut state = loaded_state();
        let before = state.table.as_ref().map(|t| t.id());
        state.load(Path::new("/definitely/missing.csv"));
        assert_eq!(state.table.as_ref().map(|t| t.id()), before);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn column_chooser_drives_selection() {
        let mut state = loaded_state();
        state.dataset_controls.toggle_column(ALL_COLUMNS);
        state.dataset_controls.toggle_column("title");
        state.dataset_controls.toggle_column("show_id");
        state.dataset_controls.row_limit = 0;

        let view = state.dataset_view().unwrap().unwrap();
        assert_eq!(view.columns, vec!["title", "show_id"]);
        assert_eq!(
            view.rows,
            vec![vec![CellValue::Text("A".to_string()), CellValue::Text("s1".to_string())]]
        );
    }

    #[test]
    fn pages_pivot_on_their_group() {
        let state = loaded_state();
        let tab = state.pivot(Page::OverallTrend.group().unwrap()).unwrap().unwrap();
        assert_eq!(tab.rows.len(), 2);
        assert!(Page::Dataset.group().is_none());
        assert_eq!(state.durations().unwrap().movies.points.len(), 2);
    }
}
