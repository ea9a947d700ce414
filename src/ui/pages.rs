use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use content_trends::data::{CellValue, Column, ContentType, GroupColumn, TableView, ALL_COLUMNS};

use crate::state::{AppState, Page};
use crate::ui::{plot, table};

/// Render whichever page is selected. Every page is a thin consumer of the
/// memoized queries on [`AppState`].
pub fn current_page(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog file to begin  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let page = state.page;
            ui.heading(page.title());
            ui.separator();
            match page {
                Page::Home => home(ui, state),
                Page::Dataset => dataset(ui, state),
                Page::DurationAnalysis => durations(ui, state),
                page => {
                    if let Some(group) = page.group() {
                        pivot(ui, state, group);
                    }
                }
            }
        });
}

fn home(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else { return };
    let counts = table.type_counts();
    ui.label(format!(
        "The catalog holds {} titles: {} movies and {} TV shows.",
        table.len(),
        counts[&ContentType::Movie],
        counts[&ContentType::TvShow]
    ));
    ui.add_space(8.0);
    ui.label("Use the pages on the left to explore release trends, ratings, library growth and durations.");
}

fn dataset(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Column descriptions");
    let descriptions = TableView {
        columns: vec!["Column Name".to_string(), "Column Value".to_string()],
        rows: Column::ALL
            .iter()
            .map(|c| {
                vec![
                    CellValue::Text(c.name().to_string()),
                    CellValue::Text(c.description().to_string()),
                ]
            })
            .collect(),
    };
    table::data_table(ui, "column_descriptions", &descriptions, false);
    ui.separator();

    let row_count = state.table.as_ref().map(|t| t.len()).unwrap_or(0);
    let controls = &mut state.dataset_controls;
    controls.clamp_to(row_count);
    ui.add(
        egui::Slider::new(&mut controls.row_limit, 0..=row_count.saturating_sub(1))
            .text("Select number of table rows to display"),
    );

    egui::CollapsingHeader::new("Select the columns to display")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let choices = std::iter::once(ALL_COLUMNS).chain(Column::ALL.iter().map(|c| c.name()));
            for name in choices {
                let mut checked = controls.chosen_columns.iter().any(|c| c == name);
                if ui.checkbox(&mut checked, name).changed() {
                    controls.toggle_column(name);
                }
            }
        });
    ui.checkbox(&mut controls.dark, "Dark table theme");

    let dark = controls.dark;
    match state.dataset_view() {
        Some(Ok(view)) => table::data_table(ui, "dataset", &view, dark),
        Some(Err(e)) => {
            log::error!("Dataset selection failed: {e}");
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
        }
        None => {}
    }
}

fn pivot(ui: &mut Ui, state: &mut AppState, group: GroupColumn) {
    let mut normalize = state.is_normalized(group);
    if ui.checkbox(&mut normalize, "Normalize to percent").changed() {
        state.normalize.insert(group, normalize);
    }

    match state.pivot(group) {
        Some(Ok(tab)) => {
            plot::pivot_chart(ui, group.name(), &tab, &state.color_map, normalize);
            ui.separator();
            table::data_table(ui, &format!("{group}_pivot"), &tab.to_view(), false);
        }
        Some(Err(e)) => {
            log::error!("Aggregation by {group} failed: {e}");
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
        }
        None => {}
    }
}

fn durations(ui: &mut Ui, state: &AppState) {
    let Some(durations) = state.durations() else { return };

    for kind in ContentType::ALL {
        let typed = durations.get(kind);
        ui.strong(format!(
            "Duration of {} against year of release ({} titles)",
            kind.label(),
            typed.points.len()
        ));
        plot::duration_scatter(ui, &format!("{kind}_durations"), typed, &state.color_map);
        ui.add_space(8.0);
    }

    let excluded = durations.rejected_count();
    if excluded > 0 {
        ui.label(
            RichText::new(format!("{excluded} title(s) with unreadable durations are not shown."))
                .color(Color32::YELLOW),
        );
    }
}
