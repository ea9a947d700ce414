use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use content_trends::data::TableView;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;
const MAX_TABLE_HEIGHT: f32 = 400.0;

/// Render a [`TableView`] as a scrollable grid. `dark` swaps to a black
/// background with white text.
pub fn data_table(ui: &mut Ui, id: &str, view: &TableView, dark: bool) {
    if view.columns.is_empty() {
        ui.label("No columns selected.");
        return;
    }

    let frame = if dark {
        egui::Frame::default().fill(Color32::BLACK)
    } else {
        egui::Frame::default()
    };

    frame.show(ui, |ui: &mut Ui| {
        if dark {
            ui.visuals_mut().override_text_color = Some(Color32::WHITE);
        }
        ui.push_id(id, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(!dark)
                .resizable(true)
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(TableColumn::auto().at_least(60.0).clip(true), view.columns.len())
                .header(HEADER_HEIGHT, |mut header| {
                    for name in &view.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.rows.len(), |mut row| {
                        let cells = &view.rows[row.index()];
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                });
        });
    });
}
