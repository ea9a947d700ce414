use eframe::egui;

use content_trends::config::AppConfig;

use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ContentTrendsApp {
    pub state: AppState,
}

impl ContentTrendsApp {
    /// Build the app and load the configured catalog. A load failure is
    /// reported in the UI rather than aborting startup.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::new(config);
        state.load(&config.data_path);
        Self { state }
    }
}

impl eframe::App for ContentTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            pages::current_page(ui, &mut self.state);
        });
    }
}
