mod app;
mod color;
mod state;
mod ui;

use app::ContentTrendsApp;
use content_trends::config::AppConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()?;
    log::info!("Starting with {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Content Trend Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(ContentTrendsApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
