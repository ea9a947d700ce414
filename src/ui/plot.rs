use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use content_trends::data::duration::TypedDurations;
use content_trends::data::{to_percentages, CellValue, ContentType, CrossTab, PercentBasis};

use crate::color::ColorMap;

const BAR_WIDTH: f64 = 0.4;
const CHART_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// Per-type bar chart of a cross-tab
// ---------------------------------------------------------------------------

/// Grouped bars, one series per content type. Year groups sit on their
/// numeric value; text groups (ratings) on consecutive slots labelled by the
/// axis formatter. With `normalize` the bars show each type's percentage.
pub fn pivot_chart(ui: &mut Ui, id: &str, tab: &CrossTab, colors: &ColorMap, normalize: bool) {
    let positions: Vec<f64> = tab
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| r.key.as_i64().map(|v| v as f64).unwrap_or(i as f64))
        .collect();

    let heights: Vec<[f64; 2]> = if normalize {
        to_percentages(tab, PercentBasis::PerType)
            .iter()
            .map(|r| [r.share(ContentType::Movie), r.share(ContentType::TvShow)])
            .collect()
    } else {
        tab.rows
            .iter()
            .map(|r| {
                [
                    r.count(ContentType::Movie) as f64,
                    r.count(ContentType::TvShow) as f64,
                ]
            })
            .collect()
    };

    let labels: Vec<String> = tab.rows.iter().map(|r| r.key.to_string()).collect();
    let categorical = tab.rows.iter().any(|r| !matches!(r.key, CellValue::Integer(_)));
    let formatter_labels = labels.clone();

    let y_label = if normalize { "Percent of type" } else { "Number of movies / TV shows" };

    let mut plot = Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(tab.group.name())
        .y_axis_label(y_label);

    if categorical {
        plot = plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > f64::EPSILON || slot < 0.0 {
                return String::new();
            }
            formatter_labels
                .get(slot as usize)
                .cloned()
                .unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        for (slot, kind) in ContentType::ALL.into_iter().enumerate() {
            let offset = if slot == 0 { -BAR_WIDTH / 2.0 } else { BAR_WIDTH / 2.0 };
            let bars: Vec<Bar> = positions
                .iter()
                .zip(&heights)
                .zip(&labels)
                .map(|((&x, h), label)| Bar::new(x + offset, h[slot]).width(BAR_WIDTH).name(label))
                .collect();

            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(kind.label())
                    .color(colors.color_for(kind)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Release year vs. duration scatter
// ---------------------------------------------------------------------------

/// One point per title: release year on x, duration in the type's unit on y.
pub fn duration_scatter(ui: &mut Ui, id: &str, durations: &TypedDurations, colors: &ColorMap) {
    let points: PlotPoints = durations
        .points
        .iter()
        .map(|p| [p.release_year as f64, p.value as f64])
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Year of release")
        .y_axis_label(format!("Duration ({})", durations.unit()))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name(durations.kind.label())
                    .color(colors.color_for(durations.kind))
                    .radius(2.5),
            );
        });
}
