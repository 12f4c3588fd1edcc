use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{GenreColorMap, ACCENT};
use crate::data::filter::{self, Histogram};
use crate::data::model::{AudioFeature, TrackDataset, TrendFeature};
use crate::state::TrendsInputs;

// ---------------------------------------------------------------------------
// Trends line chart
// ---------------------------------------------------------------------------

/// Render the per-year mean of the selected feature, either as one
/// aggregate line or split into one line per genre.
pub fn trend_chart(ui: &mut Ui, dataset: &TrackDataset, inputs: &TrendsInputs, colors: &GenreColorMap) {
    let plot = Plot::new("trend_chart")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(inputs.feature.label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if inputs.split_by_genre && dataset.has_genre {
        let series = filter::trend_series_by_genre(
            dataset,
            inputs.feature,
            inputs.year_start,
            inputs.year_end,
            &inputs.genres,
        );
        plot.show(ui, |plot_ui| {
            for (genre, points) in series {
                let line = Line::new(PlotPoints::from(points))
                    .name(&genre)
                    .color(colors.color_for(&genre))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
    } else {
        let points = filter::trend_series(
            dataset,
            inputs.feature,
            inputs.year_start,
            inputs.year_end,
            &inputs.genres,
        );
        plot.show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(points))
                .name(inputs.feature.label())
                .color(ACCENT)
                .width(1.5);
            plot_ui.line(line);
        });
    }
}

// ---------------------------------------------------------------------------
// Insights charts
// ---------------------------------------------------------------------------

/// Scatter of the selected feature against popularity, over every track.
pub fn scatter_chart(ui: &mut Ui, dataset: &TrackDataset, feature: AudioFeature, height: f32) {
    let points = filter::scatter_points(dataset, feature);

    // Partial transparency so dense regions read as density.
    let color = Color32::from_rgba_unmultiplied(0x1d, 0xb9, 0x54, 96);

    Plot::new("scatter_chart")
        .height(height)
        .x_axis_label(feature.label())
        .y_axis_label("Popularity")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(feature.label())
                    .color(color)
                    .radius(1.5),
            );
        });
}

/// Histogram of the selected feature's distribution, over every track.
pub fn histogram_chart(ui: &mut Ui, dataset: &TrackDataset, feature: AudioFeature, height: f32) {
    let Histogram { bin_width, bins } = filter::histogram(dataset, feature);

    let bars: Vec<Bar> = bins
        .into_iter()
        .map(|(center, count)| Bar::new(center, count as f64).width(bin_width * 0.95))
        .collect();

    Plot::new("histogram_chart")
        .height(height)
        .x_axis_label(feature.label())
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT).name(feature.label()));
        });
}
