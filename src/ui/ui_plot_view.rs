use eframe::egui::{self, Color32};
use egui_plot::{AxisHints, Corner, GridMark, HPlacement, Legend, Line, Plot, PlotPoints};

use crate::analysis::{BacktestReport, WealthSeries};
use crate::config::plot::PLOT_CONFIG;
use crate::ui::ui_text::UI_TEXT;
use crate::utils::{TimeUtils, time_utils};

/// One named curve, already in plot coordinates (x = days since the epoch).
#[derive(Clone, Debug, PartialEq)]
pub struct CurveData {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Everything the chart draws, built once from the backtest.
pub struct PlotView {
    curves: Vec<CurveData>,
    x_min: f64,
    x_max: f64,
}

impl PlotView {
    pub fn new(report: &BacktestReport) -> Self {
        let colors = [
            PLOT_CONFIG.best_pair_color,
            PLOT_CONFIG.benchmark_color,
            PLOT_CONFIG.buy_hold_color,
        ];
        let curves = report
            .wealth_series()
            .into_iter()
            .zip(colors)
            .map(|(wealth, color)| CurveData {
                label: wealth.label.clone(),
                color,
                points: wealth_points(&report.timestamps_ms, wealth),
            })
            .collect();

        let x_of = |ts: i64| ts as f64 / TimeUtils::MS_IN_D as f64;
        let x_min = report.timestamps_ms.first().copied().map_or(0.0, x_of);
        let x_max = report.timestamps_ms.last().copied().map_or(0.0, x_of);
        Self {
            curves,
            x_min,
            x_max,
        }
    }

    #[cfg(test)]
    pub fn curves(&self) -> &[CurveData] {
        &self.curves
    }

    pub fn show_comparison_plot(&self, ui: &mut egui::Ui) {
        let legend = Legend::default().position(Corner::LeftTop);
        let divisions = PLOT_CONFIG.plot_axis_divisions.max(1) as f64;
        let (x_min, x_max) = (self.x_min, self.x_max);

        Plot::new("comparison_plot")
            .legend(legend)
            .show_grid(true)
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis()])
            .label_formatter(|name, value| {
                let date = time_utils::epoch_ms_to_utc(days_to_ms(value.x));
                if name.is_empty() {
                    date
                } else {
                    format!(
                        "{}\n{}\n{}{:.2}",
                        name, date, UI_TEXT.hover_value_prefix, value.y
                    )
                }
            })
            // Evenly spaced date labels across the whole series
            .x_grid_spacer(move |_input| {
                let span = (x_max - x_min).max(1.0);
                let step_size = (span / divisions).ceil();
                (0..=divisions as i64)
                    .map(|i| GridMark {
                        value: x_min + i as f64 * step_size,
                        step_size,
                    })
                    .filter(|mark| mark.value <= x_max)
                    .collect()
            })
            .show(ui, |plot_ui| {
                for curve in &self.curves {
                    plot_ui.line(
                        Line::new(curve.label.clone(), PlotPoints::new(curve.points.clone()))
                            .color(curve.color)
                            .width(PLOT_CONFIG.line_width),
                    );
                }
            });
    }
}

fn days_to_ms(days: f64) -> i64 {
    (days * TimeUtils::MS_IN_D as f64).round() as i64
}

/// Pairs each wealth value with its observation date.
pub fn wealth_points(timestamps_ms: &[i64], wealth: &WealthSeries) -> Vec<[f64; 2]> {
    timestamps_ms
        .iter()
        .zip(&wealth.values)
        .map(|(&ts, &value)| [ts as f64 / TimeUtils::MS_IN_D as f64, value])
        .collect()
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| time_utils::epoch_ms_to_utc(days_to_ms(grid_mark.value)))
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_y_axis)
        .formatter(|grid_mark, _range| format!("${:.0}", grid_mark.value))
        .placement(HPlacement::Left)
}
