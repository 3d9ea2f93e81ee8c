//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub best_pair_color: Color32,
    pub benchmark_color: Color32,
    pub buy_hold_color: Color32,
    /// Width of every strategy line
    pub line_width: f32,
    /// Initial window size in points (width, height)
    pub window_size: [f32; 2],
    /// Number of date labels spread along the x axis
    pub plot_axis_divisions: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    best_pair_color: Color32::from_rgb(0, 160, 0),  // Green
    benchmark_color: Color32::from_rgb(30, 90, 220), // Blue
    buy_hold_color: Color32::from_rgb(200, 0, 0),    // Red
    line_width: 1.5,
    window_size: [1400.0, 700.0],
    plot_axis_divisions: 10,
};
