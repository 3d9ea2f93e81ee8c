// User interface components
pub mod app;
pub mod ui_plot_view;
pub mod ui_text;

// Re-export main app
pub use app::ComparisonChartApp;
pub use ui_text::UI_TEXT;
