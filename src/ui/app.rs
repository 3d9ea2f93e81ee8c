use eframe::egui::{self, CentralPanel, Frame, RichText};

use crate::analysis::BacktestReport;
use crate::ui::ui_plot_view::PlotView;

/// Single-window app: a heading and the three wealth curves of one backtest.
pub struct ComparisonChartApp {
    report: BacktestReport,
    plot_view: PlotView,
}

impl ComparisonChartApp {
    pub fn new(cc: &eframe::CreationContext, report: BacktestReport) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let plot_view = PlotView::new(&report);
        Self { report, plot_view }
    }

    fn render_central_panel(&self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(Frame::central_panel(&ctx.style()))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(self.report.title()).strong());
                });
                ui.add_space(6.0);
                self.plot_view.show_comparison_plot(ui);
            });
    }
}

impl eframe::App for ComparisonChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_central_panel(ctx);
    }
}
