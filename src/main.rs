use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::{NativeOptions, egui};
use tokio::runtime::Runtime;

use crossover_scout::config::PLOT_CONFIG;
use crossover_scout::{
    BacktestReport, Cli, WindowPair, fetch_price_series, require_benchmark_warm_up, require_rows,
    run_app, search,
};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);
    let ticker = args.resolve_ticker()?;

    // C. Data Loading (Blocking)
    let rt = Runtime::new()?;
    let series = rt.block_on(fetch_price_series(&ticker, &args))?;
    require_rows(&series)?;
    require_benchmark_warm_up(&series, args.kind)?;

    // D. Search, then replay the winner against the benchmark and buy-and-hold
    let outcome = search(&series, &args.search_space()?, args.kind)?;
    println!("{}", outcome.summary_line());
    if args.top > 0 {
        for (rank, candidate) in outcome.leaderboard(args.top).iter().enumerate() {
            println!(
                "{:>3}. {}{}  total return ${:.2}",
                rank + 1,
                args.kind,
                candidate.pair,
                candidate.total_return
            );
        }
    }

    let report =
        BacktestReport::build(&series, outcome.best_pair(), WindowPair::benchmark(), args.kind)?;
    for wealth in report.wealth_series() {
        log::info!("{}: final wealth {:.2}", wealth.label, wealth.final_value());
    }

    if args.no_chart {
        return Ok(());
    }

    // E. Run Native App
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(PLOT_CONFIG.window_size),
        ..Default::default()
    };
    let window_title = report.title();
    eframe::run_native(
        &window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, report))),
    )
    .map_err(|e| anyhow!("Chart window failed: {}", e))
}
