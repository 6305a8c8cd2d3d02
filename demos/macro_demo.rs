//! Synthesize a target for a small macroeconomic table and chart it.
//!
//! Run with: cargo run --example macro_demo
//! Open the chart in a window with: cargo run --example macro_demo --features gui

use macro_lab::{init_logger, plot_dual_y, LabResult, PlotOptions, TargetSynthesizer};
use polars::prelude::*;
use tracing::info;

const MONTHS: usize = 48;

fn sample_table() -> PolarsResult<DataFrame> {
    let t: Vec<i64> = (0..MONTHS as i64).collect();
    let month: Vec<i64> = t.iter().map(|t| t % 12 + 1).collect();
    let inpc: Vec<f64> = t.iter().map(|t| 100.0 * (1.0 + 0.004 * *t as f64)).collect();
    let cetes: Vec<f64> = t
        .iter()
        .map(|t| 7.0 + 0.5 * (*t as f64 / 6.0).sin())
        .collect();
    let fx: Vec<f64> = t
        .iter()
        .map(|t| 18.0 + 1.5 * (*t as f64 / 9.0).cos())
        .collect();
    let fed: Vec<f64> = t.iter().map(|t| 0.25 + 0.1 * *t as f64).collect();

    df!(
        "t" => t,
        "month" => month,
        "inpc" => inpc,
        "cetes_1m" => cetes,
        "exchange_rate_usd" => fx,
        "official_interest_rate_usa" => fed,
    )
}

fn main() -> LabResult<()> {
    init_logger();

    let table = sample_table()?;
    let enriched = TargetSynthesizer::new().with_seed(7).synthesize(&table)?;
    info!(rows = enriched.height(), columns = enriched.width(), "synthesized target");
    println!("{}", enriched.head(Some(6)));

    let options = PlotOptions::default()
        .with_xticks_every(6)
        .with_filename("macro_demo.png")
        .with_show(cfg!(feature = "gui"));
    plot_dual_y(&enriched, "inpc", "y", "t", &options)?;

    Ok(())
}
