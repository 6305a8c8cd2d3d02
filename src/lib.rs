//! Macro Lab - synthetic macroeconomic targets and dual-axis charts
//!
//! This crate provides:
//!
//! - Feature engineering over macroeconomic tables (lags, ratios, seasonality)
//! - A seeded synthetic target for exercising forecasting pipelines
//! - Dual y-axis line charts written to PNG/SVG
//! - Native chart display (with `gui` feature)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use macro_lab::{plot_dual_y, synthesize, PlotOptions};
//! use polars::prelude::*;
//!
//! fn main() -> macro_lab::LabResult<()> {
//!     let df = df!(
//!         "t" => (0..24i64).collect::<Vec<_>>(),
//!         "month" => (0..24i64).map(|t| t % 12 + 1).collect::<Vec<_>>(),
//!         "inpc" => vec![100.0; 24],
//!         "cetes_1m" => vec![5.0; 24],
//!         "exchange_rate_usd" => vec![18.0; 24],
//!         "official_interest_rate_usa" => vec![2.0; 24],
//!     )?;
//!
//!     let enriched = synthesize(&df, "y", 42)?;
//!     let options = PlotOptions::default().with_filename("out.png").with_show(false);
//!     plot_dual_y(&enriched, "inpc", "y", "t", &options)?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod dataset;
pub mod error;
pub mod logger;
pub mod setting;
pub mod utility;

// Re-export commonly used types
pub use chart::{plot_dual_y, DualAxisChart, PlotOptions};
pub use dataset::{synthesize, TargetSynthesizer};
pub use error::{LabError, LabResult};
pub use logger::{init_logger, Logger, LOGGER};
pub use setting::{Settings, SettingValue, SETTINGS};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
