//! Chart module for dual y-axis time-series charts.
//!
//! This module provides:
//! - `DualAxisChart` - Chart model built from three columns of a frame
//! - `plot_dual_y` - Render a chart to file and optionally display it
//! - `DualAxisWidget` - Native window rendering (with `gui` feature)
//!
//! # Example
//!
//! ```ignore
//! use macro_lab::chart::{plot_dual_y, PlotOptions};
//!
//! let options = PlotOptions::default().with_filename("out.png").with_show(false);
//! plot_dual_y(&df, "inpc", "exchange_rate_usd", "t", &options)?;
//! ```

mod base;
mod dual_axis;
mod font;
#[cfg(feature = "gui")]
mod widget;

pub use base::*;
pub use dual_axis::{plot_dual_y, AxisSeries, DualAxisChart, OutputFormat, PlotOptions, XTick};
pub use font::ensure_fonts;
#[cfg(feature = "gui")]
pub use widget::{show_chart, DualAxisWidget};
