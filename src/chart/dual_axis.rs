//! Dual y-axis line chart.
//!
//! Two series share the row index as x axis; the left series is scaled on the
//! primary axis and the right series on an independent secondary axis. Tick
//! labels on x are taken from a third column every `xticks_every` rows.

use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::element::PathElement;
use plotters::prelude::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::series::LineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontTransform, IntoFont, RGBColor};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::base::{
    humanize_label, padded_range, parse_color, tick_indices, AXIS_MARGIN, BLACK_COLOR, FONT_FAMILY,
    GRID_COLOR, LINE_WIDTH, MARGIN, WHITE_COLOR, X_LABEL_AREA, Y_LABEL_AREA,
};
use super::font::ensure_fonts;
use crate::dataset::column_values;
use crate::error::{LabError, LabResult};
use crate::setting::SETTINGS;
use crate::utility::extension_of;

/// Length of the x tick marks, in pixels
const TICK_SIZE: i32 = 5;

/// Options for [`plot_dual_y`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Stride between labeled x ticks, in rows
    pub xticks_every: usize,
    /// Left series color
    pub color1: String,
    /// Right series color
    pub color2: String,
    /// Grid lines on the left axis
    pub grid: bool,
    /// Write the chart here before displaying it
    pub filename: Option<PathBuf>,
    /// Open a window with the chart (`gui` feature)
    pub show: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            xticks_every: 12,
            color1: "C0".to_string(),
            color2: "C1".to_string(),
            grid: true,
            filename: None,
            show: true,
        }
    }
}

impl PlotOptions {
    pub fn with_xticks_every(mut self, xticks_every: usize) -> Self {
        self.xticks_every = xticks_every;
        self
    }

    pub fn with_colors(mut self, color1: impl Into<String>, color2: impl Into<String>) -> Self {
        self.color1 = color1.into();
        self.color2 = color2.into();
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Output path, ignoring an empty filename
    pub fn output_path(&self) -> Option<&Path> {
        self.filename
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// File format chosen from the output path extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Vector output (`.svg`)
    Svg,
    /// Raster output; the encoder picks the image format from the extension
    Bitmap,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match extension_of(path).as_deref() {
            Some("svg") => OutputFormat::Svg,
            _ => OutputFormat::Bitmap,
        }
    }
}

/// One plotted series with its axis label and color
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSeries {
    pub name: String,
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: RGBColor,
}

impl AxisSeries {
    fn new(df: &DataFrame, name: &str, color: RGBColor) -> LabResult<Self> {
        Ok(Self {
            name: name.to_string(),
            label: humanize_label(name),
            values: column_values(df, name)?,
            color,
        })
    }

    /// Value range with margins
    pub fn value_range(&self) -> (f64, f64) {
        padded_range(&self.values)
    }

    /// Runs of consecutive finite values as `(row, value)` points
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (ix, value) in self.values.iter().enumerate() {
            match value {
                Some(v) if v.is_finite() => current.push((ix as f64, *v)),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Labeled position on the x axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XTick {
    pub index: usize,
    pub label: String,
}

/// Renderable dual-axis chart
#[derive(Debug, Clone, PartialEq)]
pub struct DualAxisChart {
    pub left: AxisSeries,
    pub right: AxisSeries,
    pub x_ticks: Vec<XTick>,
    pub grid: bool,
    pub len: usize,
    pub font_size: f64,
}

impl DualAxisChart {
    /// Build the chart model from three columns of `df`.
    ///
    /// All columns are resolved before anything else so a missing column
    /// fails the call without side effects.
    pub fn from_frame(
        df: &DataFrame,
        series1: &str,
        series2: &str,
        x: &str,
        options: &PlotOptions,
    ) -> LabResult<Self> {
        let x_labels = df.column(x)?.cast(&DataType::String)?;
        let left_color = parse_color(&options.color1)?;
        let right_color = parse_color(&options.color2)?;
        let left = AxisSeries::new(df, series1, left_color)?;
        let right = AxisSeries::new(df, series2, right_color)?;

        let x_labels = x_labels.str()?;
        let x_ticks = tick_indices(df.height(), options.xticks_every)?
            .into_iter()
            .map(|index| XTick {
                index,
                label: x_labels.get(index).unwrap_or_default().to_string(),
            })
            .collect();

        let font_size = SETTINGS
            .get_float("chart.font_size")
            .filter(|size| *size > 0.0)
            .unwrap_or(12.0);

        Ok(Self {
            left,
            right,
            x_ticks,
            grid: options.grid,
            len: df.height(),
            font_size,
        })
    }

    /// Horizontal range covering every row with a margin on both sides
    pub fn x_range(&self) -> (f64, f64) {
        if self.len <= 1 {
            return (-0.5, 0.5);
        }
        let last = (self.len - 1) as f64;
        (-last * AXIS_MARGIN, last * (1.0 + AXIS_MARGIN))
    }

    /// Tick label for an x position, empty between ticks
    pub fn tick_label(&self, position: f64) -> String {
        self.x_ticks
            .iter()
            .find(|tick| (tick.index as f64 - position).abs() < 1e-6)
            .map(|tick| tick.label.clone())
            .unwrap_or_default()
    }

    /// Write the chart to `path`; `.svg` is vector output, anything else raster.
    ///
    /// The chart is rendered in memory first, so a failed render leaves no
    /// file behind.
    pub fn save(&self, path: &Path, size: (u32, u32)) -> LabResult<()> {
        ensure_fonts()?;

        match OutputFormat::from_path(path) {
            OutputFormat::Svg => {
                let mut svg = String::new();
                {
                    let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
                    self.draw(&root)?;
                    root.present().map_err(drawing_error)?;
                }
                fs::write(path, svg)?;
            }
            OutputFormat::Bitmap => {
                let (width, height) = size;
                let mut pixels = vec![0u8; width as usize * height as usize * 3];
                {
                    let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
                    self.draw(&root)?;
                    root.present().map_err(drawing_error)?;
                }
                save_bitmap(path, &pixels, size)?;
            }
        }

        debug!(path = %path.display(), width = size.0, height = size.1, "chart written");
        Ok(())
    }

    /// Draw onto any backend
    pub fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> LabResult<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE_COLOR).map_err(drawing_error)?;

        let (x_lo, x_hi) = self.x_range();
        let (left_lo, left_hi) = self.left.value_range();
        let (right_lo, right_hi) = self.right.value_range();

        let mut chart = ChartBuilder::on(root)
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .right_y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(x_lo..x_hi, left_lo..left_hi)
            .map_err(drawing_error)?
            .set_secondary_coord(x_lo..x_hi, right_lo..right_hi);

        let tick_font = (FONT_FAMILY, self.font_size).into_font();
        let grid_style = GRID_COLOR.mix(0.6).stroke_width(1);

        // X ticks follow the row stride, not the automatic layout
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(0)
            .y_label_style(tick_font.color(&BLACK_COLOR))
            .y_desc(self.left.label.as_str())
            .axis_desc_style(tick_font.color(&self.left.color))
            .axis_style(self.left.color.stroke_width(1))
            .bold_line_style(grid_style)
            .max_light_lines(0);
        if !self.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(drawing_error)?;

        chart
            .configure_secondary_axes()
            .y_desc(self.right.label.as_str())
            .label_style(tick_font.color(&BLACK_COLOR))
            .axis_desc_style(tick_font.color(&self.right.color))
            .axis_style(self.right.color.stroke_width(1))
            .draw()
            .map_err(drawing_error)?;

        let label_style = tick_font
            .transform(FontTransform::Rotate270)
            .color(&BLACK_COLOR)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for tick in &self.x_ticks {
            let x = tick.index as f64;
            if self.grid {
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(x, left_lo), (x, left_hi)],
                        grid_style,
                    )))
                    .map_err(drawing_error)?;
            }

            let (px, py) = chart.backend_coord(&(x, left_lo));
            root.draw(&PathElement::new(
                vec![(px, py), (px, py + TICK_SIZE)],
                BLACK_COLOR.stroke_width(1),
            ))
            .map_err(drawing_error)?;
            root.draw_text(&tick.label, &label_style, (px, py + TICK_SIZE + 2))
                .map_err(drawing_error)?;
        }

        let left_style = self.left.color.stroke_width(LINE_WIDTH);
        for segment in self.left.segments() {
            chart
                .draw_series(LineSeries::new(segment, left_style))
                .map_err(drawing_error)?;
        }

        let right_style = self.right.color.stroke_width(LINE_WIDTH);
        for segment in self.right.segments() {
            chart
                .draw_secondary_series(LineSeries::new(segment, right_style))
                .map_err(drawing_error)?;
        }

        Ok(())
    }

    /// Display the chart in a native window, blocking until it is closed
    #[cfg(feature = "gui")]
    pub fn show(&self) -> LabResult<()> {
        super::widget::show_chart(self)
    }

    /// Display is unavailable without the `gui` feature
    #[cfg(not(feature = "gui"))]
    pub fn show(&self) -> LabResult<()> {
        info!(
            left = %self.left.name,
            right = %self.right.name,
            "interactive display needs the `gui` feature, skipping"
        );
        Ok(())
    }
}

fn drawing_error<E>(err: DrawingAreaErrorKind<E>) -> LabError
where
    E: std::error::Error + Send + Sync + 'static,
{
    LabError::Drawing(Box::new(err))
}

/// Encode an RGB pixel buffer; the format follows the path extension
fn save_bitmap(path: &Path, pixels: &[u8], (width, height): (u32, u32)) -> LabResult<()> {
    image::save_buffer(path, pixels, width, height, image::ColorType::Rgb8).map_err(|err| match err {
        image::ImageError::IoError(io) => LabError::Io(io),
        other => LabError::Image(other),
    })
}

/// Plot `series1` (left axis) and `series2` (right axis) against the row index.
///
/// X tick labels come from column `x` every `options.xticks_every` rows. The
/// chart is written to `options.filename` when set, then displayed when
/// `options.show` is set.
pub fn plot_dual_y(
    df: &DataFrame,
    series1: &str,
    series2: &str,
    x: &str,
    options: &PlotOptions,
) -> LabResult<()> {
    let chart = DualAxisChart::from_frame(df, series1, series2, x, options)?;

    if let Some(path) = options.output_path() {
        chart.save(path, SETTINGS.chart_size())?;
        info!(path = %path.display(), left = series1, right = series2, "saved dual axis chart");
    }

    if options.show {
        chart.show()?;
    }

    Ok(())
}
