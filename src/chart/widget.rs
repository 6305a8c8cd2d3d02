//! Native window for interactive display of a dual-axis chart.

use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};
use plotters::style::RGBColor;
use std::f32::consts::FRAC_PI_2;

use super::base::{calculate_axis_ticks, format_tick, BLACK_COLOR, GREY_COLOR, GRID_COLOR, WHITE_COLOR};
use super::dual_axis::{AxisSeries, DualAxisChart};
use crate::error::{LabError, LabResult};
use crate::setting::SETTINGS;

const AXIS_WIDTH: f32 = 70.0;
const AXIS_HEIGHT: f32 = 60.0;
const PADDING: f32 = 10.0;
const TICK_LENGTH: f32 = 4.0;

fn to_color32(color: RGBColor) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

/// Galley origin for a label turned a quarter counter-clockwise so it reads
/// bottom to top, centered on `x` and ending at `top`
fn rotated_label_anchor(x: f32, top: f32, size: Vec2) -> Pos2 {
    Pos2::new(x - size.y / 2.0, top + size.x)
}

/// Vertical mapping from values to screen coordinates
struct ValueScale {
    lo: f64,
    hi: f64,
}

impl ValueScale {
    fn new((lo, hi): (f64, f64)) -> Self {
        Self { lo, hi }
    }

    fn y(&self, rect: Rect, value: f64) -> f32 {
        let normalized = (value - self.lo) / (self.hi - self.lo);
        rect.bottom() - normalized as f32 * rect.height()
    }
}

/// Chart widget painting a [`DualAxisChart`]
pub struct DualAxisWidget {
    chart: DualAxisChart,
}

impl DualAxisWidget {
    pub fn new(chart: DualAxisChart) -> Self {
        Self { chart }
    }

    fn x(&self, rect: Rect, position: f64) -> f32 {
        let (lo, hi) = self.chart.x_range();
        let normalized = (position - lo) / (hi - lo);
        rect.left() + normalized as f32 * rect.width()
    }

    pub fn show(&self, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let full = response.rect;
        painter.rect_filled(full, 0.0, to_color32(WHITE_COLOR));

        let plot_rect = Rect::from_min_max(
            Pos2::new(full.left() + AXIS_WIDTH, full.top() + PADDING),
            Pos2::new(full.right() - AXIS_WIDTH, full.bottom() - AXIS_HEIGHT),
        );
        if plot_rect.width() <= 0.0 || plot_rect.height() <= 0.0 {
            return;
        }

        let left_scale = ValueScale::new(self.chart.left.value_range());
        let right_scale = ValueScale::new(self.chart.right.value_range());

        self.draw_y_axis(&painter, plot_rect, &self.chart.left, &left_scale, true);
        self.draw_y_axis(&painter, plot_rect, &self.chart.right, &right_scale, false);
        self.draw_x_axis(&painter, plot_rect);

        self.draw_series(&painter, plot_rect, &self.chart.left, &left_scale);
        self.draw_series(&painter, plot_rect, &self.chart.right, &right_scale);

        painter.rect_stroke(
            plot_rect,
            0.0,
            Stroke::new(1.0, to_color32(GREY_COLOR)),
            StrokeKind::Inside,
        );
    }

    fn draw_series(&self, painter: &egui::Painter, rect: Rect, series: &AxisSeries, scale: &ValueScale) {
        let stroke = Stroke::new(2.0, to_color32(series.color));
        for segment in series.segments() {
            let points: Vec<Pos2> = segment
                .iter()
                .map(|(x, y)| Pos2::new(self.x(rect, *x), scale.y(rect, *y)))
                .collect();
            if points.len() > 1 {
                painter.add(egui::Shape::line(points, stroke));
            } else if let Some(point) = points.first() {
                painter.circle_filled(*point, 1.5, stroke.color);
            }
        }
    }

    fn draw_y_axis(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        series: &AxisSeries,
        scale: &ValueScale,
        left: bool,
    ) {
        let ticks = calculate_axis_ticks(scale.lo, scale.hi, 5);
        let step = if ticks.len() > 1 { ticks[1] - ticks[0] } else { 1.0 };
        let label_color = to_color32(BLACK_COLOR);
        let axis_x = if left { rect.left() } else { rect.right() };
        let direction = if left { -1.0 } else { 1.0 };

        for tick in ticks {
            let y = scale.y(rect, tick);

            // Grid follows the left axis only
            if left && self.chart.grid {
                painter.line_segment(
                    [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                    Stroke::new(1.0, to_color32(GRID_COLOR)),
                );
            }

            painter.line_segment(
                [Pos2::new(axis_x, y), Pos2::new(axis_x + direction * TICK_LENGTH, y)],
                Stroke::new(1.0, to_color32(series.color)),
            );
            painter.text(
                Pos2::new(axis_x + direction * (TICK_LENGTH + 2.0), y),
                if left { Align2::RIGHT_CENTER } else { Align2::LEFT_CENTER },
                format_tick(tick, step),
                FontId::proportional(11.0),
                label_color,
            );
        }

        let title_x = if left { rect.left() - AXIS_WIDTH + 2.0 } else { rect.right() + AXIS_WIDTH - 2.0 };
        painter.text(
            Pos2::new(title_x, rect.top()),
            if left { Align2::LEFT_BOTTOM } else { Align2::RIGHT_BOTTOM },
            &series.label,
            FontId::proportional(12.0),
            to_color32(series.color),
        );
    }

    fn draw_x_axis(&self, painter: &egui::Painter, rect: Rect) {
        for tick in &self.chart.x_ticks {
            let x = self.x(rect, tick.index as f64);

            if self.chart.grid {
                painter.line_segment(
                    [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                    Stroke::new(1.0, to_color32(GRID_COLOR)),
                );
            }

            painter.line_segment(
                [Pos2::new(x, rect.bottom()), Pos2::new(x, rect.bottom() + TICK_LENGTH)],
                Stroke::new(1.0, to_color32(GREY_COLOR)),
            );
            let galley = painter.layout_no_wrap(
                tick.label.clone(),
                FontId::proportional(10.0),
                to_color32(BLACK_COLOR),
            );
            let anchor = rotated_label_anchor(x, rect.bottom() + TICK_LENGTH + 2.0, galley.size());
            painter.add(TextShape::new(anchor, galley, to_color32(BLACK_COLOR)).with_angle(-FRAC_PI_2));
        }
    }
}

struct ChartApp {
    widget: DualAxisWidget,
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.widget.show(ui);
        });
    }
}

/// Open a window with the chart and block until it is closed
pub fn show_chart(chart: &DualAxisChart) -> LabResult<()> {
    let (width, height) = SETTINGS.chart_size();
    let title = SETTINGS
        .get_string("chart.title")
        .unwrap_or_else(|| "macro_lab".to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_title(title.clone()),
        ..Default::default()
    };

    let app = ChartApp {
        widget: DualAxisWidget::new(chart.clone()),
    };

    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| LabError::Display(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_label_hangs_below_tick() {
        let anchor = rotated_label_anchor(100.0, 50.0, Vec2::new(30.0, 12.0));
        assert_eq!(anchor, Pos2::new(94.0, 80.0));
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color32(RGBColor(0x1f, 0x77, 0xb4)), Color32::from_rgb(0x1f, 0x77, 0xb4));
    }
}
