//! Chart Plotter Module
//! Draws a `Chart` interactively using egui_plot.

use crate::charts::{Chart, Corner};
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Line colors, assigned to series in chart order.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(127, 127, 127), // Grey
    Color32::from_rgb(188, 189, 34),  // Olive
    Color32::from_rgb(23, 190, 207),  // Cyan
];

pub const LINE_WIDTH: f32 = 2.0;

/// Draws charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the series at `index`.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    fn legend_corner(corner: Corner) -> egui_plot::Corner {
        match corner {
            Corner::UpperRight => egui_plot::Corner::RightTop,
            Corner::UpperLeft => egui_plot::Corner::LeftTop,
            Corner::LowerLeft => egui_plot::Corner::LeftBottom,
            Corner::LowerRight => egui_plot::Corner::RightBottom,
        }
    }

    /// Draw every series of `chart` as a line on one set of axes.
    /// X-axis: n, Y-axis: f(n)
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &Chart) {
        let mut plot = Plot::new("growth_curves")
            .x_axis_label("n")
            .y_axis_label("f(n)")
            .include_x(0.0)
            .include_y(0.0);

        if let Some(corner) = chart.legend_corner() {
            plot = plot.legend(Legend::default().position(Self::legend_corner(corner)));
        }

        plot.show(ui, |plot_ui| {
            for (i, series) in chart.series().iter().enumerate() {
                let color = Self::series_color(i);

                // Each run is its own line; same name and color keep one legend entry
                for segment in chart.segments(series) {
                    let points: PlotPoints = segment.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(color)
                            .width(LINE_WIDTH)
                            .name(&series.label),
                    );
                }
            }
        });
    }
}
