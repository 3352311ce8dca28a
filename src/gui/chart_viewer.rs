//! Chart Viewer Widget
//! Central panel content: a heading and the interactive growth chart.

use crate::charts::{Chart, ChartPlotter};
use egui::RichText;

/// Displays one chart filling the available space.
pub struct ChartViewer {
    pub title: String,
    pub chart: Chart,
}

impl ChartViewer {
    pub fn new(title: impl Into<String>, chart: Chart) -> Self {
        Self {
            title: title.into(),
            chart,
        }
    }

    /// Draw the chart viewer
    pub fn show(&self, ui: &mut egui::Ui) {
        if self.chart.series().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&self.title).size(18.0).strong());
        });
        ui.add_space(8.0);

        ChartPlotter::draw_line_chart(ui, &self.chart);
    }
}
