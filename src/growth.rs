//! Growth Curve Plotter
//! Samples the growth functions and hands them to a chart surface.

use crate::charts::{
    BitmapSurface, Chart, ChartError, ChartSurface, LegendPlacement, RenderError, RenderOptions,
};
use crate::data::{Curve, Domain, DOMAIN_SIZE};
use crate::gui::{WindowError, WindowOptions, WindowSurface};
use image::RgbImage;
use log::info;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotterError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PlotterError {
    pub fn is_display_unavailable(&self) -> bool {
        matches!(self, PlotterError::Window(WindowError::DisplayUnavailable(_)))
    }
}

/// Plotter settings. Fixed at their defaults when run as a program.
#[derive(Debug, Clone)]
pub struct PlotterSettings {
    pub domain_size: usize,
    pub legend: LegendPlacement,
    pub window: WindowOptions,
    pub bitmap: RenderOptions,
}

impl Default for PlotterSettings {
    fn default() -> Self {
        Self {
            domain_size: DOMAIN_SIZE,
            legend: LegendPlacement::Best,
            window: WindowOptions::default(),
            bitmap: RenderOptions::default(),
        }
    }
}

/// Computes the growth curves and renders them on one chart.
///
/// Holds no state beyond its settings, so it can render any number of
/// times and onto any `ChartSurface`.
#[derive(Debug, Clone, Default)]
pub struct GrowthCurvePlotter {
    pub settings: PlotterSettings,
}

impl GrowthCurvePlotter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PlotterSettings) -> Self {
        Self { settings }
    }

    /// The four curves over a freshly generated, shared domain.
    pub fn curves(&self) -> Vec<Curve> {
        let domain = Arc::new(Domain::new(self.settings.domain_size));
        Curve::sample_all(domain)
    }

    /// Add every curve and the legend to `surface`, then display it.
    pub fn render_on<S>(&self, mut surface: S) -> Result<S::Output, PlotterError>
    where
        S: ChartSurface,
        PlotterError: From<S::Error>,
    {
        let curves = self.curves();
        info!(
            "rendering {} curves over {} points",
            curves.len(),
            self.settings.domain_size
        );

        for curve in &curves {
            surface
                .add_curve(&curve.domain, &curve.values, curve.label())
                .map_err(PlotterError::Chart)?;
        }
        surface.show_legend(self.settings.legend);

        Ok(surface.display()?)
    }

    /// Open a window with the chart and block until it is closed.
    pub fn render(&self) -> Result<(), PlotterError> {
        self.render_on(WindowSurface::new(self.settings.window.clone()))
    }

    /// Build the chart in memory without displaying it anywhere.
    #[allow(dead_code)]
    pub fn chart(&self) -> Result<Chart, PlotterError> {
        self.render_on(Chart::new())
    }

    /// Rasterise the chart without a display.
    #[allow(dead_code)]
    pub fn render_bitmap(&self) -> Result<RgbImage, PlotterError> {
        self.render_on(BitmapSurface::new(self.settings.bitmap.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Corner;
    use crate::gui::probe_unix_display;
    use std::collections::HashSet;

    #[test]
    fn chart_has_the_four_labelled_curves() {
        let chart = GrowthCurvePlotter::new().chart().unwrap();
        let labels: HashSet<&str> = chart.labels().into_iter().collect();
        let want: HashSet<&str> = ["linear", "log2 n", "n log2 n", "n log10 n"]
            .into_iter()
            .collect();
        assert_eq!(chart.series().len(), 4);
        assert_eq!(labels, want);
        assert_eq!(chart.legend(), Some(LegendPlacement::Best));
        assert_eq!(chart.legend_corner(), Some(Corner::UpperLeft));
    }

    #[test]
    fn every_series_spans_the_domain() {
        let chart = GrowthCurvePlotter::new().chart().unwrap();
        let domain = chart.domain().unwrap();
        assert_eq!(domain.len(), 100);
        assert!(chart.series().iter().all(|s| s.values.len() == 100));
    }

    #[test]
    fn rendering_twice_gives_the_same_chart() {
        let plotter = GrowthCurvePlotter::new();
        let a = plotter.chart().unwrap();
        let b = plotter.chart().unwrap();
        for (x, y) in a.series().iter().zip(b.series()) {
            assert_eq!(x.label, y.label);
            assert_eq!(x.values, y.values);
        }
    }

    #[test]
    fn domain_size_comes_from_settings() {
        let plotter = GrowthCurvePlotter::with_settings(PlotterSettings {
            domain_size: 10,
            ..PlotterSettings::default()
        });
        let curves = plotter.curves();
        assert!(curves.iter().all(|c| c.values.len() == 10));
    }

    #[test]
    fn headless_bitmap_render() {
        let mut settings = PlotterSettings::default();
        settings.bitmap = RenderOptions {
            width: 200,
            height: 150,
            draw_labels: false,
            ..RenderOptions::default()
        };
        let img = GrowthCurvePlotter::with_settings(settings)
            .render_bitmap()
            .unwrap();
        assert_eq!(img.dimensions(), (200, 150));
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn window_render_reports_missing_display() {
        // Only meaningful where the probe runs and no display is configured
        let headless = probe_unix_display(|key| std::env::var_os(key)).is_err();
        if !cfg!(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))
            || !headless
        {
            return;
        }
        let err = GrowthCurvePlotter::new().render().unwrap_err();
        assert!(err.is_display_unavailable());
    }
}
