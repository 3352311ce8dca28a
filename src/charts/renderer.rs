//! Static Chart Renderer
//! Rasterises a `Chart` into an in-memory RGB image with plotters.
//!
//! This is the headless counterpart of the window: the same curves, palette
//! and legend corner, drawn without any display backend.

use crate::charts::plotter::{ChartPlotter, LINE_WIDTH};
use crate::charts::{Chart, ChartError, ChartSurface, Corner, LegendPlacement};
use crate::data::Domain;
use image::RgbImage;
use log::debug;
use plotters::prelude::*;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Bitmap buffer does not match {width}x{height}")]
    Buffer { width: u32, height: u32 },
}

/// Options for static rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Caption, axis labels and legend. Needs a system font.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            title: "Growth Curves".to_string(),
            draw_labels: true,
        }
    }
}

/// Renders a chart into an image buffer.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn render(chart: &Chart, options: &RenderOptions) -> Result<RgbImage, RenderError> {
        let (width, height) = (options.width, options.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, chart, options)?;
            root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer { width, height })
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        chart: &Chart,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let draw_err = |e: DrawingAreaErrorKind<DB::ErrorType>| RenderError::Draw(e.to_string());

        root.fill(&WHITE).map_err(draw_err)?;

        let (x_range, y_range) = Self::axis_ranges(chart);
        let mut builder = ChartBuilder::on(root);
        builder.margin(15);
        if options.draw_labels {
            builder
                .caption(&options.title, ("sans-serif", 22))
                .x_label_area_size(35)
                .y_label_area_size(50);
        }
        let mut ctx = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        if options.draw_labels {
            ctx.configure_mesh()
                .x_desc("n")
                .y_desc("f(n)")
                .draw()
                .map_err(draw_err)?;
        }

        for (i, series) in chart.series().iter().enumerate() {
            let color = Self::to_rgb(ChartPlotter::series_color(i));
            let style = color.stroke_width(LINE_WIDTH as u32);
            let segments = chart.segments(series);
            debug!("drawing '{}' as {} segment(s)", series.label, segments.len());

            for (j, segment) in segments.into_iter().enumerate() {
                let drawn = ctx
                    .draw_series(LineSeries::new(segment, style))
                    .map_err(draw_err)?;
                // One legend entry per series, not per segment
                if j == 0 {
                    drawn.label(series.label.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        if options.draw_labels {
            if let Some(corner) = chart.legend_corner() {
                ctx.configure_series_labels()
                    .position(Self::label_position(corner))
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(draw_err)?;
            }
        }

        Ok(())
    }

    /// Data bounds padded so lines do not sit on the frame.
    fn axis_ranges(chart: &Chart) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let Some((x0, x1, y0, y1)) = chart.bounds() else {
            return (0.0..1.0, 0.0..1.0);
        };
        let pad = |lo: f64, hi: f64| {
            let span = if hi > lo { hi - lo } else { 1.0 };
            (lo - span * 0.02)..(hi + span * 0.05)
        };
        (pad(x0, x1), pad(y0, y1))
    }

    fn to_rgb(color: egui::Color32) -> RGBColor {
        RGBColor(color.r(), color.g(), color.b())
    }

    fn label_position(corner: Corner) -> SeriesLabelPosition {
        match corner {
            Corner::UpperRight => SeriesLabelPosition::UpperRight,
            Corner::UpperLeft => SeriesLabelPosition::UpperLeft,
            Corner::LowerLeft => SeriesLabelPosition::LowerLeft,
            Corner::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Headless surface: collects curves and renders them to a bitmap on display.
pub struct BitmapSurface {
    chart: Chart,
    options: RenderOptions,
}

impl BitmapSurface {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            chart: Chart::new(),
            options,
        }
    }
}

impl ChartSurface for BitmapSurface {
    type Output = RgbImage;
    type Error = RenderError;

    fn add_curve(
        &mut self,
        domain: &Arc<Domain>,
        values: &[Option<f64>],
        label: &str,
    ) -> Result<(), ChartError> {
        self.chart.add_curve(domain, values, label)
    }

    fn show_legend(&mut self, placement: LegendPlacement) {
        self.chart.show_legend(placement);
    }

    fn display(self) -> Result<RgbImage, RenderError> {
        StaticChartRenderer::render(&self.chart, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Curve;

    fn unlabeled(width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            draw_labels: false,
            ..RenderOptions::default()
        }
    }

    fn growth_surface(options: RenderOptions) -> BitmapSurface {
        let domain = Arc::new(Domain::default());
        let mut surface = BitmapSurface::new(options);
        for curve in Curve::sample_all(Arc::clone(&domain)) {
            surface
                .add_curve(&domain, &curve.values, curve.label())
                .unwrap();
        }
        surface.show_legend(LegendPlacement::Best);
        surface
    }

    #[test]
    fn renders_requested_size() {
        let img = growth_surface(unlabeled(320, 200)).display().unwrap();
        assert_eq!(img.dimensions(), (320, 200));
    }

    #[test]
    fn every_series_color_reaches_the_bitmap() {
        let img = growth_surface(unlabeled(400, 300)).display().unwrap();
        for i in 0..4 {
            let c = ChartPlotter::series_color(i);
            let want = [c.r(), c.g(), c.b()];
            assert!(
                img.pixels().any(|p| p.0 == want),
                "no pixel drawn in color of series {}",
                i
            );
        }
    }

    #[test]
    fn empty_chart_is_blank() {
        let img = BitmapSurface::new(unlabeled(64, 64)).display().unwrap();
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn axis_ranges_cover_the_data() {
        let chart = growth_surface(unlabeled(10, 10)).chart;
        let (x, y) = StaticChartRenderer::axis_ranges(&chart);
        assert!(x.start < 0.0 && x.end > 99.0);
        assert!(y.start < 0.0 && y.end > 99.0 * 99f64.log2());
    }

    #[test]
    fn label_positions_follow_corner() {
        assert!(matches!(
            StaticChartRenderer::label_position(Corner::UpperLeft),
            SeriesLabelPosition::UpperLeft
        ));
    }
}
