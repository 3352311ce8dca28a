//! Growth Curves Main Application
//! Native window hosting the chart, and the surface that opens it.

use crate::charts::{Chart, ChartError, ChartSurface, LegendPlacement};
use crate::data::Domain;
use crate::gui::ChartViewer;
use log::{info, warn};
use std::ffi::OsString;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Display unavailable: {0}")]
    DisplayUnavailable(String),
}

/// Native window settings.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Growth Curves".to_string(),
            inner_size: [900.0, 600.0],
            min_inner_size: [600.0, 400.0],
        }
    }
}

/// Main application window.
pub struct GrowthCurveApp {
    viewer: ChartViewer,
}

impl GrowthCurveApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, title: String, chart: Chart) -> Self {
        Self {
            viewer: ChartViewer::new(title, chart),
        }
    }
}

impl eframe::App for GrowthCurveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui);
        });
    }
}

/// Check that an X11 or Wayland display is configured.
///
/// `lookup` reads an environment variable; unset and empty are treated alike.
pub fn probe_unix_display<F>(lookup: F) -> Result<(), WindowError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let has = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
    if has("DISPLAY") || has("WAYLAND_DISPLAY") {
        Ok(())
    } else {
        Err(WindowError::DisplayUnavailable(
            "neither DISPLAY nor WAYLAND_DISPLAY is set".to_string(),
        ))
    }
}

/// Fail fast instead of letting the windowing backend hang or abort.
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn check_display() -> Result<(), WindowError> {
    probe_unix_display(|key| std::env::var_os(key))
}

#[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
fn check_display() -> Result<(), WindowError> {
    Ok(())
}

/// Surface that shows the chart in a native window and blocks until closed.
pub struct WindowSurface {
    chart: Chart,
    options: WindowOptions,
}

impl WindowSurface {
    pub fn new(options: WindowOptions) -> Self {
        Self {
            chart: Chart::new(),
            options,
        }
    }

    fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.options.inner_size)
                .with_min_inner_size(self.options.min_inner_size)
                .with_title(&self.options.title),
            ..Default::default()
        }
    }
}

impl ChartSurface for WindowSurface {
    type Output = ();
    type Error = WindowError;

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

    fn display(self) -> Result<(), WindowError> {
        if let Err(e) = check_display() {
            warn!("{}", e);
            return Err(e);
        }

        let native_options = self.native_options();
        let Self { chart, options } = self;
        let title = options.title;
        let app_name = title.clone();
        info!("opening window with {} curve(s)", chart.series().len());

        eframe::run_native(
            &app_name,
            native_options,
            Box::new(move |cc| Ok(Box::new(GrowthCurveApp::new(cc, title, chart)))),
        )
        .map_err(|e| WindowError::DisplayUnavailable(e.to_string()))?;

        info!("window closed");
        Ok(())
    }
}
