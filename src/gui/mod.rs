//! GUI module - Native window and chart view

mod app;
mod chart_viewer;

#[cfg(test)]
pub use app::probe_unix_display;
pub use app::{WindowError, WindowOptions, WindowSurface};
pub use chart_viewer::ChartViewer;
