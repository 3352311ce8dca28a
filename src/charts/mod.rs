//! Charts module - Rendering abstraction and chart backends

mod plotter;
mod renderer;
mod surface;

pub use plotter::ChartPlotter;
pub use renderer::{BitmapSurface, RenderError, RenderOptions};
pub use surface::{Chart, ChartError, ChartSurface, Corner, LegendPlacement};
