//! Growth Curves - compares n, log2 n, n log2 n and n log10 n on one chart.
//!
//! Opens a native window and exits once it is closed.

mod charts;
mod data;
mod growth;
mod gui;

use anyhow::Context;
use growth::GrowthCurvePlotter;
use log::error;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    GrowthCurvePlotter::new()
        .render()
        .inspect_err(|e| {
            if e.is_display_unavailable() {
                error!("no graphical display found, run from a desktop session");
            }
        })
        .context("failed to show growth curves")
}
