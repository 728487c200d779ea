mod analysis;
mod app;
mod chart;
mod color;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use pipeline::PipelineConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = PipelineConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        config.dataset_path = PathBuf::from(path);
    }

    let report = pipeline::run(&config).context("analysis failed")?;
    println!("{}", report.month_line());

    app::show(config, report).context("chart viewer failed")
}
