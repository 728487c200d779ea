use std::path::{Path, PathBuf};

use crate::chart::Chart;
use crate::pipeline::{self, PipelineConfig, Report};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct ViewerState {
    /// Configuration of the run that produced `report`.
    pub config: PipelineConfig,

    /// Charts and printed result of the last successful run.
    pub report: Report,

    /// Index of the chart on screen.
    pub current: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set when the window should be resized to the current chart's figure size.
    pub resize_pending: bool,
}

impl ViewerState {
    pub fn new(config: PipelineConfig, report: Report) -> Self {
        Self {
            config,
            report,
            current: 0,
            status_message: None,
            resize_pending: true,
        }
    }

    pub fn chart_count(&self) -> usize {
        self.report.charts.len()
    }

    pub fn current_chart(&self) -> Option<&Chart> {
        self.report.charts.get(self.current)
    }

    /// Show chart `index`, clamped to the available charts.
    pub fn go_to(&mut self, index: usize) {
        let last = self.chart_count().saturating_sub(1);
        let index = index.min(last);
        if index != self.current {
            self.current = index;
            self.resize_pending = true;
        }
    }

    pub fn next(&mut self) {
        self.go_to(self.current + 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    /// Whether a resize was requested since the last call.
    pub fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }

    /// Re-run the pipeline on another dataset. On failure the previous
    /// charts stay and the error is shown.
    pub fn reload(&mut self, path: PathBuf) {
        let config = PipelineConfig {
            dataset_path: path,
            ..self.config.clone()
        };
        match pipeline::run(&config) {
            Ok(report) => {
                println!("{}", report.month_line());
                self.config = config;
                self.report = report;
                self.current = 0;
                self.resize_pending = true;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {:#}", anyhow::Error::from(e));
                self.status_message = Some(format!(
                    "Error: could not load {}",
                    config.dataset_path.display()
                ));
            }
        }
    }

    /// Write the table behind the current chart to `path`.
    pub fn export_current(&mut self, path: &Path) {
        let Some(chart) = self.current_chart() else {
            return;
        };
        match chart.export_csv(path) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("{:#}", anyhow::Error::from(e));
                self.status_message = Some(format!("Error: could not write {}", path.display()));
            }
        }
    }
}
