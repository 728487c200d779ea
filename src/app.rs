use eframe::egui;

use crate::error::{AnalysisError, Result};
use crate::pipeline::{PipelineConfig, Report};
use crate::state::ViewerState;
use crate::ui::{panels, plot};

/// Room taken by the menu bar above the chart.
const TOP_BAR_HEIGHT: f32 = 32.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InsightsApp {
    pub state: ViewerState,
}

impl InsightsApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }

    fn window_size(&self) -> Option<egui::Vec2> {
        self.state.current_chart().map(|c| {
            let [w, h] = c.style.size_points();
            egui::vec2(w, h + TOP_BAR_HEIGHT)
        })
    }
}

impl eframe::App for InsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.state.next();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            self.state.previous();
        }
        if self.state.take_resize() {
            if let Some(size) = self.window_size() {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
            }
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.current_chart() {
            Some(chart) => plot::bar_chart(ui, chart),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading("No charts to show");
                });
            }
        });
    }
}

/// Open the chart window and block until it is closed.
pub fn show(config: PipelineConfig, report: Report) -> Result<()> {
    let app = InsightsApp::new(ViewerState::new(config, report));
    let size = app.window_size().unwrap_or(egui::vec2(1200.0, 640.0));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Netflix Insights",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| AnalysisError::Render(e.to_string()))
}
