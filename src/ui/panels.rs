use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export table…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .add_enabled(state.current > 0, egui::Button::new("⏴ Previous"))
            .clicked()
        {
            state.previous();
        }
        ui.label(format!("{} / {}", state.current + 1, state.chart_count()));
        if ui
            .add_enabled(
                state.current + 1 < state.chart_count(),
                egui::Button::new("Next ⏵"),
            )
            .clicked()
        {
            state.next();
        }

        ui.separator();

        ui.label(format!("{} titles loaded", state.report.titles_loaded));
        ui.separator();
        ui.label(state.report.month_line());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Open title catalog")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.reload(path);
    }
}

pub fn export_file_dialog(state: &mut ViewerState) {
    let suggested = state
        .current_chart()
        .map(|c| format!("{}.csv", c.style.title.to_lowercase().replace(' ', "_")))
        .unwrap_or_else(|| "table.csv".to_string());

    let file = rfd::FileDialog::new()
        .set_title("Export chart table")
        .add_filter("CSV", &["csv"])
        .set_file_name(suggested)
        .save_file();

    if let Some(path) = file {
        state.export_current(&path);
    }
}
