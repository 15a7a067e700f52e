use eframe::egui::{self, Color32, Frame, RichText, ScrollArea, Ui};

use crate::color::isochrone_stroke;
use crate::data::model::WalkTimeSelection;
use crate::state::{AppEvent, AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – walk time and scorecards
// ---------------------------------------------------------------------------

/// Render the left panel: the walk-time dropdown and the scorecards.
pub fn side_panel(ui: &mut Ui, state: &AppState, events: &mut Vec<AppEvent>) {
    ui.heading("Coffee Shops Close to the Office");
    ui.label(format!("5, 10, 15 min. walk times from {}", state.data.reference.name));
    ui.separator();

    ui.strong("Walk time");
    egui::ComboBox::from_id_salt("walk_time")
        .selected_text(state.selection.display_label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in WalkTimeSelection::OPTIONS {
                if ui
                    .selectable_label(state.selection == option, option.display_label())
                    .clicked()
                    && state.selection != option
                {
                    events.push(AppEvent::Select(option));
                }
            }
        });
    ui.separator();

    if state.data.locations.is_empty() {
        ui.label(RichText::new("No coffee shop locations loaded.").color(Color32::RED));
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (title, value) in state.scorecards.entries() {
                scorecard(ui, title, value);
            }

            ui.add_space(8.0);
            ui.strong("Isochrones");
            for &walk_time in state.selection.visible_isochrones() {
                ui.label(RichText::new(walk_time.to_string()).color(isochrone_stroke(walk_time)));
            }
        });
}

fn scorecard(ui: &mut Ui, title: &str, value: &str) {
    Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, Color32::from_gray(60)))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(title).strong());
                ui.label(RichText::new(value).size(28.0).strong());
            });
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, events: &mut Vec<AppEvent>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                if let Some(dir) = pick_data_dir(state) {
                    events.push(AppEvent::OpenDataDir(dir));
                }
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                if let Some(path) = pick_export_path(state) {
                    events.push(AppEvent::ExportCsv(path));
                }
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            if ui.selectable_label(state.tab == tab, tab.label()).clicked() && state.tab != tab {
                events.push(AppEvent::ShowTab(tab));
            }
        }

        ui.separator();

        ui.label(format!(
            "{} locations loaded, {} selected",
            state.data.locations.len(),
            state.view.rows.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn pick_data_dir(state: &AppState) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open walk-time data folder")
        .set_directory(&state.data_dir)
        .pick_folder()
}

fn pick_export_path(state: &AppState) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export selected coffee shops")
        .add_filter("CSV", &["csv"])
        .set_file_name(format!("cafes-{}.csv", state.selection.value()))
        .save_file()
}
