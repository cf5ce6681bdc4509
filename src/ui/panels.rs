use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use crate::data::export;
use crate::data::method::ClusterMethod;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – method selection, metrics, export
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Method selector ----
    ui.strong("Clustering method");
    let current = state.method;
    egui::ComboBox::from_id_salt("method_select")
        .selected_text(current.display_name())
        .show_ui(ui, |ui: &mut Ui| {
            for method in ClusterMethod::ALL {
                if ui
                    .selectable_label(current == method, method.display_name())
                    .clicked()
                {
                    state.set_method(method);
                }
            }
        });

    ui.add_space(8.0);
    ui.separator();

    // ---- Headline metrics ----
    metric(ui, "Number of Songs", state.counts.songs);
    metric(ui, "Number of Clusters", state.counts.clusters);
    metric(ui, "Genres", state.counts.genres);

    ui.add_space(8.0);
    ui.separator();

    // ---- Export ----
    ui.strong("Download Filtered Cluster Data");
    if ui.button("Download CSV").clicked() {
        save_export_dialog(state);
    }
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            ui.strong(value.to_string());
        });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Music Clustering Dashboard").strong());
        ui.separator();

        if let Some(ds) = state.dataset {
            ui.label(format!(
                "{} songs loaded, {} in {} view",
                ds.len(),
                state.view.len(),
                state.method
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn save_export_dialog(state: &mut AppState) {
    let Some(dataset) = state.dataset else { return };

    let file = rfd::FileDialog::new()
        .set_title("Save filtered cluster data")
        .set_file_name(export::export_filename(state.method))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::write_csv(&path, dataset, &state.view, state.method, &state.projection) {
            Ok(()) => {
                log::info!("exported {} rows to {}", state.view.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Export error: {e:#}"));
            }
        }
    }
}
