use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MusicClusterApp {
    pub state: AppState,
}

impl Default for MusicClusterApp {
    fn default() -> Self {
        Self {
            state: AppState::load(),
        }
    }
}

impl eframe::App for MusicClusterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: method selection, metrics, export ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.state.load_error {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("Failed to load dataset: {error}"),
                    );
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui: &mut egui::Ui| {
                charts::overview_section(ui, &self.state);
                ui.separator();
                charts::size_distribution(ui, &self.state);
                ui.separator();
                charts::feature_heatmap(ui, &self.state);
                ui.separator();
                charts::pca_scatter(ui, &self.state);
                ui.separator();
                charts::genre_breakdown(ui, &self.state);
            });
        });
    }
}
