use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::sequential_color;
use crate::data::model::FEATURE_COLUMNS;
use crate::state::AppState;

/// Rows shown in the preview table.
const PREVIEW_ROWS: usize = 10;

// Every section renders a placeholder on an empty view instead of feeding
// degenerate input to the charting calls.
fn placeholder(ui: &mut Ui, message: &str) {
    ui.weak(message);
}

// ---------------------------------------------------------------------------
// Dataset overview – preview table
// ---------------------------------------------------------------------------

pub fn overview_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Dataset Overview");
    let Some(dataset) = state.dataset else { return };
    if state.view.is_empty() {
        placeholder(ui, "No songs carry a label for this method.");
        return;
    }

    let n_rows = state.view.len().min(PREVIEW_ROWS);
    let label_column = state.method.label_column();

    egui::ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            let mut builder = TableBuilder::new(ui).striped(true).vscroll(false);
            for _ in &dataset.columns {
                builder = builder.column(Column::auto().at_least(60.0));
            }

            builder
                .header(20.0, |mut header| {
                    for column in &dataset.columns {
                        header.col(|ui| {
                            ui.strong(column.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, n_rows, |mut table_row| {
                        let i = table_row.index();
                        let song = &dataset.songs[state.view.rows[i]];
                        let label = state.view.labels[i];
                        for column in &dataset.columns {
                            table_row.col(|ui| {
                                if column.as_str() == label_column {
                                    ui.label(label.to_string());
                                } else {
                                    ui.label(song.field(column).to_string());
                                }
                            });
                        }
                    });
                });
        });
}

// ---------------------------------------------------------------------------
// Cluster size distribution – bar chart
// ---------------------------------------------------------------------------

pub fn size_distribution(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("{} Cluster Distribution", state.method));
    if state.sizes.is_empty() {
        placeholder(ui, "No clusters to plot.");
        return;
    }

    let bars: Vec<Bar> = state
        .sizes
        .iter()
        .map(|&(id, count)| {
            Bar::new(id as f64, count as f64)
                .width(0.6)
                .fill(state.colors.color_for(id))
                .name(format!("Cluster {id}"))
        })
        .collect();

    Plot::new("cluster_sizes")
        .height(240.0)
        .x_axis_label("Cluster ID")
        .y_axis_label("Number of Songs")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Feature profile – painted heatmap
// ---------------------------------------------------------------------------

const HEATMAP_CELL: Vec2 = Vec2::new(96.0, 28.0);
const HEATMAP_LABEL_WIDTH: f32 = 88.0;

pub fn feature_heatmap(ui: &mut Ui, state: &AppState) {
    ui.heading("Average Feature Values per Cluster");
    let profile = &state.profile;
    if profile.clusters.is_empty() {
        placeholder(ui, "No feature profile to plot.");
        return;
    }

    // Colours normalize over the whole matrix, like the value annotations a
    // reader compares them against.
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for row in &profile.means {
        for &v in row {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    let range = if (hi - lo).abs() < f64::EPSILON { 1.0 } else { hi - lo };

    let size = Vec2::new(
        HEATMAP_LABEL_WIDTH + HEATMAP_CELL.x * FEATURE_COLUMNS.len() as f32,
        HEATMAP_CELL.y * (profile.clusters.len() + 1) as f32,
    );
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(12.0);

    // Column headers.
    for (j, feature) in FEATURE_COLUMNS.iter().enumerate() {
        painter.text(
            rect.min + Vec2::new(HEATMAP_LABEL_WIDTH + (j as f32 + 0.5) * HEATMAP_CELL.x, 0.5 * HEATMAP_CELL.y),
            Align2::CENTER_CENTER,
            *feature,
            font.clone(),
            ui.visuals().strong_text_color(),
        );
    }

    for (i, (&cluster, row)) in profile.clusters.iter().zip(&profile.means).enumerate() {
        let y = rect.min.y + (i as f32 + 1.0) * HEATMAP_CELL.y;

        painter.text(
            egui::pos2(rect.min.x + HEATMAP_LABEL_WIDTH - 8.0, y + 0.5 * HEATMAP_CELL.y),
            Align2::RIGHT_CENTER,
            format!("Cluster {cluster}"),
            font.clone(),
            ui.visuals().strong_text_color(),
        );

        for (j, &value) in row.iter().enumerate() {
            let t = (value - lo) / range;
            let cell = Rect::from_min_size(
                egui::pos2(rect.min.x + HEATMAP_LABEL_WIDTH + j as f32 * HEATMAP_CELL.x, y),
                HEATMAP_CELL,
            );
            painter.rect_filled(cell.shrink(1.0), 2.0, sequential_color(t));

            let text_color = if t > 0.55 {
                Color32::WHITE
            } else {
                Color32::from_gray(40)
            };
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                format!("{value:.2}"),
                font.clone(),
                text_color,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// PCA scatter
// ---------------------------------------------------------------------------

pub fn pca_scatter(ui: &mut Ui, state: &AppState) {
    ui.heading("PCA Visualization (2D Projection)");
    if state.projection.coords.is_empty() {
        placeholder(ui, "No rows to project.");
        return;
    }

    // One series per cluster so the legend lists cluster IDs.
    let cluster_ids = state.view.cluster_ids();
    Plot::new("pca_scatter")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label("pca1")
        .y_axis_label("pca2")
        .show(ui, |plot_ui| {
            for id in cluster_ids {
                let points: Vec<[f64; 2]> = state
                    .view
                    .labels
                    .iter()
                    .zip(&state.projection.coords)
                    .filter(|(&label, _)| label == id)
                    .map(|(_, &coord)| coord)
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(format!("Cluster {id}"))
                        .color(state.colors.color_for(id))
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top genres – bar chart
// ---------------------------------------------------------------------------

pub fn genre_breakdown(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("Top Genres across {} Clusters", state.method));
    if state.top_genres.is_empty() {
        placeholder(ui, "No genre data to plot.");
        return;
    }

    let bars: Vec<Bar> = state
        .top_genres
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            Bar::new(i as f64, pair.count as f64)
                .width(0.6)
                .fill(state.colors.color_for(pair.cluster))
                .name(format!("{} (cluster {})", pair.genre, pair.cluster))
        })
        .collect();

    let genres: Vec<String> = state.top_genres.iter().map(|p| p.genre.clone()).collect();
    Plot::new("genre_breakdown")
        .height(260.0)
        .y_axis_label("count")
        .x_axis_formatter(move |mark, _| {
            let idx = mark.value.round();
            if idx >= 0.0 && (mark.value - idx).abs() < f64::EPSILON {
                genres.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
