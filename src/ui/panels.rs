use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Stroke, Ui};

use crate::chart::{CardSpec, AVERAGES_TITLE};
use crate::color;
use crate::state::{AppState, DashboardView};

// ---------------------------------------------------------------------------
// Year selector
// ---------------------------------------------------------------------------

/// Dropdown listing every year of the dataset. Only those years can be picked.
pub fn year_selector(ui: &mut Ui, state: &mut AppState) {
    let Some(current) = state.selected_year() else {
        ui.label("Sin datos cargados.");
        return;
    };

    let mut picked = None;
    egui::ComboBox::from_id_salt("year_dropdown")
        .width(200.0)
        .selected_text(RichText::new(current.to_string()).color(color::font()))
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &state.years {
                if ui.selectable_label(year == current, year.to_string()).clicked() {
                    picked = Some(year);
                }
            }
        });

    if let Some(year) = picked.filter(|y| *y != current) {
        if let Err(e) = state.on_year_selected(year) {
            log::error!("rejected year selection: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Average cards (right side panel)
// ---------------------------------------------------------------------------

pub fn averages_panel(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(AVERAGES_TITLE);
        ui.add_space(12.0);

        let Some(view) = &state.view else {
            return;
        };
        for card in &view.cards {
            summary_card(ui, card);
            ui.add_space(20.0);
        }
    });
}

fn summary_card(ui: &mut Ui, card: &CardSpec) {
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(card.border_width, color::hex_color(card.border_color)))
        .corner_radius(card.corner_radius)
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(150.0);
            ui.vertical_centered(|ui: &mut Ui| {
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(50.0, 50.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, 4.0, color::hex_color(card.icon_color));
                response.on_hover_text(card.fuel_type.to_string());

                ui.label(
                    RichText::new(&card.label)
                        .size(24.0)
                        .strong()
                        .color(color::hex_color(card.label_color)),
                );
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_view = state.view.is_some();
            if ui
                .add_enabled(has_view, egui::Button::new("Exportar vista…"))
                .clicked()
            {
                if let Some(view) = &state.view {
                    state.status_message = export_view_dialog(view)
                        .err()
                        .map(|e| format!("Error: {e:#}"));
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} meses cargados, {} años",
                ds.len(),
                state.years.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir precios de combustibles")
        .add_filter("Archivos soportados", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) if dataset.is_empty() => {
                log::error!("{} contains no rows", path.display());
                state.status_message =
                    Some(format!("Error: {} no contiene filas", path.display()));
            }
            Ok(dataset) => state.set_dataset(Arc::new(dataset)),
            Err(e) => {
                // Keep the current dataset.
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn export_view_dialog(view: &DashboardView) -> anyhow::Result<()> {
    let file = rfd::FileDialog::new()
        .set_title("Exportar vista")
        .set_file_name(format!("vista_{}.json", view.year))
        .add_filter("JSON", &["json"])
        .save_file();

    match file {
        Some(path) => export_view(view, &path),
        None => Ok(()),
    }
}

/// Write the view model as pretty-printed JSON.
pub fn export_view(view: &DashboardView, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(view).context("serializing view")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported view for {} to {}", view.year, path.display());
    Ok(())
}
