use eframe::egui::{self, RichText};

use crate::chart::DASHBOARD_TITLE;
use crate::color;
use crate::config::Layout;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FuelDashboardApp {
    pub state: AppState,
}

impl FuelDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        apply_theme(&cc.egui_ctx);
        Self { state }
    }
}

/// Light visuals on the cream background with blue text.
fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::light());
    ctx.style_mut(|style| {
        let bg = color::background();
        style.visuals.panel_fill = bg;
        style.visuals.window_fill = bg;
        style.visuals.extreme_bg_color = bg;
        style.visuals.override_text_color = Some(color::font());
    });
}

impl eframe::App for FuelDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar, title, year selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new(DASHBOARD_TITLE).size(28.0).strong());
                ui.add_space(4.0);
                panels::year_selector(ui, &mut self.state);
            });
            ui.add_space(6.0);
        });

        // ---- Right side panel: yearly averages ----
        if self.state.layout == Layout::Extended {
            egui::SidePanel::right("averages_panel")
                .exact_width(ctx.screen_rect().width() * 0.25)
                .resizable(false)
                .show(ctx, |ui| {
                    panels::averages_panel(ui, &self.state);
                });
        }

        // ---- Bottom panel: raw rows ----
        egui::TopBottomPanel::bottom("rows_panel")
            .resizable(true)
            .show(ctx, |ui| {
                table::year_rows(ui, &self.state);
            });

        // ---- Central panel: faceted chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::price_chart(ui, &self.state);
        });
    }
}
