use eframe::egui::{Align2, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::chart::{ChartSpec, FacetSpec};
use crate::color;
use crate::data::model::MonthLabel;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Faceted bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart of the selected year: one plot per fuel, side by side.
pub fn price_chart(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Abra un archivo de precios  (Archivo → Abrir…)");
        });
        return;
    };
    let spec = &view.chart;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&spec.title).strong());
        ui.label(spec.y_label);
        if spec.is_empty() {
            ui.label(format!("Sin datos para {}", view.year));
        }
    });
    ui.add_space(8.0);

    let n = spec.facets.len().max(1) as f32;
    let spacing = ui.available_width() * spec.facet_spacing;
    let facet_width = (ui.available_width() - spacing * (n - 1.0)) / n;
    let height = ui.available_height() - 24.0;

    ui.horizontal_top(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = spacing;
        for facet in &spec.facets {
            ui.vertical(|ui: &mut Ui| {
                ui.set_width(facet_width);
                let header = format!("{} = {}", spec.facet_label, facet.fuel_type);
                ui.label(RichText::new(header).strong());
                facet_plot(ui, spec, facet, facet_width, height);
            });
        }
    });
}

fn facet_plot(ui: &mut Ui, spec: &ChartSpec, facet: &FacetSpec, width: f32, height: f32) {
    let fill = color::hex_color_alpha(facet.fill_color, facet.opacity);
    let border = Stroke::new(facet.border_width, color::hex_color(facet.border_color));

    let bars: Vec<Bar> = facet
        .bars
        .iter()
        .map(|b| {
            Bar::new(b.month.index() as f64, b.price)
                .name(format!("{} {:.2}", b.month, b.price))
                .fill(fill)
                .stroke(border)
                .width(0.8)
        })
        .collect();

    let chart = BarChart::new(bars)
        .name(facet.fuel_type.to_string())
        .color(fill);

    // No `.legend(...)`: the legend stays hidden.
    Plot::new(("facet", facet.fuel_type.category_index()))
        .width(width)
        .height(height.max(120.0))
        .x_axis_label(spec.x_title)
        .y_axis_label(spec.y_title)
        .x_axis_formatter(month_tick)
        .include_x(-0.5)
        .include_x(MonthLabel::ALL.len() as f64 - 0.5)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if facet.bars.is_empty() {
                plot_ui.text(
                    egui_plot::Text::new(egui_plot::PlotPoint::new(5.5, 0.5), "Sin datos")
                        .anchor(Align2::CENTER_CENTER),
                );
            }
            plot_ui.bar_chart(chart);
        });
}

/// X ticks sit on integer month indices; everything in between stays blank.
fn month_tick(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > f64::EPSILON || rounded < 0.0 {
        return String::new();
    }
    MonthLabel::ALL
        .get(rounded as usize)
        .map(|m| m.abbreviation().to_string())
        .unwrap_or_default()
}
