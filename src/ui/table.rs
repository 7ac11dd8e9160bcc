use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::rows_for_year;
use crate::data::model::{FuelType, MonthLabel};
use crate::state::AppState;

/// Collapsible table with the raw rows of the selected year.
pub fn year_rows(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(year)) = (&state.dataset, state.selected_year()) else {
        return;
    };
    let rows = rows_for_year(dataset, year);

    egui::CollapsingHeader::new(format!("Datos {year} ({} filas)", rows.len()))
        .id_salt("year_rows")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(80.0))
                .columns(Column::remainder(), FuelType::ALL.len())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Fecha");
                    });
                    for fuel in FuelType::ALL {
                        header.col(|ui| {
                            ui.strong(fuel.column_name());
                        });
                    }
                })
                .body(|mut body| {
                    for record in rows {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                let month = MonthLabel::of(record.date);
                                ui.label(format!("{month}-{year}"));
                            });
                            for fuel in FuelType::ALL {
                                row.col(|ui| {
                                    ui.label(format!("{:.2}", record.price(fuel)));
                                });
                            }
                        });
                    }
                });
        });
}
