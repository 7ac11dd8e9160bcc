use serde::Serialize;

use crate::color::{self, BAR_BORDER_WIDTH, BAR_OPACITY};
use crate::data::aggregate::AggregateError;
use crate::data::model::{FuelType, MeltedRecord, MonthLabel, YearAverages};

// ---------------------------------------------------------------------------
// Declarative view model, rendered by `ui::*` and exportable as JSON
// ---------------------------------------------------------------------------

pub const DASHBOARD_TITLE: &str = "Dashboard de Precios de Combustibles";
pub const AVERAGES_TITLE: &str = "Promedio de Precios de Combustible por Año";
pub const X_TITLE: &str = "Mes";
pub const Y_TITLE: &str = "Precios";
pub const Y_LABEL: &str = "Precios (GTQ/Galón)";
pub const FACET_LABEL: &str = "Tipo de Combustible";
pub const CURRENCY: &str = "GTQ";
pub const FACET_SPACING: f32 = 0.05;

pub fn chart_title(year: i32) -> String {
    format!("Tendencia de Precios de Combustible en {year}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub month: MonthLabel,
    pub price: f64,
}

/// One sub-plot of the faceted chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetSpec {
    pub fuel_type: FuelType,
    pub fill_color: &'static str,
    pub border_color: &'static str,
    pub border_width: f32,
    pub opacity: f32,
    pub bars: Vec<BarSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub y_label: &'static str,
    pub facet_label: &'static str,
    pub facet_spacing: f32,
    pub background_color: &'static str,
    pub font_color: &'static str,
    pub show_legend: bool,
    /// Always three facets, in [`FuelType::CATEGORY_ORDER`].
    pub facets: Vec<FacetSpec>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.facets.iter().all(|f| f.bars.is_empty())
    }
}

/// Summary card with the yearly average of one fuel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSpec {
    pub fuel_type: FuelType,
    /// Icon swatch colour.
    pub icon_color: &'static str,
    pub label: String,
    pub label_color: &'static str,
    pub border_color: &'static str,
    pub border_width: f32,
    pub corner_radius: f32,
}

// ---------------------------------------------------------------------------
// Binders
// ---------------------------------------------------------------------------

/// Map melted records onto the faceted bar chart. Records keep their
/// incoming (month-sorted) order inside each facet.
pub fn build_chart(year: i32, records: &[MeltedRecord]) -> ChartSpec {
    let facets = FuelType::CATEGORY_ORDER
        .into_iter()
        .map(|fuel| {
            let style = color::fuel_style(fuel);
            FacetSpec {
                fuel_type: fuel,
                fill_color: style.fill,
                border_color: style.border,
                border_width: BAR_BORDER_WIDTH,
                opacity: BAR_OPACITY,
                bars: records
                    .iter()
                    .filter(|r| r.fuel_type == fuel)
                    .map(|r| BarSpec {
                        month: r.month_label,
                        price: r.price,
                    })
                    .collect(),
            }
        })
        .collect();

    ChartSpec {
        title: chart_title(year),
        x_title: X_TITLE,
        y_title: Y_TITLE,
        y_label: Y_LABEL,
        facet_label: FACET_LABEL,
        facet_spacing: FACET_SPACING,
        background_color: color::BACKGROUND_HEX,
        font_color: color::FONT_HEX,
        show_legend: false,
        facets,
    }
}

/// Map yearly averages onto the three summary cards. Unavailable averages
/// produce neutral "N/D" labels.
pub fn build_cards(averages: Result<&YearAverages, &AggregateError>) -> Vec<CardSpec> {
    FuelType::CATEGORY_ORDER
        .into_iter()
        .map(|fuel| {
            let style = color::fuel_style(fuel);
            let label = match averages {
                Ok(avg) => format!("{CURRENCY} {:.2}", avg.get(fuel)),
                Err(_) => format!("{CURRENCY} N/D"),
            };
            CardSpec {
                fuel_type: fuel,
                icon_color: style.fill,
                label,
                label_color: style.label,
                border_color: style.border,
                border_width: 2.0,
                corner_radius: 5.0,
            }
        })
        .collect()
}
