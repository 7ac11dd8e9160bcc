use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::data::model::FuelType;

// ---------------------------------------------------------------------------
// Dashboard theme
// ---------------------------------------------------------------------------

pub const BACKGROUND_HEX: &str = "#FAF3E0";
pub const FONT_HEX: &str = "#006CAF";

/// Bar outline width in the chart.
pub const BAR_BORDER_WIDTH: f32 = 3.0;
/// Bar opacity in the chart.
pub const BAR_OPACITY: f32 = 0.9;

// ---------------------------------------------------------------------------
// Static fuel → colour table
// ---------------------------------------------------------------------------

/// Colours used for one fuel type across chart and summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelStyle {
    /// Bar fill.
    pub fill: &'static str,
    /// Bar outline and card border.
    pub border: &'static str,
    /// Price label on the summary card.
    pub label: &'static str,
}

pub fn fuel_style(fuel: FuelType) -> FuelStyle {
    match fuel {
        FuelType::Superior => FuelStyle {
            fill: "#158C59",
            border: "#0F623E",
            label: "#158C59",
        },
        FuelType::Regular => FuelStyle {
            fill: "#C22B30",
            border: "#972125",
            label: "#C22B30",
        },
        FuelType::Diesel => FuelStyle {
            fill: "#A2A2A2",
            border: "#808080",
            label: "#808080",
        },
    }
}

// ---------------------------------------------------------------------------
// Hex → Color32
// ---------------------------------------------------------------------------

/// Parse `#RRGGBB` (or `RRGGBB`) into an egui colour. Invalid input falls back to grey.
pub fn hex_color(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("invalid colour {hex:?}: {e}");
            Color32::GRAY
        }
    }
}

/// Same as [`hex_color`] with an alpha factor in `0.0..=1.0`.
pub fn hex_color_alpha(hex: &str, opacity: f32) -> Color32 {
    let c = hex_color(hex);
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha)
}

pub fn background() -> Color32 {
    hex_color(BACKGROUND_HEX)
}

pub fn font() -> Color32 {
    hex_color(FONT_HEX)
}
