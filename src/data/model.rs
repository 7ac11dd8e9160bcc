use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// FuelType – the fixed three-category domain
// ---------------------------------------------------------------------------

/// One of the three fuels tracked by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FuelType {
    #[serde(rename = "Gasolina Superior")]
    Superior,
    #[serde(rename = "Gasolina Regular")]
    Regular,
    #[serde(rename = "Diesel")]
    Diesel,
}

impl FuelType {
    /// Column order in the source file.
    pub const ALL: [FuelType; 3] = [FuelType::Superior, FuelType::Regular, FuelType::Diesel];

    /// Display order for facets and cards.
    pub const CATEGORY_ORDER: [FuelType; 3] =
        [FuelType::Regular, FuelType::Superior, FuelType::Diesel];

    /// Header name of the price column in the source file.
    pub fn column_name(self) -> &'static str {
        match self {
            FuelType::Superior => "Gasolina Superior",
            FuelType::Regular => "Gasolina Regular",
            FuelType::Diesel => "Diesel",
        }
    }

    /// Position in [`FuelType::CATEGORY_ORDER`].
    pub fn category_index(self) -> usize {
        match self {
            FuelType::Regular => 0,
            FuelType::Superior => 1,
            FuelType::Diesel => 2,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// MonthLabel – Spanish month abbreviations, ordered Jan → Dec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MonthLabel {
    Ene,
    Feb,
    Mar,
    Abr,
    May,
    Jun,
    Jul,
    Ago,
    Sep,
    Oct,
    Nov,
    Dic,
}

impl MonthLabel {
    pub const ALL: [MonthLabel; 12] = [
        MonthLabel::Ene,
        MonthLabel::Feb,
        MonthLabel::Mar,
        MonthLabel::Abr,
        MonthLabel::May,
        MonthLabel::Jun,
        MonthLabel::Jul,
        MonthLabel::Ago,
        MonthLabel::Sep,
        MonthLabel::Oct,
        MonthLabel::Nov,
        MonthLabel::Dic,
    ];

    pub fn of(date: NaiveDate) -> Self {
        Self::ALL[date.month0() as usize]
    }

    /// Zero-based position, Ene = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            MonthLabel::Ene => "Ene",
            MonthLabel::Feb => "Feb",
            MonthLabel::Mar => "Mar",
            MonthLabel::Abr => "Abr",
            MonthLabel::May => "May",
            MonthLabel::Jun => "Jun",
            MonthLabel::Jul => "Jul",
            MonthLabel::Ago => "Ago",
            MonthLabel::Sep => "Sep",
            MonthLabel::Oct => "Oct",
            MonthLabel::Nov => "Nov",
            MonthLabel::Dic => "Dic",
        }
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

// ---------------------------------------------------------------------------
// PriceRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A monthly price observation. `date` is always the first day of the month.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub superior_price: f64,
    pub regular_price: f64,
    pub diesel_price: f64,
}

impl PriceRecord {
    pub fn price(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Superior => self.superior_price,
            FuelType::Regular => self.regular_price,
            FuelType::Diesel => self.diesel_price,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

// ---------------------------------------------------------------------------
// PriceDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The parsed dataset with its pre-computed year index.
#[derive(Debug, Clone, Default)]
pub struct PriceDataset {
    /// All rows, in file order.
    pub records: Vec<PriceRecord>,
    /// Sorted set of years present in `records`.
    pub years: BTreeSet<i32>,
}

impl PriceDataset {
    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        let years = records.iter().map(PriceRecord::year).collect();
        PriceDataset { records, years }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Earliest year in the dataset, the selector's default.
    pub fn earliest_year(&self) -> Option<i32> {
        self.years.first().copied()
    }
}

// ---------------------------------------------------------------------------
// Derived per-query records
// ---------------------------------------------------------------------------

/// Long-form row: one price of one fuel in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeltedRecord {
    pub date: NaiveDate,
    pub fuel_type: FuelType,
    pub price: f64,
    pub month_label: MonthLabel,
}

/// Mean price per fuel for a single year, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAverages {
    pub year: i32,
    pub means: BTreeMap<FuelType, f64>,
}

impl YearAverages {
    pub fn get(&self, fuel: FuelType) -> f64 {
        self.means.get(&fuel).copied().unwrap_or(f64::NAN)
    }
}
