use std::collections::BTreeMap;

use thiserror::Error;

use super::filter::rows_for_year;
use super::model::{FuelType, PriceDataset, YearAverages};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The mean of zero rows is undefined; callers render a neutral state.
    #[error("no price rows for year {year}")]
    NoRows { year: i32 },
}

/// Round the exact binary value to two decimals, so 25.715 (stored as
/// 25.71499…) becomes 25.71. `value * 100.0` would round that one up.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Mean price of each fuel over the rows of `year`, rounded to 2 decimals.
pub fn year_averages(dataset: &PriceDataset, year: i32) -> Result<YearAverages, AggregateError> {
    let rows = rows_for_year(dataset, year);
    if rows.is_empty() {
        return Err(AggregateError::NoRows { year });
    }

    let n = rows.len() as f64;
    let means: BTreeMap<FuelType, f64> = FuelType::ALL
        .into_iter()
        .map(|fuel| {
            let total: f64 = rows.iter().map(|r| r.price(fuel)).sum();
            (fuel, round2(total / n))
        })
        .collect();

    Ok(YearAverages { year, means })
}
