use super::model::{FuelType, MeltedRecord, MonthLabel, PriceDataset, PriceRecord};

// ---------------------------------------------------------------------------
// Year selection
// ---------------------------------------------------------------------------

/// Every year present in the dataset, ascending. These are the only values
/// the year selector offers.
pub fn year_options(dataset: &PriceDataset) -> Vec<i32> {
    dataset.years.iter().copied().collect()
}

/// Rows whose date falls in `year`, in file order.
pub fn rows_for_year(dataset: &PriceDataset, year: i32) -> Vec<&PriceRecord> {
    dataset.records.iter().filter(|r| r.year() == year).collect()
}

// ---------------------------------------------------------------------------
// Long-form reshaping
// ---------------------------------------------------------------------------

/// Filter to `year` and reshape the three price columns into one record per
/// (row, fuel type).
///
/// Output is ordered by month (Ene → Dic) and, within a month, by
/// [`FuelType::CATEGORY_ORDER`]. The sort is stable, so repeated months keep
/// their file order. A year without rows yields an empty vector.
pub fn melt_year(dataset: &PriceDataset, year: i32) -> Vec<MeltedRecord> {
    let mut melted: Vec<MeltedRecord> = rows_for_year(dataset, year)
        .into_iter()
        .flat_map(|row| {
            FuelType::ALL.into_iter().map(move |fuel| MeltedRecord {
                date: row.date,
                fuel_type: fuel,
                price: row.price(fuel),
                month_label: MonthLabel::of(row.date),
            })
        })
        .collect();

    melted.sort_by_key(|m| (m.month_label, m.fuel_type.category_index()));
    melted
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;

    fn record(y: i32, m: u32, superior: f64, regular: f64, diesel: f64) -> PriceRecord {
        PriceRecord {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            superior_price: superior,
            regular_price: regular,
            diesel_price: diesel,
        }
    }

    /// Rows deliberately out of calendar order, spanning two years.
    fn shuffled() -> PriceDataset {
        PriceDataset::from_records(vec![
            record(2023, 11, 31.0, 29.0, 27.0),
            record(2022, 6, 33.0, 31.0, 30.0),
            record(2023, 2, 29.0, 26.5, 24.0),
            record(2023, 8, 30.5, 28.0, 25.5),
            record(2022, 1, 27.0, 25.0, 23.0),
            record(2023, 1, 28.5, 26.0, 24.0),
        ])
    }

    #[test]
    fn year_options_are_sorted_and_distinct() {
        assert_eq!(year_options(&shuffled()), vec![2022, 2023]);
    }

    #[test]
    fn rows_for_year_keeps_file_order() {
        let ds = shuffled();
        let months: Vec<u32> = rows_for_year(&ds, 2023)
            .iter()
            .map(|r| chrono::Datelike::month(&r.date))
            .collect();
        assert_eq!(months, vec![11, 2, 8, 1]);
    }

    #[test]
    fn melt_orders_months_january_first() {
        let ds = shuffled();
        for year in year_options(&ds) {
            let melted = melt_year(&ds, year);
            assert!(melted.windows(2).all(|w| w[0].month_label <= w[1].month_label));

            for fuel in FuelType::ALL {
                let months: Vec<MonthLabel> = melted
                    .iter()
                    .filter(|m| m.fuel_type == fuel)
                    .map(|m| m.month_label)
                    .collect();
                assert!(months.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn melt_only_contains_months_of_the_year() {
        let ds = shuffled();
        let melted = melt_year(&ds, 2023);

        let months: BTreeSet<MonthLabel> = melted.iter().map(|m| m.month_label).collect();
        let expected: BTreeSet<MonthLabel> =
            [MonthLabel::Ene, MonthLabel::Feb, MonthLabel::Ago, MonthLabel::Nov].into();
        assert_eq!(months, expected);
        assert_eq!(melted.len(), 4 * 3);
        assert!(melted.iter().all(|m| chrono::Datelike::year(&m.date) == 2023));
    }

    #[test]
    fn melt_lists_fuels_in_category_order_within_a_month() {
        let ds = shuffled();
        let january: Vec<(FuelType, f64)> = melt_year(&ds, 2023)
            .into_iter()
            .filter(|m| m.month_label == MonthLabel::Ene)
            .map(|m| (m.fuel_type, m.price))
            .collect();

        assert_eq!(
            january,
            vec![
                (FuelType::Regular, 26.0),
                (FuelType::Superior, 28.5),
                (FuelType::Diesel, 24.0),
            ]
        );
    }

    #[test]
    fn melt_of_missing_year_is_empty() {
        assert!(melt_year(&shuffled(), 1999).is_empty());
        assert!(melt_year(&PriceDataset::default(), 2023).is_empty());
    }
}
