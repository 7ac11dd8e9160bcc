use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Fecha")]
    date: String,
    #[serde(rename = "Gasolina Superior")]
    superior: f64,
    #[serde(rename = "Gasolina Regular")]
    regular: f64,
    #[serde(rename = "Diesel")]
    diesel: f64,
}

/// splitmix64: one word of state is enough for a few hundred sample prices.
struct PriceRng(u64);

impl PriceRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `0.0..1.0`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `-amplitude..amplitude`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}

/// Random walk of monthly GTQ/gallon prices; Superior > Regular > Diesel.
fn generate_rows(years: &[i32], rng: &mut PriceRng) -> Vec<Row> {
    let mut superior = 27.5;
    let mut rows = Vec::with_capacity(years.len() * MONTHS.len());

    for &year in years {
        for month in MONTHS {
            superior = (superior + rng.jitter(0.9)).clamp(22.0, 40.0);
            let regular = superior - 1.5 - rng.next_f64();
            let diesel = regular - 1.0 - rng.next_f64() * 2.0;

            rows.push(Row {
                date: format!("{month}-{:02}", year % 100),
                superior: round2(superior),
                regular: round2(regular),
                diesel: round2(diesel),
            });
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Fecha", DataType::Utf8, false),
        Field::new("Gasolina Superior", DataType::Float64, false),
        Field::new("Gasolina Regular", DataType::Float64, false),
        Field::new("Diesel", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.date.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.superior).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.regular).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.diesel).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = PriceRng(42);
    let rows = generate_rows(&[2021, 2022, 2023], &mut rng);

    std::fs::create_dir_all("data").context("creating data/")?;
    write_csv("data/precios_combustibles.csv", &rows)?;
    write_parquet("data/precios_combustibles.parquet", &rows)?;

    println!(
        "Wrote {} monthly rows to data/precios_combustibles.{{csv,parquet}}",
        rows.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic_and_bounded() {
        let mut a = PriceRng(42);
        let mut b = PriceRng(42);
        for _ in 0..1000 {
            let x = a.jitter(0.9);
            assert_eq!(x, b.jitter(0.9));
            assert!((-0.9..0.9).contains(&x));
        }
    }

    #[test]
    fn generated_prices_keep_fuel_ordering() {
        let rows = generate_rows(&[2021, 2022], &mut PriceRng(7));
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].date, "Jan-21");
        assert_eq!(rows[23].date, "Dec-22");
        assert!(rows.iter().all(|r| r.superior > r.regular && r.regular > r.diesel));
    }
}
