use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{FuelType, PriceDataset, PriceRecord};

/// Accepted names for the month-year column.
pub const DATE_COLUMNS: [&str; 2] = ["Fecha", "Date"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("row {row}: {message}")]
    DataFormat { row: usize, message: String },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("both 'Fecha' and 'Date' columns present; keep only one")]
    DuplicateDateColumn,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a fuel price dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header `Fecha,Gasolina Superior,Gasolina Regular,Diesel`
///   (`Date` is accepted in place of `Fecha`)
/// * `.parquet` – same column names; the date column may be text or `Date32`
pub fn load_file(path: &Path) -> Result<PriceDataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} monthly rows covering years {:?} from {}",
        dataset.len(),
        dataset.years,
        path.display()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DatasetError::FileNotFound(path.to_path_buf()),
        _ => DatasetError::Io(e),
    })
}

// ---------------------------------------------------------------------------
// Month-year parsing
// ---------------------------------------------------------------------------

const ENGLISH_MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse `"Mon-YY"` (e.g. `"Jan-23"`) into the first day of that month.
///
/// The month is an English three-letter abbreviation, case-insensitive.
/// Two-digit years pivot like `strptime`'s `%y`: 00–68 → 20xx, 69–99 → 19xx.
pub fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let (month, year) = text.trim().split_once('-')?;

    let month = month.to_ascii_lowercase();
    let month0 = ENGLISH_MONTHS.iter().position(|m| *m == month)?;

    if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: i32 = year.parse().ok()?;
    let year = if yy < 69 { 2000 + yy } else { 1900 + yy };

    NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1)
}

fn parse_date_cell(text: &str, row: usize) -> Result<NaiveDate, DatasetError> {
    parse_month_year(text).ok_or_else(|| {
        log::debug!("row {row}: rejected date {text:?}");
        DatasetError::DataFormat {
            row,
            message: format!("'{text}' does not match the Mon-YY month-year pattern"),
        }
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Fecha", alias = "Date")]
    date: String,
    #[serde(rename = "Gasolina Superior")]
    superior: f64,
    #[serde(rename = "Gasolina Regular")]
    regular: f64,
    #[serde(rename = "Diesel")]
    diesel: f64,
}

/// CSV layout: header row, one row per month. Rows are numbered from 1
/// (the first data row) in error messages.
fn load_csv(path: &Path) -> Result<PriceDataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    check_columns(&headers)?;

    let mut records = Vec::new();

    for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = i + 1;
        let raw = result.map_err(|e| DatasetError::DataFormat {
            row,
            message: csv_message(&e),
        })?;

        records.push(PriceRecord {
            date: parse_date_cell(&raw.date, row)?,
            superior_price: raw.superior,
            regular_price: raw.regular,
            diesel_price: raw.diesel,
        });
    }

    Ok(PriceDataset::from_records(records))
}

fn check_columns(headers: &[String]) -> Result<(), DatasetError> {
    let date_columns = headers
        .iter()
        .filter(|h| DATE_COLUMNS.contains(&h.as_str()))
        .count();
    match date_columns {
        0 => return Err(DatasetError::MissingColumn(DATE_COLUMNS[0].to_string())),
        1 => {}
        _ => return Err(DatasetError::DuplicateDateColumn),
    }
    for fuel in FuelType::ALL {
        if !headers.iter().any(|h| h == fuel.column_name()) {
            return Err(DatasetError::MissingColumn(fuel.column_name().to_string()));
        }
    }
    Ok(())
}

fn csv_message(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV layout.
///
/// Expected schema:
/// - `Fecha` / `Date`: Utf8 / LargeUtf8 in `Mon-YY` form, or Date32
/// - one numeric column per fuel: Float64, Float32, Int64 or Int32
fn load_parquet(path: &Path) -> Result<PriceDataset, DatasetError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();
        records.extend(batch_records(&batch, offset)?);
    }

    Ok(PriceDataset::from_records(records))
}

/// Convert one record batch; `offset` is the number of rows already read.
fn batch_records(batch: &RecordBatch, offset: usize) -> Result<Vec<PriceRecord>, DatasetError> {
    let schema = batch.schema();

    let date_idx = DATE_COLUMNS
        .iter()
        .find_map(|name| schema.index_of(name).ok())
        .ok_or_else(|| DatasetError::MissingColumn(DATE_COLUMNS[0].to_string()))?;

    let superior = price_column(batch, FuelType::Superior)?;
    let regular = price_column(batch, FuelType::Regular)?;
    let diesel = price_column(batch, FuelType::Diesel)?;
    let date_col = batch.column(date_idx);

    (0..batch.num_rows())
        .map(|i| {
            let row = offset + i + 1;
            Ok(PriceRecord {
                date: date_at(date_col, i, row)?,
                superior_price: price_at(superior, i, row, FuelType::Superior)?,
                regular_price: price_at(regular, i, row, FuelType::Regular)?,
                diesel_price: price_at(diesel, i, row, FuelType::Diesel)?,
            })
        })
        .collect()
}

fn price_column(batch: &RecordBatch, fuel: FuelType) -> Result<&ArrayRef, DatasetError> {
    batch
        .schema()
        .index_of(fuel.column_name())
        .map(|idx| batch.column(idx))
        .map_err(|_| DatasetError::MissingColumn(fuel.column_name().to_string()))
}

fn date_at(col: &ArrayRef, i: usize, row: usize) -> Result<NaiveDate, DatasetError> {
    let format_err = |message: String| DatasetError::DataFormat { row, message };

    if col.is_null(i) {
        return Err(format_err("date is null".into()));
    }
    match col.data_type() {
        DataType::Utf8 => parse_date_cell(col.as_string::<i32>().value(i), row),
        DataType::LargeUtf8 => parse_date_cell(col.as_string::<i64>().value(i), row),
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .ok_or_else(|| format_err("expected Date32 array".into()))?;
            let date = arr
                .value_as_date(i)
                .ok_or_else(|| format_err("Date32 value out of range".into()))?;
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .ok_or_else(|| format_err(format!("invalid date {date}")))
        }
        other => Err(format_err(format!("unsupported date column type {other:?}"))),
    }
}

fn price_at(col: &ArrayRef, i: usize, row: usize, fuel: FuelType) -> Result<f64, DatasetError> {
    let value = if col.is_null(i) {
        None
    } else if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Some(arr.value(i))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Some(arr.value(i) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Some(arr.value(i) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Some(arr.value(i) as f64)
    } else {
        None
    };

    value.ok_or_else(|| DatasetError::DataFormat {
        row,
        message: format!(
            "'{}' is null or not numeric ({:?})",
            fuel.column_name(),
            col.data_type()
        ),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Fecha,Gasolina Superior,Gasolina Regular,Diesel";

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_month_year() {
        assert_eq!(parse_month_year("Jan-23"), NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(parse_month_year("aug-05"), NaiveDate::from_ymd_opt(2005, 8, 1));
        assert_eq!(parse_month_year(" DEC-99 "), NaiveDate::from_ymd_opt(1999, 12, 1));
        assert_eq!(parse_month_year("Mar-68"), NaiveDate::from_ymd_opt(2068, 3, 1));
        assert_eq!(parse_month_year("Mar-69"), NaiveDate::from_ymd_opt(1969, 3, 1));
    }

    #[test]
    fn rejects_malformed_month_year() {
        for bad in ["", "Jan", "Jan23", "Ene-23", "Jan-2023", "Jan-2", "2023-01", "Jan-x3"] {
            assert_eq!(parse_month_year(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn loads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "prices.csv",
            &format!("{HEADER}\nJan-23,28.5,26.0,24.0\nFeb-23,29.0,26.5,24.0\nDec-22,27.1,25.2,23.3\n"),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2022, 2023]);
        assert_eq!(ds.records[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(ds.records[1].superior_price, 29.0);
        assert_eq!(ds.records[2].diesel_price, 23.3);
    }

    #[test]
    fn accepts_date_header_alias() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "prices.csv",
            "Date,Gasolina Superior,Gasolina Regular,Diesel\nMay-21,30,28,25\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records[0].date, NaiveDate::from_ymd_opt(2021, 5, 1).unwrap());
        assert_eq!(ds.records[0].regular_price, 28.0);
    }

    #[test]
    fn bad_date_is_a_data_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "prices.csv",
            &format!("{HEADER}\nJan-23,28.5,26.0,24.0\n2023-02-01,29.0,26.5,24.0\n"),
        );

        match load_file(&path) {
            Err(DatasetError::DataFormat { row, message }) => {
                assert_eq!(row, 2);
                assert!(message.contains("2023-02-01"));
            }
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_price_is_a_data_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "prices.csv", &format!("{HEADER}\nJan-23,n/a,26.0,24.0\n"));

        assert!(matches!(
            load_file(&path),
            Err(DatasetError::DataFormat { row: 1, .. })
        ));
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "prices.csv",
            "Fecha,Gasolina Superior,Gasolina Regular\nJan-23,28.5,26.0\n",
        );

        match load_file(&path) {
            Err(DatasetError::MissingColumn(col)) => assert_eq!(col, "Diesel"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn both_date_headers_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "prices.csv",
            "Fecha,Date,Gasolina Superior,Gasolina Regular,Diesel\nJan-23,Jan-23,28.5,26.0,24.0\n",
        );

        assert!(matches!(load_file(&path), Err(DatasetError::DuplicateDateColumn)));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        match load_file(&path) {
            Err(DatasetError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "prices.xlsx", HEADER);

        assert!(matches!(
            load_file(&path),
            Err(DatasetError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "prices.csv", &format!("{HEADER}\n"));

        let ds = load_file(&path).unwrap();
        assert!(ds.is_empty());
        assert!(ds.years.is_empty());
    }

    #[test]
    fn loads_bundled_dataset() {
        let ds = load_file(Path::new("data/precios_combustibles.csv")).unwrap();
        assert_eq!(ds.len(), 36);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2021, 2022, 2023]);
        assert!(ds
            .records
            .iter()
            .all(|r| r.superior_price > r.regular_price && r.regular_price > r.diesel_price));
    }

    #[test]
    fn loads_parquet_with_text_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Fecha", DataType::Utf8, false),
            Field::new("Gasolina Superior", DataType::Float64, false),
            Field::new("Gasolina Regular", DataType::Float64, false),
            Field::new("Diesel", DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Jan-23", "Feb-23"])),
                Arc::new(Float64Array::from(vec![28.5, 29.0])),
                Arc::new(Float64Array::from(vec![26.0, 26.5])),
                Arc::new(Float32Array::from(vec![24.0_f32, 24.0])),
            ],
        )
        .unwrap();

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(ds.records[1].regular_price, 26.5);
        assert_eq!(ds.records[0].diesel_price, 24.0);
    }

    #[test]
    fn loads_parquet_with_date32_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.pq");

        // 2023-03-15 as days since the epoch; stored dates are normalised to the 1st.
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let days = (NaiveDate::from_ymd_opt(2023, 3, 15).unwrap() - epoch).num_days() as i32;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Date", DataType::Date32, false),
            Field::new("Gasolina Superior", DataType::Int64, false),
            Field::new("Gasolina Regular", DataType::Float64, false),
            Field::new("Diesel", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(vec![days])),
                Arc::new(Int64Array::from(vec![30])),
                Arc::new(Float64Array::from(vec![27.25])),
                Arc::new(Float64Array::from(vec![25.5])),
            ],
        )
        .unwrap();

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records[0].date, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        assert_eq!(ds.records[0].superior_price, 30.0);
    }
}
