/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PriceDataset ("Jan-23" → 2023-01-01)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PriceDataset │  Vec<PriceRecord>, year index
///   └──────────────┘
///        │                     │
///        ▼                     ▼
///   ┌──────────┐         ┌───────────┐
///   │  filter   │        │ aggregate │  mean per fuel, 2 decimals
///   └──────────┘         └───────────┘
///   year → long-form MeltedRecord, Ene → Dic
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
