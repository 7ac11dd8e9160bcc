use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::chart::{self, CardSpec, ChartSpec};
use crate::config::Layout;
use crate::data::aggregate::{year_averages, AggregateError};
use crate::data::filter::{melt_year, year_options};
use crate::data::model::{PriceDataset, YearAverages};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("year {0} is not present in the dataset")]
    UnknownYear(i32),
    #[error("no dataset loaded")]
    NoDataset,
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Everything the shell renders for one selected year.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub year: i32,
    pub chart: ChartSpec,
    pub cards: Vec<CardSpec>,
    /// `None` when the year has no rows.
    pub averages: Option<YearAverages>,
}

/// Recompute the view for `year`. The year must be one of the dataset's years.
pub fn compute_view(dataset: &PriceDataset, year: i32) -> Result<DashboardView, SelectionError> {
    if !dataset.contains_year(year) {
        return Err(SelectionError::UnknownYear(year));
    }
    Ok(view_for(dataset, year))
}

fn view_for(dataset: &PriceDataset, year: i32) -> DashboardView {
    let melted = melt_year(dataset, year);
    let averages: Result<YearAverages, AggregateError> = year_averages(dataset, year);
    if let Err(e) = &averages {
        log::warn!("averages unavailable: {e}");
    }

    DashboardView {
        year,
        chart: chart::build_chart(year, &melted),
        cards: chart::build_cards(averages.as_ref()),
        averages: averages.ok(),
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Read-only dataset handle; replaced wholesale when another file is opened.
    pub dataset: Option<Arc<PriceDataset>>,

    /// Years offered by the selector (ascending).
    pub years: Vec<i32>,

    /// View for the selected year.
    pub view: Option<DashboardView>,

    pub layout: Layout,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(layout: Layout) -> Self {
        Self {
            dataset: None,
            years: Vec::new(),
            view: None,
            layout,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and select its earliest year.
    pub fn set_dataset(&mut self, dataset: Arc<PriceDataset>) {
        self.years = year_options(&dataset);
        self.view = dataset.earliest_year().map(|year| view_for(&dataset, year));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.view.as_ref().map(|v| v.year)
    }

    /// Selection-changed handler: synchronously recompute the view.
    /// Unknown years are rejected and the current view is kept.
    pub fn on_year_selected(&mut self, year: i32) -> Result<&DashboardView, SelectionError> {
        let dataset = self.dataset.as_ref().ok_or(SelectionError::NoDataset)?;
        let view = compute_view(dataset, year)?;
        log::debug!("selected year {year}");
        Ok(self.view.insert(view))
    }
}
