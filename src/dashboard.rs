//! This module provides the main entry point of the crate: a [`ClimateDashboard`]
//! bound to one climate source file. It owns the record cache and the description
//! table, and exposes every query, summary and forecast a presentation layer needs
//! as plain data.

use crate::aggregate::{monthly_summaries, summarize, Summary};
use crate::descriptions::Descriptions;
use crate::error::ClimaError;
use crate::filtering::{filter, Query};
use crate::forecast::seasonal::SeasonalModel;
use crate::forecast::{fit, DailyOutlook, FeatureMode, Forecast, ForecastPoint};
use crate::records::cache::RecordCache;
use crate::types::lat_lon::LatLon;
use crate::types::record_set::RecordSet;
use crate::types::target::Target;
use crate::types::traits::types::{Month, StartEndDate};
use crate::types::view::View;
use bon::bon;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What the overview page shows for one locality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalityCard {
    pub name: String,
    pub description: String,
    pub coordinates: Option<LatLon>,
    pub observations: usize,
}

/// The climate core bound to one source file.
///
/// Records are parsed once and cached; the cache refreshes itself when the source's
/// modification time or size changes and can be dropped with [`ClimateDashboard::invalidate`].
///
/// # Examples
///
/// ```no_run
/// # use clima::{ClimateDashboard, ClimaError, Month};
/// # fn run() -> Result<(), ClimaError> {
/// let dashboard = ClimateDashboard::builder().source("clima.csv").build();
///
/// let march = dashboard.view().locality("Atlautla").year(2021).month(3).call()?;
/// let summary = clima::summarize(&march);
/// println!("Mean max temperature: {}", summary.mean_tmax);
///
/// let next = dashboard.predict_next_month("Atlautla", Month(2021, 3))?;
/// println!("Projected max for {}: {:.1}", next.date, next.value);
/// # Ok(())
/// # }
/// ```
pub struct ClimateDashboard {
    source: PathBuf,
    cache: RecordCache,
    descriptions: Descriptions,
}

#[bon]
impl ClimateDashboard {
    /// Creates a dashboard for the CSV at `source`. Nothing is read until the first query.
    ///
    /// `descriptions` defaults to the built-in table.
    #[builder]
    pub fn new(#[builder(into)] source: PathBuf, descriptions: Option<Descriptions>) -> Self {
        Self {
            source,
            cache: RecordCache::new(),
            descriptions: descriptions.unwrap_or_default(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The parsed, time-indexed records, loaded on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ClimaError::RecordStore`] if the source cannot be opened or parsed.
    pub fn records(&self) -> Result<Arc<RecordSet>, ClimaError> {
        Ok(self.cache.get_or_load(&self.source)?)
    }

    /// Drops the cached records so the next query reloads the source.
    pub fn invalidate(&self) -> bool {
        self.cache.invalidate(&self.source)
    }

    /// Runs a [`Query`] against the records.
    pub fn query(&self, query: &Query) -> Result<View, ClimaError> {
        let records = self.records()?;
        Ok(filter(&records, query))
    }

    /// Builder form of [`ClimateDashboard::query`].
    #[builder]
    pub fn view(
        &self,
        #[builder(into)] locality: Option<String>,
        year: Option<i32>,
        month: Option<u32>,
        date_range: Option<StartEndDate>,
    ) -> Result<View, ClimaError> {
        self.query(&Query {
            locality,
            year,
            month,
            date_range,
        })
    }

    pub fn summary(&self, query: &Query) -> Result<Summary, ClimaError> {
        Ok(summarize(&self.query(query)?))
    }

    pub fn monthly_summaries(&self, query: &Query) -> Result<Vec<(Month, Summary)>, ClimaError> {
        Ok(monthly_summaries(&self.query(query)?))
    }

    pub fn description(&self, locality: &str) -> &str {
        self.descriptions.get(locality)
    }

    /// One card per locality, in the order localities first appear in the source.
    pub fn overview(&self) -> Result<Vec<LocalityCard>, ClimaError> {
        let records = self.records()?;
        Ok(records
            .localities()
            .into_iter()
            .map(|name| LocalityCard {
                name: name.to_string(),
                description: self.description(name).to_string(),
                coordinates: records.coordinates(name),
                observations: records.count_for(name),
            })
            .collect())
    }

    /// Predicts the maximum temperature of the month after `selected`, fitting the
    /// calendar-seasonal model on the locality's whole history.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ForecastError::InsufficientHistory`] (wrapped) when the locality
    /// has fewer than twelve usable rows.
    pub fn predict_next_month(
        &self,
        locality: &str,
        selected: Month,
    ) -> Result<ForecastPoint, ClimaError> {
        let history = self.query(&Query::builder().locality(locality).build())?;
        let model = SeasonalModel::fit(&history, Target::Tmax)?;
        Ok(model.predict_after(selected)?)
    }

    /// Fits one target on the query's view and projects it `horizon` steps ahead.
    pub fn forecast(
        &self,
        query: &Query,
        target: Target,
        mode: FeatureMode,
        horizon: usize,
    ) -> Result<Forecast, ClimaError> {
        let view = self.query(query)?;
        Ok(fit(&view, target, mode)?.forecast(horizon))
    }

    /// Day-offset forecasts of every target for the query's view.
    pub fn daily_outlook(&self, query: &Query, horizon: usize) -> Result<DailyOutlook, ClimaError> {
        Ok(DailyOutlook::new(&self.query(query)?, horizon))
    }
}
