//! Regression-based trend projection over a [`View`].
//!
//! Two feature modes are available:
//!
//! - [`FeatureMode::CalendarSeasonal`] fits `(year, sin(2π·month/12), cos(2π·month/12))`
//!   and predicts whole months ahead.
//! - [`FeatureMode::DayOffset`] fits days elapsed since the first observation of the
//!   view (quadratically for precipitation) and predicts day by day.
//!
//! Both are plain least-squares fits that extrapolate past the observed range. Treat
//! their output as a first-order trend projection: the in-sample R² is reported with
//! every forecast so callers can judge how much to trust it.

pub mod day_offset;
pub mod error;
pub(crate) mod least_squares;
pub mod seasonal;

use crate::forecast::day_offset::DayOffsetModel;
use crate::forecast::error::ForecastError;
use crate::forecast::seasonal::SeasonalModel;
use crate::types::target::Target;
use crate::types::view::View;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMode {
    CalendarSeasonal,
    DayOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A fitted regression that can project its target forward.
pub trait TrendModel {
    fn target(&self) -> Target;

    /// In-sample coefficient of determination.
    fn r_squared(&self) -> f64;

    /// Number of rows the model was fitted on.
    fn samples(&self) -> usize;

    /// Projects the target `horizon` steps forward.
    fn predict(&self, horizon: usize) -> Vec<ForecastPoint>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    CalendarSeasonal(SeasonalModel),
    DayOffset(DayOffsetModel),
}

impl Model {
    pub fn mode(&self) -> FeatureMode {
        match self {
            Model::CalendarSeasonal(_) => FeatureMode::CalendarSeasonal,
            Model::DayOffset(_) => FeatureMode::DayOffset,
        }
    }

    fn inner(&self) -> &dyn TrendModel {
        match self {
            Model::CalendarSeasonal(model) => model,
            Model::DayOffset(model) => model,
        }
    }

    /// Predicts `horizon` steps and packages the points with the fit quality.
    pub fn forecast(&self, horizon: usize) -> Forecast {
        Forecast {
            target: self.target(),
            mode: self.mode(),
            r_squared: self.r_squared(),
            samples: self.samples(),
            points: self.predict(horizon),
        }
    }
}

impl TrendModel for Model {
    fn target(&self) -> Target {
        self.inner().target()
    }

    fn r_squared(&self) -> f64 {
        self.inner().r_squared()
    }

    fn samples(&self) -> usize {
        self.inner().samples()
    }

    fn predict(&self, horizon: usize) -> Vec<ForecastPoint> {
        self.inner().predict(horizon)
    }
}

/// Predicted points together with the fit they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub target: Target,
    pub mode: FeatureMode,
    pub r_squared: f64,
    pub samples: usize,
    pub points: Vec<ForecastPoint>,
}

/// Fits `target` on `view` with the requested feature mode.
///
/// # Errors
///
/// [`ForecastError::InsufficientHistory`] for calendar-seasonal mode with fewer than
/// 12 usable rows, [`ForecastError::InsufficientDataPoints`] for day-offset mode with
/// 10 or fewer. Callers should report "not enough data" and skip the forecast.
pub fn fit(view: &View, target: Target, mode: FeatureMode) -> Result<Model, ForecastError> {
    match mode {
        FeatureMode::CalendarSeasonal => {
            SeasonalModel::fit(view, target).map(Model::CalendarSeasonal)
        }
        FeatureMode::DayOffset => DayOffsetModel::fit(view, target).map(Model::DayOffset),
    }
}

/// Independent day-offset forecasts for every [`Target`]. A target that cannot be
/// fitted carries its error instead of a forecast; the others are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyOutlook {
    pub tmax: Result<Forecast, ForecastError>,
    pub tmin: Result<Forecast, ForecastError>,
    pub precip: Result<Forecast, ForecastError>,
}

impl DailyOutlook {
    pub fn new(view: &View, horizon: usize) -> Self {
        let project = |target| {
            fit(view, target, FeatureMode::DayOffset).map(|model| model.forecast(horizon))
        };
        Self {
            tmax: project(Target::Tmax),
            tmin: project(Target::Tmin),
            precip: project(Target::Precip),
        }
    }

    pub fn get(&self, target: Target) -> &Result<Forecast, ForecastError> {
        match target {
            Target::Tmax => &self.tmax,
            Target::Tmin => &self.tmin,
            Target::Precip => &self.precip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::RecordSetFilterExt;
    use crate::time_index::with_calendar_fields;
    use crate::types::observation::Observation;
    use crate::types::record_set::RecordSet;
    use chrono::Days;

    fn view(days: u64) -> View {
        let start = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
        let observations = (0..days)
            .map(|i| {
                Observation::new("X", start.checked_add_days(Days::new(i)))
                    .with_tmax(Some(25.0 + 0.2 * i as f64))
                    .with_tmin(if i < 5 { Some(8.0) } else { None })
                    .with_precip(Some(if i % 3 == 0 { 4.0 } else { 0.0 }))
            })
            .collect();
        with_calendar_fields(RecordSet::from_observations(observations)).by_locality("X")
    }

    #[test]
    fn test_fit_dispatches_on_mode() -> Result<(), ForecastError> {
        let view = view(40);
        let day = fit(&view, Target::Tmax, FeatureMode::DayOffset)?;
        assert_eq!(day.mode(), FeatureMode::DayOffset);
        assert_eq!(day.samples(), 40);

        let seasonal = fit(&view, Target::Tmax, FeatureMode::CalendarSeasonal)?;
        assert_eq!(seasonal.mode(), FeatureMode::CalendarSeasonal);
        assert_eq!(seasonal.target(), Target::Tmax);
        Ok(())
    }

    #[test]
    fn test_forecast_reports_fit_quality() -> Result<(), ForecastError> {
        let forecast = fit(&view(30), Target::Tmax, FeatureMode::DayOffset)?.forecast(7);
        assert_eq!(forecast.points.len(), 8);
        assert!((forecast.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(forecast.samples, 30);
        Ok(())
    }

    #[test]
    fn test_outlook_isolates_failing_target() {
        let outlook = DailyOutlook::new(&view(30), 10);
        assert!(outlook.tmax.is_ok());
        assert!(outlook.precip.is_ok());
        assert!(matches!(
            outlook.get(Target::Tmin),
            Err(ForecastError::InsufficientDataPoints { found: 5, .. })
        ));
    }
}
