//! Day-offset mode: regression on the number of days since the first observation
//! of the view. Temperatures use a straight line, precipitation a quadratic.

use crate::forecast::error::ForecastError;
use crate::forecast::least_squares::LeastSquares;
use crate::forecast::{ForecastPoint, TrendModel};
use crate::types::target::Target;
use crate::types::view::View;
use chrono::{Days, NaiveDate};
use log::debug;

/// Fitting needs strictly more usable rows than this.
pub const MIN_DAY_OFFSET_POINTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DayOffsetModel {
    target: Target,
    fit: LeastSquares,
    origin: NaiveDate,
    last_date: NaiveDate,
}

impl DayOffsetModel {
    /// Fits `target` against the day offset of every dated row of `view` that has a
    /// value for it. Offsets count from the first date of the view.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientDataPoints`] unless more than
    /// [`MIN_DAY_OFFSET_POINTS`] rows qualify.
    pub fn fit(view: &View, target: Target) -> Result<Self, ForecastError> {
        let insufficient = |found| ForecastError::InsufficientDataPoints {
            target,
            required: MIN_DAY_OFFSET_POINTS + 1,
            found,
        };
        let (Some(origin), Some(last_date)) = (view.first_date(), view.last_date()) else {
            return Err(insufficient(0));
        };

        let samples: Vec<(i64, f64)> = view
            .chronological()
            .iter()
            .filter_map(|o| Some(((o.date? - origin).num_days(), target.value(o)?)))
            .collect();

        if samples.len() <= MIN_DAY_OFFSET_POINTS {
            return Err(insufficient(samples.len()));
        }

        let features: Vec<Vec<f64>> = samples
            .iter()
            .map(|(offset, _)| day_features(target, *offset))
            .collect();
        let targets: Vec<f64> = samples.iter().map(|(_, value)| *value).collect();
        let fit = LeastSquares::fit(&features, &targets);

        debug!(
            "Fitted day-offset model for {} on {} rows ({} to {}), R² = {:.3}",
            target,
            fit.samples(),
            origin,
            last_date,
            fit.r_squared()
        );
        Ok(Self {
            target,
            fit,
            origin,
            last_date,
        })
    }

    /// First date of the fitted view; day offset zero.
    pub fn origin(&self) -> NaiveDate {
        self.origin
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    pub fn predict_date(&self, date: NaiveDate) -> f64 {
        let offset = (date - self.origin).num_days();
        self.fit.predict(&day_features(self.target, offset))
    }
}

/// Precipitation is expanded to `[d, d²]`; temperatures use `[d]`.
fn day_features(target: Target, offset: i64) -> Vec<f64> {
    let d = offset as f64;
    match target {
        Target::Precip => vec![d, d * d],
        Target::Tmax | Target::Tmin => vec![d],
    }
}

impl TrendModel for DayOffsetModel {
    fn target(&self) -> Target {
        self.target
    }

    fn r_squared(&self) -> f64 {
        self.fit.r_squared()
    }

    fn samples(&self) -> usize {
        self.fit.samples()
    }

    /// One point per day from the last observed date (inclusive) through
    /// `horizon` days after it.
    fn predict(&self, horizon: usize) -> Vec<ForecastPoint> {
        (0..=horizon as u64)
            .map_while(|i| self.last_date.checked_add_days(Days::new(i)))
            .map(|date| ForecastPoint {
                date,
                value: self.predict_date(date),
            })
            .collect()
    }
}
