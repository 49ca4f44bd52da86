//! Calendar-seasonal mode: a linear model over `(year, sin(2π·month/12), cos(2π·month/12))`.

use crate::forecast::error::ForecastError;
use crate::forecast::least_squares::LeastSquares;
use crate::forecast::{ForecastPoint, TrendModel};
use crate::types::target::Target;
use crate::types::traits::types::Month;
use crate::types::view::View;
use log::debug;
use std::f64::consts::PI;

/// Minimum rows with year, month and target present.
pub const MIN_SEASONAL_HISTORY: usize = 12;

/// The feature vector of a calendar month.
pub fn seasonal_features(month: Month) -> [f64; 3] {
    let angle = 2.0 * PI * f64::from(month.month()) / 12.0;
    [f64::from(month.year()), angle.sin(), angle.cos()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalModel {
    target: Target,
    fit: LeastSquares,
    last_observed: Month,
}

impl SeasonalModel {
    /// Fits the model on every dated row of `view` that has a year, a valid month
    /// and a value for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientHistory`] when fewer than
    /// [`MIN_SEASONAL_HISTORY`] rows qualify.
    pub fn fit(view: &View, target: Target) -> Result<Self, ForecastError> {
        let samples: Vec<(Month, f64)> = view
            .chronological()
            .iter()
            .filter_map(|o| Some((Month(o.year()?, o.month()?), target.value(o)?)))
            .collect();

        if samples.len() < MIN_SEASONAL_HISTORY {
            return Err(ForecastError::InsufficientHistory {
                target,
                required: MIN_SEASONAL_HISTORY,
                found: samples.len(),
            });
        }

        let features: Vec<Vec<f64>> = samples
            .iter()
            .map(|(month, _)| seasonal_features(*month).to_vec())
            .collect();
        let targets: Vec<f64> = samples.iter().map(|(_, value)| *value).collect();
        let fit = LeastSquares::fit(&features, &targets);

        let last_observed = samples
            .iter()
            .map(|(month, _)| *month)
            .max()
            .unwrap_or(Month(0, 1));

        debug!(
            "Fitted calendar-seasonal model for {} on {} rows, R² = {:.3}",
            target,
            fit.samples(),
            fit.r_squared()
        );
        Ok(Self {
            target,
            fit,
            last_observed,
        })
    }

    /// The latest month present in the training rows.
    pub fn last_observed(&self) -> Month {
        self.last_observed
    }

    /// Predicted value for an arbitrary calendar month.
    pub fn predict_month(&self, month: Month) -> f64 {
        self.fit.predict(&seasonal_features(month))
    }

    /// Single-step prediction for the month following `anchor`.
    ///
    /// December rolls over into January of the next year.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidMonth`] when `anchor` is not a calendar month.
    pub fn predict_after(&self, anchor: Month) -> Result<ForecastPoint, ForecastError> {
        let next = anchor.next();
        let date = anchor
            .first_day()
            .and(next.first_day())
            .ok_or(ForecastError::InvalidMonth(anchor))?;
        Ok(ForecastPoint {
            date,
            value: self.predict_month(next),
        })
    }
}

impl TrendModel for SeasonalModel {
    fn target(&self) -> Target {
        self.target
    }

    fn r_squared(&self) -> f64 {
        self.fit.r_squared()
    }

    fn samples(&self) -> usize {
        self.fit.samples()
    }

    /// `horizon` consecutive months strictly after the latest observed month, each
    /// dated on its first day.
    fn predict(&self, horizon: usize) -> Vec<ForecastPoint> {
        std::iter::successors(Some(self.last_observed.next()), |m| Some(m.next()))
            .take(horizon)
            .filter_map(|month| {
                Some(ForecastPoint {
                    date: month.first_day()?,
                    value: self.predict_month(month),
                })
            })
            .collect()
    }
}
