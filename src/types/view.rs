//! Contains the [`View`], the filtered and time-ordered result of a query.

use crate::types::observation::Observation;
use chrono::NaiveDate;

/// An ordered, filtered subset of a [`crate::RecordSet`].
///
/// Dated observations are kept in ascending date order (ties keep source order).
/// Undated observations are only ever present when the query was a pure locality
/// match; they count toward aggregates but never appear in
/// [`View::chronological`], which is what charts and forecasts consume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    dated: Vec<Observation>,
    undated: Vec<Observation>,
}

impl View {
    pub(crate) fn new(mut dated: Vec<Observation>, undated: Vec<Observation>) -> Self {
        dated.sort_by_key(|o| o.date);
        Self { dated, undated }
    }

    /// The dated observations in ascending date order.
    pub fn chronological(&self) -> &[Observation] {
        &self.dated
    }

    /// Observations lacking a date, retained for date-independent aggregates.
    pub fn undated(&self) -> &[Observation] {
        &self.undated
    }

    /// All observations: dated ones in order, followed by undated ones.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> + Clone {
        self.dated.iter().chain(self.undated.iter())
    }

    pub fn len(&self) -> usize {
        self.dated.len() + self.undated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dated.is_empty() && self.undated.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dated.first().and_then(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dated.last().and_then(|o| o.date)
    }
}
