//! The query engine: turns a [`RecordSet`] and a [`Query`] into a time-ordered [`View`].

use crate::types::observation::Observation;
use crate::types::record_set::RecordSet;
use crate::types::traits::period::date_period::DatePeriod;
use crate::types::traits::types::StartEndDate;
use crate::types::view::View;
use bon::Builder;
use chrono::NaiveDate;

/// A range that no date can satisfy, used for periods that do not resolve.
const EMPTY_RANGE: StartEndDate = StartEndDate {
    start: NaiveDate::MAX,
    end: NaiveDate::MIN,
};

/// A conjunction of predicates over observations. Unset predicates match everything.
///
/// # Examples
///
/// ```
/// use clima::{Month, Query};
///
/// let query = Query::builder().locality("Atlautla").year(2021).build();
/// assert_eq!(query.locality.as_deref(), Some("Atlautla"));
///
/// let march = Query::builder().locality("Atlautla").build().within(Month(2021, 3));
/// assert!(march.is_date_based());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct Query {
    /// Exact locality name, compared after trimming.
    #[builder(into)]
    pub locality: Option<String>,
    /// Calendar year of the observation date.
    pub year: Option<i32>,
    /// Calendar month (1..=12) of the observation date.
    pub month: Option<u32>,
    /// Inclusive date range. A range with `start > end` matches nothing.
    pub date_range: Option<StartEndDate>,
}

impl Query {
    /// Restricts the query to the inclusive date range of `period`.
    ///
    /// A period that cannot be resolved (such as month 13) makes the query match nothing.
    pub fn within(mut self, period: impl DatePeriod) -> Self {
        self.date_range = Some(period.get_date_period().unwrap_or(EMPTY_RANGE));
        self
    }

    /// Whether any predicate needs the observation date.
    pub fn is_date_based(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.date_range.is_some()
    }

    fn matches_locality(&self, observation: &Observation) -> bool {
        self.locality
            .as_deref()
            .map_or(true, |name| observation.locality == name.trim())
    }

    fn matches_date(&self, observation: &Observation, date: NaiveDate) -> bool {
        if let Some(year) = self.year {
            if observation.year() != Some(year) {
                return false;
            }
        }
        if let Some(month) = self.month {
            if observation.month() != Some(month) {
                return false;
            }
        }
        if let Some(range) = self.date_range {
            if date < range.start || date > range.end {
                return false;
            }
        }
        true
    }
}

/// Applies `query` to `records`.
///
/// Year and month predicates read the calendar fields derived by
/// [`crate::with_calendar_fields`], so records should be time-indexed first
/// (the [`crate::RecordCache`] always is).
///
/// Undated observations are only kept for a pure locality query, where they still
/// count toward date-independent aggregates. An empty query yields every dated
/// observation.
pub fn filter(records: &RecordSet, query: &Query) -> View {
    if query
        .date_range
        .is_some_and(|range| range.start > range.end)
    {
        return View::default();
    }

    let keep_undated = query.locality.is_some() && !query.is_date_based();
    let mut dated = Vec::new();
    let mut undated = Vec::new();

    for observation in records
        .observations()
        .iter()
        .filter(|o| query.matches_locality(o))
    {
        match observation.date {
            Some(date) if query.matches_date(observation, date) => dated.push(observation.clone()),
            Some(_) => {}
            None if keep_undated => undated.push(observation.clone()),
            None => {}
        }
    }

    View::new(dated, undated)
}

/// Query shorthands on a [`RecordSet`].
pub trait RecordSetFilterExt {
    /// Applies a full [`Query`].
    fn query(&self, query: &Query) -> View;

    /// Exact locality match after trimming.
    fn by_locality(&self, locality: &str) -> View;

    /// Locality observations within an inclusive date range.
    /// Returns an empty view when `start > end`.
    fn by_date_range(&self, locality: &str, start: NaiveDate, end: NaiveDate) -> View;
}

impl RecordSetFilterExt for RecordSet {
    fn query(&self, query: &Query) -> View {
        filter(self, query)
    }

    fn by_locality(&self, locality: &str) -> View {
        filter(self, &Query::builder().locality(locality).build())
    }

    fn by_date_range(&self, locality: &str, start: NaiveDate, end: NaiveDate) -> View {
        filter(
            self,
            &Query::builder()
                .locality(locality)
                .date_range(StartEndDate { start, end })
                .build(),
        )
    }
}
