//! Summary statistics over a [`View`].

use crate::types::observation::Observation;
use crate::types::target::Target;
use crate::types::traits::types::Month;
use crate::types::view::View;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A statistic that is either a number or explicitly not applicable because there
/// were no values to compute it from. A month with zero precipitation and a month
/// with no precipitation readings are never the same statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Statistic {
    Value(f64),
    NotApplicable,
}

impl Statistic {
    pub fn value(self) -> Option<f64> {
        match self {
            Statistic::Value(v) => Some(v),
            Statistic::NotApplicable => None,
        }
    }
}

impl From<Option<f64>> for Statistic {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Statistic::NotApplicable, Statistic::Value)
    }
}

/// Renders the value with one decimal, or `N/A`.
impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Value(v) => write!(f, "{:.1}", v),
            Statistic::NotApplicable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean_tmax: Statistic,
    pub mean_tmin: Statistic,
    pub sum_precip: Statistic,
    /// Rows in the view, including rows with missing fields.
    pub count: usize,
}

/// Summarizes every observation of `view`, dated or not.
///
/// Each field is aggregated over its own present values, so a missing `tmax` does
/// not exclude that row's precipitation. A field with no present values (and every
/// field of an empty view) reports [`Statistic::NotApplicable`].
pub fn summarize(view: &View) -> Summary {
    summarize_observations(view.iter(), view.len())
}

/// Summaries per calendar month for the dated observations of `view`, in month order.
pub fn monthly_summaries(view: &View) -> Vec<(Month, Summary)> {
    let mut groups: BTreeMap<Month, Vec<&Observation>> = BTreeMap::new();
    for observation in view.chronological() {
        if let (Some(year), Some(month)) = (observation.year(), observation.month()) {
            groups
                .entry(Month(year, month))
                .or_default()
                .push(observation);
        }
    }

    groups
        .into_iter()
        .map(|(month, rows)| {
            let count = rows.len();
            (month, summarize_observations(rows.into_iter(), count))
        })
        .collect()
}

fn summarize_observations<'a>(
    observations: impl Iterator<Item = &'a Observation> + Clone,
    count: usize,
) -> Summary {
    Summary {
        mean_tmax: mean(observations.clone(), Target::Tmax),
        mean_tmin: mean(observations.clone(), Target::Tmin),
        sum_precip: sum(observations, Target::Precip),
        count,
    }
}

fn mean<'a>(observations: impl Iterator<Item = &'a Observation>, target: Target) -> Statistic {
    let (total, n) = observations
        .filter_map(|o| target.value(o))
        .fold((0.0, 0usize), |(total, n), v| (total + v, n + 1));
    if n == 0 {
        Statistic::NotApplicable
    } else {
        Statistic::Value(total / n as f64)
    }
}

fn sum<'a>(observations: impl Iterator<Item = &'a Observation>, target: Target) -> Statistic {
    observations
        .filter_map(|o| target.value(o))
        .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::RecordSetFilterExt;
    use crate::time_index::with_calendar_fields;
    use crate::types::observation::CalendarFields;
    use crate::types::record_set::RecordSet;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_missing_precip_is_skipped_but_counted() {
        let records = with_calendar_fields(RecordSet::from_observations(vec![
            Observation::new("X", date(2020, 1, 1)).with_precip(Some(0.0)),
            Observation::new("X", date(2020, 1, 2)).with_precip(Some(5.0)),
            Observation::new("X", date(2020, 1, 3)).with_precip(None),
            Observation::new("X", date(2020, 1, 4)).with_precip(Some(10.0)),
        ]));

        let summary = summarize(&records.by_locality("X"));
        assert_eq!(summary.sum_precip, Statistic::Value(15.0));
        assert_eq!(summary.sum_precip.value(), Some(15.0));
        assert_eq!(summary.mean_tmax.value(), None);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean_tmax, Statistic::NotApplicable);
    }

    #[test]
    fn test_empty_view_is_not_applicable() {
        let summary = summarize(&View::default());
        assert_eq!(summary.mean_tmax, Statistic::NotApplicable);
        assert_eq!(summary.mean_tmin, Statistic::NotApplicable);
        assert_eq!(summary.sum_precip, Statistic::NotApplicable);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.sum_precip.to_string(), "N/A");
    }

    #[test]
    fn test_zero_rain_differs_from_no_data() {
        let records = with_calendar_fields(RecordSet::from_observations(vec![
            Observation::new("Dry", date(2020, 1, 1)).with_precip(Some(0.0)),
            Observation::new("Unknown", date(2020, 1, 1)).with_precip(None),
        ]));
        let dry = summarize(&records.by_locality("Dry"));
        let unknown = summarize(&records.by_locality("Unknown"));
        assert_eq!(dry.sum_precip, Statistic::Value(0.0));
        assert_eq!(unknown.sum_precip, Statistic::NotApplicable);
        assert_ne!(dry.sum_precip, unknown.sum_precip);
    }

    #[test]
    fn test_means_use_each_field_independently() {
        let records = with_calendar_fields(RecordSet::from_observations(vec![
            Observation::new("X", date(2020, 1, 1))
                .with_tmax(Some(20.0))
                .with_tmin(None),
            Observation::new("X", date(2020, 1, 2))
                .with_tmax(None)
                .with_tmin(Some(4.0)),
            Observation::new("X", None)
                .with_tmax(Some(30.0))
                .with_tmin(Some(8.0)),
        ]));
        let summary = summarize(&records.by_locality("X"));
        assert_eq!(summary.mean_tmax, Statistic::Value(25.0));
        assert_eq!(summary.mean_tmin, Statistic::Value(6.0));
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_monthly_summaries_group_dated_rows() {
        let records = with_calendar_fields(RecordSet::from_observations(vec![
            Observation::new("X", date(2020, 2, 1)).with_precip(Some(2.0)),
            Observation::new("X", date(2020, 1, 5)).with_precip(Some(1.0)),
            Observation::new("X", date(2020, 2, 9)).with_precip(Some(3.0)),
            Observation::new("X", None).with_precip(Some(100.0)),
        ]));
        let months = monthly_summaries(&records.by_locality("X"));
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].0, Month(2020, 1));
        assert_eq!(months[0].1.sum_precip, Statistic::Value(1.0));
        assert_eq!(months[1].0, Month(2020, 2));
        assert_eq!(months[1].1.sum_precip, Statistic::Value(5.0));
        assert_eq!(months[1].1.count, 2);
    }

    #[test]
    fn test_statistic_serializes_with_status() {
        let json = serde_json::to_string(&Statistic::NotApplicable).unwrap();
        assert_eq!(json, r#"{"status":"not_applicable"}"#);
        let json = serde_json::to_string(&Statistic::Value(1.5)).unwrap();
        assert_eq!(json, r#"{"status":"value","value":1.5}"#);
    }

    #[test]
    fn test_monthly_summaries_skip_out_of_range_month() {
        let mut corrupt = Observation::new("X", date(2020, 1, 20)).with_precip(Some(7.0));
        corrupt.calendar = Some(CalendarFields {
            year: 2020,
            month: 13,
            day: 20,
        });
        let mut valid = Observation::new("X", date(2020, 1, 5)).with_precip(Some(1.0));
        valid.calendar = valid.date.map(CalendarFields::from_date);
        let records = RecordSet::from_observations(vec![valid, corrupt]);

        let view = records.by_locality("X");
        let months = monthly_summaries(&view);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].0, Month(2020, 1));
        assert_eq!(months[0].1.sum_precip, Statistic::Value(1.0));
        assert_eq!(summarize(&view).count, 2);
    }
}
