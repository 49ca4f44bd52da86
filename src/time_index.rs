//! Derives calendar fields (year, month, day) from each observation's date.

use crate::types::observation::{CalendarFields, Observation};
use crate::types::record_set::RecordSet;

/// Returns a new record set where every dated observation carries its
/// [`CalendarFields`]. Undated observations pass through with no calendar fields.
pub fn with_calendar_fields(records: RecordSet) -> RecordSet {
    RecordSet::from_observations(
        records
            .into_observations()
            .into_iter()
            .map(index_observation)
            .collect(),
    )
}

fn index_observation(mut observation: Observation) -> Observation {
    observation.calendar = observation.date.map(CalendarFields::from_date);
    observation
}
