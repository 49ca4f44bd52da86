//! The parsed contents of one climate source file.

use crate::types::lat_lon::LatLon;
use crate::types::observation::Observation;
use std::collections::{BTreeSet, HashSet};

/// An immutable collection of observations in source order.
///
/// Produced by [`crate::load_records`] and enriched by [`crate::with_calendar_fields`].
/// Queries never modify a `RecordSet`; they produce a new [`crate::View`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    observations: Vec<Observation>,
}

impl RecordSet {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct non-empty locality names, in the order they first appear.
    pub fn localities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.observations
            .iter()
            .map(|o| o.locality.as_str())
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect()
    }

    /// Number of rows recorded for `locality`, dated or not.
    pub fn count_for(&self, locality: &str) -> usize {
        let locality = locality.trim();
        self.observations
            .iter()
            .filter(|o| o.locality == locality)
            .count()
    }

    /// Sorted distinct years present in the dated rows.
    pub fn years(&self) -> Vec<i32> {
        self.distinct(|o| o.year())
    }

    /// Sorted distinct years present in the dated rows of one locality.
    pub fn years_for(&self, locality: &str) -> Vec<i32> {
        let locality = locality.trim();
        self.distinct(|o| o.year().filter(|_| o.locality == locality))
    }

    /// Sorted distinct months (1..=12) present in the dated rows.
    pub fn months(&self) -> Vec<u32> {
        self.distinct(|o| o.month())
    }

    /// The fixed coordinate pair of a locality, taken from its first row where both
    /// latitude and longitude are present.
    pub fn coordinates(&self, locality: &str) -> Option<LatLon> {
        let locality = locality.trim();
        self.observations
            .iter()
            .filter(|o| o.locality == locality)
            .find_map(|o| Some(LatLon(o.latitude?, o.longitude?)))
    }

    fn distinct<T: Ord>(&self, key: impl Fn(&Observation) -> Option<T>) -> Vec<T> {
        self.observations
            .iter()
            .filter_map(key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
