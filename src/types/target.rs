//! Defines the measured quantities a forecast can be fitted on.

use crate::types::observation::Observation;
use serde::Serialize;
use std::fmt;

/// A numeric field of an [`Observation`] that can be aggregated or forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Daily maximum temperature, in degrees.
    Tmax,
    /// Daily minimum temperature, in degrees.
    Tmin,
    /// Daily precipitation, in millimeters.
    Precip,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Tmax, Target::Tmin, Target::Precip];

    /// Name of the source column holding this field.
    pub fn column_name(&self) -> &'static str {
        match self {
            Target::Tmax => "TMAX",
            Target::Tmin => "TMIN",
            Target::Precip => "PRECIP",
        }
    }

    pub fn value(&self, observation: &Observation) -> Option<f64> {
        match self {
            Target::Tmax => observation.tmax,
            Target::Tmin => observation.tmin,
            Target::Precip => observation.precip,
        }
    }
}

/// Formats a `Target` using its lowercase name.
///
/// # Examples
///
/// ```
/// use clima::Target;
///
/// assert_eq!(Target::Precip.to_string(), "precip");
/// ```
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Tmax => "tmax",
            Target::Tmin => "tmin",
            Target::Precip => "precip",
        };
        write!(f, "{}", name)
    }
}
