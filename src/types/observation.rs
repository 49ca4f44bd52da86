use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Calendar fields derived from an observation's date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarFields {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// One row of the source data. Every measured field is optional: a cell that is
/// empty or not numeric in the source is `None`, never zero.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Observation {
    pub locality: String,                 // LOCALIDAD (trimmed)
    pub date: Option<NaiveDate>,          // FECHA
    pub tmax: Option<f64>,                // TMAX (degrees)
    pub tmin: Option<f64>,                // TMIN (degrees)
    pub precip: Option<f64>,              // PRECIP (mm, >= 0)
    pub latitude: Option<f64>,            // LATITUD
    pub longitude: Option<f64>,           // LONGITUD
    pub calendar: Option<CalendarFields>, // derived by the time index
}

impl Observation {
    /// Creates an observation with no measurements and no derived calendar fields.
    pub fn new(locality: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            locality: locality.into(),
            date,
            tmax: None,
            tmin: None,
            precip: None,
            latitude: None,
            longitude: None,
            calendar: None,
        }
    }

    pub fn with_tmax(mut self, tmax: Option<f64>) -> Self {
        self.tmax = tmax;
        self
    }

    pub fn with_tmin(mut self, tmin: Option<f64>) -> Self {
        self.tmin = tmin;
        self
    }

    pub fn with_precip(mut self, precip: Option<f64>) -> Self {
        self.precip = precip;
        self
    }

    pub fn with_coordinates(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.calendar.map(|c| c.year)
    }

    /// The derived month, `None` when undated or outside 1..=12.
    pub fn month(&self) -> Option<u32> {
        self.calendar
            .map(|c| c.month)
            .filter(|m| (1..=12).contains(m))
    }

    pub fn day(&self) -> Option<u32> {
        self.calendar.map(|c| c.day)
    }
}
