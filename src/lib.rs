mod aggregate;
mod dashboard;
mod descriptions;
mod error;
mod filtering;
mod forecast;
mod records;
mod time_index;
mod types;

pub use dashboard::*;
pub use error::ClimaError;

pub use aggregate::{monthly_summaries, summarize, Statistic, Summary};
pub use descriptions::{Descriptions, NO_DESCRIPTION};
pub use filtering::{filter, Query, RecordSetFilterExt};
pub use time_index::with_calendar_fields;

pub use forecast::day_offset::{DayOffsetModel, MIN_DAY_OFFSET_POINTS};
pub use forecast::seasonal::{seasonal_features, SeasonalModel, MIN_SEASONAL_HISTORY};
pub use forecast::{fit, DailyOutlook, FeatureMode, Forecast, ForecastPoint, Model, TrendModel};

pub use records::cache::RecordCache;
pub use records::loader::{load_records, DATE_FORMAT};

pub use types::lat_lon::LatLon;
pub use types::observation::{CalendarFields, Observation};
pub use types::record_set::RecordSet;
pub use types::target::Target;
pub use types::traits::period::date_period::DatePeriod;
pub use types::traits::types::{month_name, Month, StartEndDate, Year};
pub use types::view::View;

pub use forecast::error::ForecastError;
pub use records::error::RecordStoreError;
