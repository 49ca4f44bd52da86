use crate::types::traits::types::{Month, StartEndDate, Year};
use crate::types::traits::utils::last_day_of;
use chrono::NaiveDate;

/// Anything that resolves to an inclusive calendar date range.
pub trait DatePeriod {
    fn get_date_period(self) -> Option<StartEndDate>;
}

impl DatePeriod for NaiveDate {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self,
            end: self,
        })
    }
}

impl DatePeriod for Year {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl DatePeriod for Month {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self.first_day()?,
            end: last_day_of(self)?,
        })
    }
}

impl DatePeriod for (NaiveDate, NaiveDate) {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self.0,
            end: self.1,
        })
    }
}
