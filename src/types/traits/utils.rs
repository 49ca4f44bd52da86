use crate::types::traits::types::Month;
use chrono::NaiveDate;

/// Last calendar day of `month`, `None` when it has no valid first day.
pub(crate) fn last_day_of(month: Month) -> Option<NaiveDate> {
    month.first_day()?;
    month.next().first_day()?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_of_month(month: Month) -> Option<u32> {
        use chrono::Datelike;
        last_day_of(month).map(|d| d.day())
    }

    #[test]
    fn test_last_day_of() {
        assert_eq!(day_of_month(Month(2023, 2)), Some(28));
        assert_eq!(day_of_month(Month(2024, 2)), Some(29));
        assert_eq!(day_of_month(Month(2024, 4)), Some(30));
        assert_eq!(
            last_day_of(Month(2024, 12)),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(last_day_of(Month(2024, 13)), None);
        assert_eq!(last_day_of(Month(2024, 0)), None);
    }
}
