use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

use crate::config::APP_TIME_ZONE;

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&APP_TIME_ZONE)
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}

/// `YYYY-MM` for the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn current_month_key() -> String {
    month_key(today_in_app_tz())
}

/// Splits a `YYYY-MM` value into year and month.
pub fn parse_month_key(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.trim().split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_round_trip_through_parse() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(month_key(date), "2024-03");
        assert_eq!(parse_month_key("2024-03"), Some((2024, 3)));
        assert_eq!(parse_month_key("2024-13"), None);
        assert_eq!(parse_month_key("march"), None);
        assert_eq!(parse_month_key(""), None);
    }

    #[test]
    fn weekend_detection() {
        // 2024-08-10 is a Saturday.
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()));
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 8, 11).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 8, 12).unwrap()));
    }
}
