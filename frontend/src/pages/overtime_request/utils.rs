use crate::api::{ApiError, OvertimeSubmission};
use crate::components::confirm_dialog::DialogDetails;
use crate::pages::requests::utils::{format_display_date, parse_display_date, DateParseError};
use crate::utils::time::is_weekend;
use chrono::NaiveDate;
use thiserror::Error;

/// Weekday overtime may not start before this hour.
pub const WEEKDAY_EARLIEST_START: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(date: NaiveDate) -> Self {
        if is_weekend(date) {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "Ngày thường",
            DayType::Weekend => "Thứ 7/Chủ nhật",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OvertimeValidationError {
    #[error("Vui lòng điền đầy đủ thông tin ngày làm thêm và thời gian")]
    MissingFields,
    #[error("Ngày làm thêm không hợp lệ")]
    InvalidDate(#[from] DateParseError),
    #[error("Giờ phải nằm trong khoảng 0 đến 23")]
    HourOutOfRange,
    #[error("Giờ bắt đầu phải nhỏ hơn giờ kết thúc")]
    StartNotBeforeEnd,
    #[error("OT ngày thường phải bắt đầu từ 17 giờ trở đi")]
    WeekdayBeforeEvening,
}

impl From<OvertimeValidationError> for ApiError {
    fn from(err: OvertimeValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OvertimeForm {
    pub ot_date: String,
    pub from_hour: Option<u32>,
    pub to_hour: Option<u32>,
    pub reason: String,
}

impl OvertimeForm {
    pub fn date(&self) -> Option<NaiveDate> {
        parse_display_date(&self.ot_date).ok()
    }

    pub fn day_type(&self) -> Option<DayType> {
        self.date().map(DayType::of)
    }

    pub fn day_type_label(&self) -> &'static str {
        self.day_type().map(DayType::label).unwrap_or("-")
    }

    pub fn validate(&self) -> Result<OvertimeSubmission, OvertimeValidationError> {
        let (Some(from_hour), Some(to_hour)) = (self.from_hour, self.to_hour) else {
            return Err(OvertimeValidationError::MissingFields);
        };
        if self.ot_date.trim().is_empty() {
            return Err(OvertimeValidationError::MissingFields);
        }
        let ot_date = parse_display_date(&self.ot_date)?;
        if from_hour > 23 || to_hour > 23 {
            return Err(OvertimeValidationError::HourOutOfRange);
        }
        if from_hour >= to_hour {
            return Err(OvertimeValidationError::StartNotBeforeEnd);
        }
        if DayType::of(ot_date) == DayType::Weekday && from_hour < WEEKDAY_EARLIEST_START {
            return Err(OvertimeValidationError::WeekdayBeforeEvening);
        }
        Ok(OvertimeSubmission {
            ot_date,
            from_hour,
            to_hour,
            reason: self.reason.clone(),
        })
    }

    /// True while a typed weekday start hour is already known to be too early.
    pub fn early_weekday_start(&self) -> bool {
        self.day_type() == Some(DayType::Weekday)
            && matches!(self.from_hour, Some(hour) if hour > 0 && hour < WEEKDAY_EARLIEST_START)
    }

    pub fn total_hours_label(&self) -> String {
        match (self.from_hour, self.to_hour) {
            (Some(from), Some(to)) if to > from => format!("{} giờ", to - from),
            _ => "0 giờ".to_string(),
        }
    }

    pub fn confirm_details(&self) -> DialogDetails {
        let hour = |value: Option<u32>| value.map(|h| format!("{:02}:00", h)).unwrap_or_default();
        vec![
            (
                "Ngày OT".to_string(),
                self.date().map(format_display_date).unwrap_or_default(),
            ),
            ("Loại ngày".to_string(), self.day_type_label().to_string()),
            ("Từ".to_string(), hour(self.from_hour)),
            ("Đến".to_string(), hour(self.to_hour)),
            ("Tổng".to_string(), self.total_hours_label()),
        ]
    }
}

/// Whole hours typed in a number box; blank means not entered yet.
pub fn parse_hour_input(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse::<u32>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::date;

    // 2024-08-12 is a Monday, 2024-08-10 a Saturday.
    fn form(date: &str, from: u32, to: u32) -> OvertimeForm {
        OvertimeForm {
            ot_date: date.into(),
            from_hour: Some(from),
            to_hour: Some(to),
            reason: "chạy báo cáo".into(),
        }
    }

    #[test]
    fn day_type_follows_the_calendar() {
        assert_eq!(form("2024-08-12", 18, 20).day_type(), Some(DayType::Weekday));
        assert_eq!(form("2024-08-10", 8, 12).day_type(), Some(DayType::Weekend));
        assert_eq!(OvertimeForm::default().day_type_label(), "-");
        assert_eq!(form("2024-08-11", 8, 12).day_type_label(), "Thứ 7/Chủ nhật");
    }

    #[test]
    fn missing_values_are_rejected_first() {
        assert_eq!(
            OvertimeForm::default().validate(),
            Err(OvertimeValidationError::MissingFields)
        );
        let mut missing_date = form("2024-08-12", 18, 20);
        missing_date.ot_date.clear();
        assert_eq!(missing_date.validate(), Err(OvertimeValidationError::MissingFields));
        let mut missing_hour = form("2024-08-12", 18, 20);
        missing_hour.to_hour = None;
        assert_eq!(missing_hour.validate(), Err(OvertimeValidationError::MissingFields));
    }

    #[test]
    fn start_must_be_before_end() {
        assert_eq!(
            form("2024-08-10", 10, 10).validate(),
            Err(OvertimeValidationError::StartNotBeforeEnd)
        );
        assert_eq!(
            form("2024-08-12", 21, 19).validate(),
            Err(OvertimeValidationError::StartNotBeforeEnd)
        );
    }

    #[test]
    fn weekday_overtime_starts_in_the_evening() {
        assert_eq!(
            form("2024-08-12", 16, 20).validate(),
            Err(OvertimeValidationError::WeekdayBeforeEvening)
        );
        assert!(form("2024-08-12", 17, 20).validate().is_ok());
        // Weekends have no lower bound.
        assert!(form("2024-08-10", 8, 12).validate().is_ok());
    }

    #[test]
    fn hours_beyond_the_day_are_rejected() {
        assert_eq!(
            form("2024-08-10", 8, 24).validate(),
            Err(OvertimeValidationError::HourOutOfRange)
        );
    }

    #[test]
    fn submission_carries_parsed_values() {
        let submission = form("12/08/2024", 18, 21).validate().unwrap();
        assert_eq!(submission.ot_date, date(2024, 8, 12));
        assert_eq!(submission.from_hour, 18);
        assert_eq!(submission.to_hour, 21);
        assert_eq!(submission.reason, "chạy báo cáo");
    }

    #[test]
    fn early_start_warning_ignores_zero_and_weekends() {
        assert!(form("2024-08-12", 9, 20).early_weekday_start());
        assert!(!form("2024-08-12", 0, 20).early_weekday_start());
        assert!(!form("2024-08-10", 9, 20).early_weekday_start());
        assert!(!form("2024-08-12", 18, 20).early_weekday_start());
    }

    #[test]
    fn totals_and_summary() {
        assert_eq!(form("2024-08-12", 18, 21).total_hours_label(), "3 giờ");
        assert_eq!(form("2024-08-12", 21, 18).total_hours_label(), "0 giờ");
        let details = form("2024-08-12", 18, 21).confirm_details();
        assert_eq!(details[0].1, "12/08/2024");
        assert_eq!(details[1].1, "Ngày thường");
        assert_eq!(details[2].1, "18:00");
        assert_eq!(details[4].1, "3 giờ");
    }

    #[test]
    fn hour_inputs_parse_whole_numbers() {
        assert_eq!(parse_hour_input(" 18 "), Some(18));
        assert_eq!(parse_hour_input(""), None);
        assert_eq!(parse_hour_input("abc"), None);
    }
}
