use crate::api::{ApiError, Attachment, LeaveDuration, LeaveSubmission, LeaveTypeOption};
use crate::components::confirm_dialog::DialogDetails;
use crate::pages::requests::{
    types::leave_type_name,
    utils::{format_display_date, parse_display_date, DateParseError},
};
use thiserror::Error;

pub const FALLBACK_EMPLOYEE_CODE: &str = "EMP001";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveValidationError {
    #[error("Vui lòng chọn ngày bắt đầu")]
    MissingFromDate,
    #[error("Vui lòng nhập lý do nghỉ phép")]
    MissingReason,
    #[error("Ngày không hợp lệ")]
    InvalidDate(#[from] DateParseError),
    #[error("Ngày kết thúc phải sau hoặc bằng ngày bắt đầu")]
    EndBeforeStart,
}

impl From<LeaveValidationError> for ApiError {
    fn from(err: LeaveValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Raw leave form input as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveForm {
    pub employee_code: String,
    pub leave_type: String,
    pub is_paid_leave: bool,
    pub from_date: String,
    pub to_date: String,
    pub duration: LeaveDuration,
    pub reason: String,
    pub attachment: Option<Attachment>,
}

impl Default for LeaveForm {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LeaveForm {
    pub fn new(employee_code: Option<&str>) -> Self {
        Self {
            employee_code: employee_code
                .filter(|code| !code.trim().is_empty())
                .unwrap_or(FALLBACK_EMPLOYEE_CODE)
                .to_string(),
            leave_type: "annual".to_string(),
            is_paid_leave: true,
            from_date: String::new(),
            to_date: String::new(),
            duration: LeaveDuration::FullDay,
            reason: String::new(),
            attachment: None,
        }
    }

    /// Checks the form locally and builds the payload. An empty end date
    /// means a single day.
    pub fn validate(&self) -> Result<LeaveSubmission, LeaveValidationError> {
        if self.from_date.trim().is_empty() {
            return Err(LeaveValidationError::MissingFromDate);
        }
        if self.reason.trim().is_empty() {
            return Err(LeaveValidationError::MissingReason);
        }
        let from_date = parse_display_date(&self.from_date)?;
        let to_date = if self.to_date.trim().is_empty() {
            from_date
        } else {
            parse_display_date(&self.to_date)?
        };
        if to_date < from_date {
            return Err(LeaveValidationError::EndBeforeStart);
        }
        Ok(LeaveSubmission {
            employee_code: self.employee_code.clone(),
            leave_type: self.leave_type.clone(),
            is_paid_leave: self.is_paid_leave,
            from_date,
            to_date,
            duration: self.duration,
            reason: self.reason.clone(),
            attachment: self.attachment.clone(),
        })
    }

    /// Clears the per-request fields and keeps who/what/how.
    pub fn reset_after_submit(&mut self) {
        self.from_date.clear();
        self.to_date.clear();
        self.reason.clear();
        self.attachment = None;
    }

    /// Inclusive day count. `None` until a start date is set or while the
    /// range is reversed.
    pub fn requested_days(&self) -> Option<i64> {
        let from = parse_display_date(&self.from_date).ok()?;
        match parse_display_date(&self.to_date) {
            Ok(to) if to < from => None,
            Ok(to) => Some((to - from).num_days() + 1),
            Err(_) => Some(1),
        }
    }

    pub fn requested_days_label(&self) -> String {
        self.requested_days()
            .map(|days| format!("{} ngày", days))
            .unwrap_or_else(|| "Không xác định".to_string())
    }

    pub fn confirm_details(&self, options: &[LeaveTypeOption]) -> DialogDetails {
        let type_name = options
            .iter()
            .find(|option| option.code == self.leave_type)
            .map(|option| option.name.clone())
            .unwrap_or_else(|| leave_type_name(&self.leave_type));
        let from = parse_display_date(&self.from_date).ok();
        let to = parse_display_date(&self.to_date).ok().or(from);
        let show = |date: Option<chrono::NaiveDate>| date.map(format_display_date).unwrap_or_default();
        vec![
            ("Loại".to_string(), type_name),
            ("Từ".to_string(), show(from)),
            ("Đến".to_string(), show(to)),
            ("Thời lượng".to_string(), self.duration.label().to_string()),
        ]
    }
}

pub fn balance_label(loading: bool, remaining: Option<f64>) -> String {
    if loading {
        "Đang tải...".to_string()
    } else {
        match remaining {
            Some(days) => format!("Còn lại: {} ngày", days),
            None => "Còn lại: -- ngày".to_string(),
        }
    }
}

/// Reads the chosen file into memory for the multipart upload.
pub async fn read_attachment(file: web_sys::File) -> Result<Attachment, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Không thể đọc tệp đính kèm".to_string())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = match file.type_() {
        mime if mime.trim().is_empty() => "application/octet-stream".to_string(),
        mime => mime,
    };
    Ok(Attachment {
        file_name: file.name(),
        mime_type,
        bytes,
    })
}
