use chrono::{NaiveDate, NaiveDateTime};
use leptos::*;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn code(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Chờ duyệt",
            RequestStatus::Approved => "Đã duyệt",
            RequestStatus::Rejected => "Từ chối",
        }
    }

    /// Approved and rejected requests never change again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Leave,
    Overtime,
}

impl RequestKind {
    /// Vietnamese noun used in confirmation copy.
    pub fn noun(self) -> &'static str {
        match self {
            RequestKind::Leave => "nghỉ phép",
            RequestKind::Overtime => "làm thêm giờ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub employee_code: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub from_date: NaiveDate,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    pub leave_type_code: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub is_paid_leave: Option<bool>,
    #[serde(default)]
    pub approval_date: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
}

impl LeaveRequest {
    pub fn end_date(&self) -> NaiveDate {
        self.to_date.unwrap_or(self.from_date)
    }

    pub fn attachment_name(&self) -> Option<&str> {
        self.file
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub employee_code: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub ot_date: NaiveDate,
    pub from_time: NaiveDateTime,
    pub to_time: NaiveDateTime,
    #[serde(default)]
    pub worked_time: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub day_type_id: Option<i64>,
    pub status: RequestStatus,
    #[serde(default, rename = "createdDateOT")]
    pub created_date_ot: Option<String>,
    #[serde(default, rename = "approvedDateOT")]
    pub approved_date_ot: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
        }
    }
}

/// Yearly overtime hours for one employee, broken down by month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeSummary {
    pub employee_code: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub total_overtime: f64,
    #[serde(default)]
    pub monthly: Vec<MonthlyOvertime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyOvertime {
    pub month: u32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub employee_code: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveDuration {
    #[default]
    FullDay,
    Morning,
    Afternoon,
}

impl LeaveDuration {
    pub const ALL: [LeaveDuration; 3] = [
        LeaveDuration::FullDay,
        LeaveDuration::Morning,
        LeaveDuration::Afternoon,
    ];

    pub fn code(self) -> &'static str {
        match self {
            LeaveDuration::FullDay => "FULL_DAY",
            LeaveDuration::Morning => "MORNING",
            LeaveDuration::Afternoon => "AFTERNOON",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeaveDuration::FullDay => "Cả ngày",
            LeaveDuration::Morning => "Buổi sáng",
            LeaveDuration::Afternoon => "Buổi chiều",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|duration| duration.code() == code)
    }
}

/// One page of the approver-wide listing. `keyword` is already in the
/// backend's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestListQuery {
    pub year: i32,
    pub month: u32,
    pub page: u32,
    pub size: u32,
    pub keyword: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is empty")]
    Empty,
    #[error("response body does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Parses a response body into `T`, rejecting anything that does not fit.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    if body.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl From<DecodeError> for ApiError {
    fn from(error: DecodeError) -> Self {
        ApiError::decode(error.to_string())
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn new(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", msg)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::new("UNKNOWN", msg)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::new("REQUEST_FAILED", msg)
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new("DECODE_ERROR", msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", msg)
    }

    pub fn is_validation(&self) -> bool {
        self.code == "VALIDATION_ERROR"
    }
}
