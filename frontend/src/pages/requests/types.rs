use super::utils::format_display_date;
use crate::api::{
    LeaveDuration, LeaveRequest, LeaveTypeOption, OvertimeRequest, Page, RequestKind, RequestStatus,
};
use serde::{Deserialize, Serialize};

pub const LEAVE_TYPES: &[(&str, &str)] = &[
    ("annual", "Nghỉ phép năm"),
    ("sick", "Nghỉ ốm"),
    ("maternity", "Thai sản"),
    ("wedding_employee", "Nghỉ cưới"),
    ("wedding_child", "Con cưới"),
    ("funeral_parent", "Tang cha/mẹ"),
    ("unpaid", "Nghỉ không lương"),
    ("OT_COMP", "Nghỉ bù OT"),
];

// These types are not counted against a balance.
const UNMETERED_LEAVE_TYPES: &[&str] = &["sick", "maternity", "unpaid"];

pub fn leave_type_name(code: &str) -> String {
    LEAVE_TYPES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn builtin_leave_types() -> Vec<LeaveTypeOption> {
    LEAVE_TYPES
        .iter()
        .map(|(code, name)| LeaveTypeOption {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn shows_balance(leave_type_code: &str) -> bool {
    !UNMETERED_LEAVE_TYPES.contains(&leave_type_code)
}

pub const MY_REQUESTS_PATH: &str = "/employee/request";
pub const LEAVE_FORM_PATH: &str = "/employee/request/leave-request";
pub const OVERTIME_FORM_PATH: &str = "/employee/request/ot-request";

pub fn approver_list_path(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => "/manager/requests/leaves",
        RequestKind::Overtime => "/manager/requests/overtime",
    }
}

pub fn approval_path(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => "/manager/requests/leaves/approval",
        RequestKind::Overtime => "/manager/requests/overtime/approval",
    }
}

pub fn own_detail_path(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => "/employee/request/leave-detail",
        RequestKind::Overtime => "/employee/request/ot-detail",
    }
}

/// Rows shown per page on the approver lists.
pub fn approver_page_size(kind: RequestKind) -> u32 {
    match kind {
        RequestKind::Leave => 20,
        RequestKind::Overtime => 10,
    }
}

/// A table row shared by the leave and overtime lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRow {
    pub id: String,
    pub employee_code: String,
    pub employee_name: String,
    pub category: String,
    pub period: String,
    pub amount: String,
    pub status: RequestStatus,
}

impl From<&LeaveRequest> for RequestRow {
    fn from(request: &LeaveRequest) -> Self {
        let end = request.end_date();
        let period = if end == request.from_date {
            format_display_date(request.from_date)
        } else {
            format!(
                "{} - {}",
                format_display_date(request.from_date),
                format_display_date(end)
            )
        };
        let half_day = request
            .duration
            .as_deref()
            .and_then(LeaveDuration::from_code)
            .is_some_and(|duration| duration != LeaveDuration::FullDay);
        let amount = if half_day {
            "0.5 ngày".to_string()
        } else {
            format!("{} ngày", (end - request.from_date).num_days().abs() + 1)
        };
        Self {
            id: request.id.clone(),
            employee_code: request.employee_code.clone(),
            employee_name: request.full_name.clone().unwrap_or_default(),
            category: leave_type_name(&request.leave_type_code),
            period,
            amount,
            status: request.status,
        }
    }
}

impl From<&OvertimeRequest> for RequestRow {
    fn from(request: &OvertimeRequest) -> Self {
        let hours = request.worked_time.unwrap_or_else(|| {
            (request.to_time - request.from_time).num_minutes() as f64 / 60.0
        });
        Self {
            id: request.id.clone(),
            employee_code: request.employee_code.clone(),
            employee_name: request.full_name.clone().unwrap_or_default(),
            category: "Làm thêm giờ".to_string(),
            period: format!(
                "{} {}-{}",
                format_display_date(request.ot_date),
                request.from_time.format("%H:%M"),
                request.to_time.format("%H:%M")
            ),
            amount: format!("{} giờ", hours),
            status: request.status,
        }
    }
}

pub fn page_rows<T>(page: Page<T>) -> Page<RequestRow>
where
    for<'a> RequestRow: From<&'a T>,
{
    Page {
        content: page.content.iter().map(RequestRow::from).collect(),
        total_pages: page.total_pages,
    }
}
