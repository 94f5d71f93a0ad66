use crate::api::{
    ApiError, LeaveDuration, LeaveRequest, OvertimeRequest, RequestKind, RequestStatus, SessionUser,
};
use crate::pages::requests::{
    repository::Decision,
    types::{approver_list_path, leave_type_name, MY_REQUESTS_PATH},
    utils::{format_display_date, with_query},
};
use crate::state::permissions::{can_approve, can_delete, can_edit_note, RequestFacts};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pause before leaving the page so the success toast can be read.
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(2000);

pub const MISSING_ID: &str = "Không tìm thấy ID";
pub const LOAD_FAILED: &str = "Không thể tải dữ liệu";
pub const NOT_FOUND: &str = "Không tìm thấy dữ liệu";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestDetail {
    Leave(LeaveRequest),
    Overtime(OvertimeRequest),
}

impl RequestDetail {
    pub fn facts(&self) -> RequestFacts<'_> {
        match self {
            RequestDetail::Leave(request) => request.into(),
            RequestDetail::Overtime(request) => request.into(),
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.facts().status
    }

    pub fn note(&self) -> Option<&str> {
        self.facts().note
    }

    pub fn attachment_name(&self) -> Option<&str> {
        match self {
            RequestDetail::Leave(request) => request.attachment_name(),
            RequestDetail::Overtime(_) => None,
        }
    }

    /// Label/value pairs shown in the detail card.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        match self {
            RequestDetail::Leave(request) => vec![
                ("Mã nhân viên", request.employee_code.clone()),
                ("Họ tên", text(&request.full_name)),
                ("Loại nghỉ", leave_type_name(&request.leave_type_code)),
                ("Từ ngày", format_display_date(request.from_date)),
                ("Đến ngày", format_display_date(request.end_date())),
                (
                    "Thời lượng",
                    request
                        .duration
                        .as_deref()
                        .and_then(LeaveDuration::from_code)
                        .map(|duration| duration.label().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                (
                    "Hưởng lương",
                    match request.is_paid_leave {
                        Some(true) => "Có".to_string(),
                        Some(false) => "Không".to_string(),
                        None => "-".to_string(),
                    },
                ),
                ("Lý do", text(&request.reason)),
                ("Ngày tạo", text(&request.create_date)),
                ("Ngày duyệt", text(&request.approval_date)),
            ],
            RequestDetail::Overtime(request) => vec![
                ("Mã nhân viên", request.employee_code.clone()),
                ("Họ tên", text(&request.full_name)),
                ("Ngày OT", format_display_date(request.ot_date)),
                ("Từ", request.from_time.format("%H:%M").to_string()),
                ("Đến", request.to_time.format("%H:%M").to_string()),
                (
                    "Số giờ",
                    request
                        .worked_time
                        .map(|hours| format!("{} giờ", hours))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                ("Lý do", text(&request.reason)),
                ("Ngày tạo", text(&request.created_date_ot)),
                ("Ngày duyệt", text(&request.approved_date_ot)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    MissingId,
    Loading,
    Failed(String),
    NotFound,
    Loaded(RequestDetail),
}

/// `None` means the fetch has not answered yet.
pub fn detail_state(
    id: Option<&str>,
    result: Option<Result<Option<RequestDetail>, ApiError>>,
) -> DetailState {
    if id.map(str::trim).unwrap_or_default().is_empty() {
        return DetailState::MissingId;
    }
    match result {
        None => DetailState::Loading,
        Some(Err(err)) if err.error.trim().is_empty() => DetailState::Failed(LOAD_FAILED.into()),
        Some(Err(err)) => DetailState::Failed(err.error),
        Some(Ok(None)) => DetailState::NotFound,
        Some(Ok(Some(detail))) => DetailState::Loaded(detail),
    }
}

/// Where the detail view was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOrigin {
    /// An approver list, with the list state to restore.
    Approver {
        page: u32,
        month: String,
        search: String,
    },
    /// The employee's own request list.
    Owner,
}

impl DetailOrigin {
    pub fn approver_from_query(
        page: Option<&str>,
        month: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        DetailOrigin::Approver {
            page: page.and_then(|value| value.trim().parse().ok()).unwrap_or(0),
            month: month.unwrap_or_default().to_string(),
            search: search.unwrap_or_default().to_string(),
        }
    }

    pub fn is_approver(&self) -> bool {
        matches!(self, DetailOrigin::Approver { .. })
    }

    pub fn back_url(&self, kind: RequestKind) -> String {
        match self {
            DetailOrigin::Approver {
                page,
                month,
                search,
            } => {
                let mut pairs = vec![("page", page.to_string())];
                if !month.is_empty() {
                    pairs.push(("month", month.clone()));
                }
                if !search.is_empty() {
                    pairs.push(("search", search.clone()));
                }
                with_query(approver_list_path(kind), &pairs)
            }
            DetailOrigin::Owner => MY_REQUESTS_PATH.to_string(),
        }
    }
}

pub fn decision_success(kind: RequestKind, decision: Decision) -> &'static str {
    match (kind, decision) {
        (RequestKind::Leave, Decision::Approve) => "Đã phê duyệt yêu cầu nghỉ phép thành công!",
        (RequestKind::Leave, Decision::Reject) => "Đã từ chối yêu cầu nghỉ phép!",
        (RequestKind::Overtime, Decision::Approve) => "Đã duyệt yêu cầu làm thêm giờ thành công!",
        (RequestKind::Overtime, Decision::Reject) => "Đã từ chối yêu cầu làm thêm giờ!",
    }
}

pub fn delete_success(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => "Đã xóa yêu cầu nghỉ phép thành công!",
        RequestKind::Overtime => "Đã xóa yêu cầu OT thành công!",
    }
}

fn decision_verb(decision: Decision) -> &'static str {
    match decision {
        Decision::Approve => "duyệt",
        Decision::Reject => "từ chối",
    }
}

pub fn decision_title(kind: RequestKind, decision: Decision) -> String {
    format!("Xác nhận {} yêu cầu {}", decision_verb(decision), kind.noun())
}

pub fn decision_message(kind: RequestKind, decision: Decision) -> String {
    format!(
        "Bạn có chắc chắn muốn {} yêu cầu {} này không?",
        decision_verb(decision),
        kind.noun()
    )
}

pub fn delete_message(kind: RequestKind) -> String {
    format!("Bạn có chắc chắn muốn xóa yêu cầu {} này không?", kind.noun())
}

/// What the signed-in user may do on this view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailPermissions {
    pub approve: bool,
    pub delete: bool,
    pub edit_note: bool,
}

/// Decisions are offered only on approver views, deletion only on the
/// owner's view.
pub fn detail_permissions(
    user: Option<&SessionUser>,
    origin: &DetailOrigin,
    detail: &RequestDetail,
) -> DetailPermissions {
    let facts = detail.facts();
    let approve = origin.is_approver() && can_approve(user, facts);
    DetailPermissions {
        approve,
        delete: !origin.is_approver() && can_delete(user, facts),
        edit_note: approve && can_edit_note(facts),
    }
}

/// A navigation scheduled after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub delay: Duration,
    pub url: String,
}

impl PendingNavigation {
    pub fn after_success(url: String) -> Self {
        Self {
            delay: NAVIGATE_DELAY,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{leave, overtime, user};

    #[test]
    fn states_cover_every_load_outcome() {
        let loaded = RequestDetail::Leave(leave("1", "EMP001", RequestStatus::Pending));
        assert_eq!(detail_state(None, None), DetailState::MissingId);
        assert_eq!(detail_state(Some("  "), None), DetailState::MissingId);
        assert_eq!(detail_state(Some("1"), None), DetailState::Loading);
        assert_eq!(
            detail_state(Some("1"), Some(Err(ApiError::new("HTTP_500", "Lỗi máy chủ")))),
            DetailState::Failed("Lỗi máy chủ".into())
        );
        assert_eq!(
            detail_state(Some("1"), Some(Err(ApiError::new("HTTP_500", "")))),
            DetailState::Failed(LOAD_FAILED.into())
        );
        assert_eq!(detail_state(Some("1"), Some(Ok(None))), DetailState::NotFound);
        assert_eq!(
            detail_state(Some("1"), Some(Ok(Some(loaded.clone())))),
            DetailState::Loaded(loaded)
        );
    }

    #[test]
    fn back_url_restores_list_state() {
        let origin = DetailOrigin::approver_from_query(Some("2"), Some("2024-08"), Some("Chờ duyệt"));
        assert_eq!(
            origin.back_url(RequestKind::Leave),
            "/manager/requests/leaves?page=2&month=2024-08&search=Ch%E1%BB%9D%20duy%E1%BB%87t"
        );
        let bare = DetailOrigin::approver_from_query(None, None, Some(""));
        assert_eq!(bare.back_url(RequestKind::Overtime), "/manager/requests/overtime?page=0");
        assert_eq!(DetailOrigin::Owner.back_url(RequestKind::Leave), MY_REQUESTS_PATH);
    }

    #[test]
    fn confirmation_copy_names_the_request_kind() {
        assert_eq!(
            decision_title(RequestKind::Leave, Decision::Approve),
            "Xác nhận duyệt yêu cầu nghỉ phép"
        );
        assert_eq!(
            decision_message(RequestKind::Overtime, Decision::Reject),
            "Bạn có chắc chắn muốn từ chối yêu cầu làm thêm giờ này không?"
        );
        assert_eq!(
            decision_success(RequestKind::Overtime, Decision::Approve),
            "Đã duyệt yêu cầu làm thêm giờ thành công!"
        );
        assert_eq!(delete_success(RequestKind::Overtime), "Đã xóa yêu cầu OT thành công!");
    }

    #[test]
    fn fields_render_display_values() {
        let fields = RequestDetail::Leave(leave("1", "EMP001", RequestStatus::Pending)).fields();
        assert!(fields.contains(&("Loại nghỉ", "Nghỉ phép năm".to_string())));
        assert!(fields.contains(&("Đến ngày", "13/08/2024".to_string())));
        assert!(fields.contains(&("Thời lượng", "Cả ngày".to_string())));

        let fields = RequestDetail::Overtime(overtime("2", "EMP002", RequestStatus::Approved)).fields();
        assert!(fields.contains(&("Từ", "18:00".to_string())));
        assert!(fields.contains(&("Số giờ", "2 giờ".to_string())));
        assert!(fields.contains(&("Ngày duyệt", "-".to_string())));
    }

    #[test]
    fn only_leave_requests_carry_attachments() {
        let mut request = leave("1", "EMP001", RequestStatus::Pending);
        request.file = Some("uploads/leave/giay-kham.pdf".into());
        assert_eq!(
            RequestDetail::Leave(request).attachment_name(),
            Some("giay-kham.pdf")
        );
        assert_eq!(
            RequestDetail::Overtime(overtime("2", "EMP002", RequestStatus::Pending)).attachment_name(),
            None
        );
    }

    #[test]
    fn terminal_requests_offer_no_actions() {
        let manager = user("MGR01", "MANAGER");
        let origin = DetailOrigin::approver_from_query(None, None, None);
        for status in [RequestStatus::Approved, RequestStatus::Rejected] {
            let detail = RequestDetail::Overtime(overtime("3", "EMP001", status));
            assert_eq!(
                detail_permissions(Some(&manager), &origin, &detail),
                DetailPermissions::default()
            );
        }
        let pending = RequestDetail::Overtime(overtime("3", "EMP001", RequestStatus::Pending));
        assert_eq!(
            detail_permissions(Some(&manager), &origin, &pending),
            DetailPermissions {
                approve: true,
                delete: false,
                edit_note: true,
            }
        );
    }

    #[test]
    fn approvers_cannot_decide_their_own_leave() {
        let manager = user("MGR01", "MANAGER");
        let origin = DetailOrigin::approver_from_query(None, None, None);
        let own = RequestDetail::Leave(leave("4", "MGR01", RequestStatus::Pending));
        assert!(!detail_permissions(Some(&manager), &origin, &own).approve);
        let own_ot = RequestDetail::Overtime(overtime("5", "MGR01", RequestStatus::Pending));
        assert!(detail_permissions(Some(&manager), &origin, &own_ot).approve);
    }

    #[test]
    fn owners_delete_only_pending_requests_from_their_view() {
        let employee = user("EMP001", "EMPLOYEE");
        let pending = RequestDetail::Leave(leave("6", "EMP001", RequestStatus::Pending));
        let approved = RequestDetail::Leave(leave("7", "EMP001", RequestStatus::Approved));
        let others = RequestDetail::Leave(leave("8", "EMP002", RequestStatus::Pending));
        let owner = DetailOrigin::Owner;
        assert!(detail_permissions(Some(&employee), &owner, &pending).delete);
        assert!(!detail_permissions(Some(&employee), &owner, &approved).delete);
        assert!(!detail_permissions(Some(&employee), &owner, &others).delete);
        assert!(!detail_permissions(None, &owner, &pending).delete);
    }
}
