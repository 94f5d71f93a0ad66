use crate::api::{LeaveRequest, OvertimeRequest, RequestKind, RequestStatus, SessionUser};
use crate::state::session::Role;

/// The parts of a request that decide who may act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFacts<'a> {
    pub kind: RequestKind,
    pub status: RequestStatus,
    pub owner_code: &'a str,
    pub note: Option<&'a str>,
}

impl<'a> From<&'a LeaveRequest> for RequestFacts<'a> {
    fn from(request: &'a LeaveRequest) -> Self {
        Self {
            kind: RequestKind::Leave,
            status: request.status,
            owner_code: &request.employee_code,
            note: request.note.as_deref(),
        }
    }
}

impl<'a> From<&'a OvertimeRequest> for RequestFacts<'a> {
    fn from(request: &'a OvertimeRequest) -> Self {
        Self {
            kind: RequestKind::Overtime,
            status: request.status,
            owner_code: &request.employee_code,
            note: request.note.as_deref(),
        }
    }
}

fn role_of(user: &SessionUser) -> Role {
    Role::parse(&user.role)
}

/// Approvers may decide PENDING requests. Leave requests cannot be
/// self-approved.
pub fn can_approve(user: Option<&SessionUser>, request: RequestFacts<'_>) -> bool {
    let Some(user) = user else {
        return false;
    };
    if request.status != RequestStatus::Pending || !role_of(user).is_approver() {
        return false;
    }
    match request.kind {
        RequestKind::Leave => user.employee_code != request.owner_code,
        RequestKind::Overtime => true,
    }
}

pub fn can_delete(user: Option<&SessionUser>, request: RequestFacts<'_>) -> bool {
    user.map(|user| {
        request.status == RequestStatus::Pending && user.employee_code == request.owner_code
    })
    .unwrap_or(false)
}

pub fn can_edit_note(request: RequestFacts<'_>) -> bool {
    request.status == RequestStatus::Pending
        && request.note.map(|note| note.trim().is_empty()).unwrap_or(true)
}
