use leptos::*;
use leptos_router::*;

use crate::{
    api::RequestKind,
    pages::{
        leave_request::LeaveRequestPage, my_requests::MyRequestsPage,
        overtime_request::OvertimeRequestPage, request_approvals::RequestApprovalsPage,
        request_detail::{ApprovalDetailPage, OwnDetailPage},
    },
    state::{notifications::provide_notifications, session::SessionProvider},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/employee/request",
    "/employee/request/leave-request",
    "/employee/request/ot-request",
    "/employee/request/leave-detail",
    "/employee/request/ot-detail",
    "/manager/requests/leaves",
    "/manager/requests/leaves/approval",
    "/manager/requests/overtime",
    "/manager/requests/overtime/approval",
];

pub const APPROVER_ROUTE_PATHS: &[&str] = &[
    "/manager/requests/leaves",
    "/manager/requests/leaves/approval",
    "/manager/requests/overtime",
    "/manager/requests/overtime/approval",
];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_notifications();
    view! {
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path="/" view=MyRequestsPage/>
                    <Route path="/employee/request" view=MyRequestsPage/>
                    <Route path="/employee/request/leave-request" view=ProtectedLeaveForm/>
                    <Route path="/employee/request/ot-request" view=ProtectedOvertimeForm/>
                    <Route path="/employee/request/leave-detail" view=OwnLeaveDetail/>
                    <Route path="/employee/request/ot-detail" view=OwnOvertimeDetail/>
                    <Route path="/manager/requests/leaves" view=LeaveApprovals/>
                    <Route path="/manager/requests/leaves/approval" view=LeaveApprovalDetail/>
                    <Route path="/manager/requests/overtime" view=OvertimeApprovals/>
                    <Route path="/manager/requests/overtime/approval" view=OvertimeApprovalDetail/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[component]
fn ProtectedLeaveForm() -> impl IntoView {
    view! { <crate::components::guard::RequireSession><LeaveRequestPage/></crate::components::guard::RequireSession> }
}

#[component]
fn ProtectedOvertimeForm() -> impl IntoView {
    view! { <crate::components::guard::RequireSession><OvertimeRequestPage/></crate::components::guard::RequireSession> }
}

#[component]
fn OwnLeaveDetail() -> impl IntoView {
    view! { <OwnDetailPage kind=RequestKind::Leave/> }
}

#[component]
fn OwnOvertimeDetail() -> impl IntoView {
    view! { <OwnDetailPage kind=RequestKind::Overtime/> }
}

#[component]
fn LeaveApprovals() -> impl IntoView {
    view! { <RequestApprovalsPage kind=RequestKind::Leave/> }
}

#[component]
fn OvertimeApprovals() -> impl IntoView {
    view! { <RequestApprovalsPage kind=RequestKind::Overtime/> }
}

#[component]
fn LeaveApprovalDetail() -> impl IntoView {
    view! { <ApprovalDetailPage kind=RequestKind::Leave/> }
}

#[component]
fn OvertimeApprovalDetail() -> impl IntoView {
    view! { <ApprovalDetailPage kind=RequestKind::Overtime/> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::requests::types::{
        approval_path, approver_list_path, own_detail_path, LEAVE_FORM_PATH, MY_REQUESTS_PATH,
        OVERTIME_FORM_PATH,
    };
    use std::collections::HashSet;

    #[test]
    fn every_linked_path_is_routed() {
        let mut linked = vec![MY_REQUESTS_PATH, LEAVE_FORM_PATH, OVERTIME_FORM_PATH];
        for kind in [RequestKind::Leave, RequestKind::Overtime] {
            linked.extend([approver_list_path(kind), approval_path(kind), own_detail_path(kind)]);
        }
        for path in linked {
            assert!(ROUTE_PATHS.contains(&path), "unrouted path: {}", path);
        }
    }

    #[test]
    fn approver_routes_are_subset_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in APPROVER_ROUTE_PATHS {
            assert!(all.contains(path), "approver path missing from ROUTE_PATHS: {}", path);
            assert!(path.starts_with("/manager/"));
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
