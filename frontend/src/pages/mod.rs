pub mod leave_request;
pub mod my_requests;
pub mod overtime_request;
pub mod request_approvals;
pub mod request_detail;
pub mod requests;
