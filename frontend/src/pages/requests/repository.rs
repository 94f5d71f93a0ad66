use crate::api::{
    ApiClient, ApiError, LeaveRequest, LeaveSubmission, LeaveTypeOption, OvertimeRequest,
    OvertimeSubmission, OvertimeSubmitOutcome, OvertimeSummary, Page, RequestKind, RequestListQuery,
};
use std::rc::Rc;

/// One approve/reject call, carrying the approver's note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Clone)]
pub struct RequestsRepository {
    client: Rc<ApiClient>,
}

impl RequestsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn leave_options(&self) -> Result<Vec<LeaveTypeOption>, ApiError> {
        self.client.leave_options().await
    }

    pub async fn remaining_leave(&self, leave_type: &str) -> Result<f64, ApiError> {
        self.client.remaining_leave_by_type(leave_type).await
    }

    pub async fn remaining_leave_total(&self) -> Result<f64, ApiError> {
        self.client.remaining_leave().await
    }

    pub async fn remaining_overtime(&self) -> Result<f64, ApiError> {
        self.client.remaining_overtime_month().await
    }

    pub async fn submit_leave(&self, submission: LeaveSubmission) -> Result<(), ApiError> {
        self.client.submit_leave(submission).await
    }

    pub async fn submit_overtime(
        &self,
        submission: &OvertimeSubmission,
        confirm_over_limit: bool,
    ) -> Result<OvertimeSubmitOutcome, ApiError> {
        self.client
            .submit_overtime(submission, confirm_over_limit)
            .await
    }

    pub async fn overtime_summary(
        &self,
        employee_code: &str,
        year: i32,
    ) -> Result<OvertimeSummary, ApiError> {
        self.client.overtime_summary(employee_code, year).await
    }

    pub async fn my_leaves(&self, page: u32, size: u32) -> Result<Page<LeaveRequest>, ApiError> {
        self.client.my_leave_requests(page, size).await
    }

    pub async fn my_overtime(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<OvertimeRequest>, ApiError> {
        self.client.my_overtime_requests(page, size).await
    }

    pub async fn all_leaves(&self, query: &RequestListQuery) -> Result<Page<LeaveRequest>, ApiError> {
        self.client.all_leave_requests(query).await
    }

    pub async fn all_overtime(
        &self,
        query: &RequestListQuery,
    ) -> Result<Page<OvertimeRequest>, ApiError> {
        self.client.all_overtime_requests(query).await
    }

    pub async fn leave_detail(&self, id: &str) -> Result<Option<LeaveRequest>, ApiError> {
        self.client.leave_detail(id).await
    }

    pub async fn overtime_detail(&self, id: &str) -> Result<Option<OvertimeRequest>, ApiError> {
        self.client.overtime_detail(id).await
    }

    pub async fn decide(
        &self,
        kind: RequestKind,
        decision: Decision,
        id: &str,
        note: &str,
    ) -> Result<(), ApiError> {
        match (kind, decision) {
            (RequestKind::Leave, Decision::Approve) => self.client.approve_leave(id, note).await,
            (RequestKind::Leave, Decision::Reject) => self.client.reject_leave(id, note).await,
            (RequestKind::Overtime, Decision::Approve) => {
                self.client.approve_overtime(id, note).await
            }
            (RequestKind::Overtime, Decision::Reject) => {
                self.client.reject_overtime(id, note).await
            }
        }
    }

    pub async fn delete_own(&self, kind: RequestKind, id: &str) -> Result<(), ApiError> {
        match kind {
            RequestKind::Leave => self.client.delete_my_leave(id).await,
            RequestKind::Overtime => self.client.delete_my_overtime(id).await,
        }
    }

    pub async fn leave_attachment(&self, file_name: &str) -> Result<Vec<u8>, ApiError> {
        self.client.leave_attachment(file_name).await
    }
}
