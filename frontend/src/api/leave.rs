use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use super::{
    client::{path_segment, ApiClient, DEFAULT_FAILURE_MESSAGE},
    types::{ApiError, LeaveDuration, LeaveRequest, LeaveTypeOption, Page, RequestListQuery},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A validated leave request ready to be sent as multipart form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSubmission {
    pub employee_code: String,
    pub leave_type: String,
    pub is_paid_leave: bool,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub duration: LeaveDuration,
    pub reason: String,
    pub attachment: Option<Attachment>,
}

impl LeaveSubmission {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("employeeCode", self.employee_code.clone()),
            ("leaveType", self.leave_type.clone()),
            ("isPaidLeave", self.is_paid_leave.to_string()),
            ("fromDate", self.from_date.format("%Y-%m-%d").to_string()),
            ("toDate", self.to_date.format("%Y-%m-%d").to_string()),
            ("duration", self.duration.code().to_string()),
            ("reason", self.reason.clone()),
        ]
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in self.form_fields() {
            form = form.text(name, value);
        }
        if let Some(attachment) = self.attachment {
            let part = Part::bytes(attachment.bytes)
                .file_name(attachment.file_name)
                .mime_str(&attachment.mime_type)
                .map_err(|_| ApiError::validation("Tệp đính kèm không hợp lệ"))?;
            form = form.part("attachment", part);
        }
        Ok(form)
    }
}

pub(crate) fn leave_list_params(query: &RequestListQuery) -> Vec<(&'static str, String)> {
    vec![
        ("month", format!("{:02}", query.month)),
        ("year", query.year.to_string()),
        ("indexPage", query.page.to_string()),
        ("maxItems", query.size.to_string()),
        ("keyword", query.keyword.clone()),
    ]
}

impl ApiClient {
    pub async fn leave_options(&self) -> Result<Vec<LeaveTypeOption>, ApiError> {
        let fallback = "Không thể tải loại nghỉ phép";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/leave/options", base))
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn remaining_leave_by_type(&self, leave_type_code: &str) -> Result<f64, ApiError> {
        let fallback = "Không thể tải số ngày phép còn lại";
        let response = self
            .send(fallback, |client, base| {
                client
                    .get(format!("{}/api/leave/remaining-by-type", base))
                    .query(&[("leaveTypeCode", leave_type_code)])
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn remaining_leave(&self) -> Result<f64, ApiError> {
        let fallback = "Không thể tải số ngày phép còn lại";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/leave/remainingLeave", base))
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn submit_leave(&self, submission: LeaveSubmission) -> Result<(), ApiError> {
        let form = submission.into_form()?;
        let response = self
            .send(DEFAULT_FAILURE_MESSAGE, |client, base| {
                client
                    .post(format!("{}/api/leave/submit", base))
                    .multipart(form)
            })
            .await?;
        Self::map_empty_response(response, DEFAULT_FAILURE_MESSAGE).await
    }

    pub async fn my_leave_requests(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<LeaveRequest>, ApiError> {
        let fallback = "Không thể tải danh sách nghỉ phép";
        let response = self
            .send(fallback, |client, base| {
                client
                    .get(format!("{}/api/leave/myrequest", base))
                    .query(&[("page", page), ("size", size)])
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn all_leave_requests(
        &self,
        query: &RequestListQuery,
    ) -> Result<Page<LeaveRequest>, ApiError> {
        let fallback = "Không thể tải danh sách nghỉ phép";
        let params = leave_list_params(query);
        let response = self
            .send(fallback, |client, base| {
                client
                    .get(format!("{}/api/leave/all", base))
                    .query(&params)
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn leave_detail(&self, id: &str) -> Result<Option<LeaveRequest>, ApiError> {
        let fallback = "Không thể tải dữ liệu";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/leave/detail/{}", base, path_segment(id)))
            })
            .await?;
        Self::map_optional_json_response(response, fallback).await
    }

    pub async fn delete_my_leave(&self, id: &str) -> Result<(), ApiError> {
        let fallback = "Xóa yêu cầu nghỉ phép thất bại!";
        let response = self
            .send(fallback, |client, base| {
                client.delete(format!("{}/api/leave/myrequest/{}", base, path_segment(id)))
            })
            .await?;
        Self::map_empty_response(response, fallback).await
    }

    pub async fn approve_leave(&self, id: &str, note: &str) -> Result<(), ApiError> {
        self.decide_leave(id, "approve", note, "Không thể phê duyệt")
            .await
    }

    pub async fn reject_leave(&self, id: &str, note: &str) -> Result<(), ApiError> {
        self.decide_leave(id, "reject", note, "Không thể từ chối").await
    }

    async fn decide_leave(
        &self,
        id: &str,
        action: &str,
        note: &str,
        fallback: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .send(fallback, |client, base| {
                client
                    .put(format!("{}/api/leave/{}/{}", base, action, path_segment(id)))
                    .json(&json!({ "note": note }))
            })
            .await?;
        Self::map_empty_response(response, fallback).await
    }

    pub async fn leave_attachment(&self, file_name: &str) -> Result<Vec<u8>, ApiError> {
        let fallback = "Không thể tải file";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/leave/attachments/{}", base, path_segment(file_name)))
            })
            .await?;
        Self::map_bytes_response(response, fallback).await
    }
}
