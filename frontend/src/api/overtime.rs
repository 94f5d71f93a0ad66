use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::multipart::Form;
use serde::Deserialize;

use super::{
    client::{path_segment, ApiClient, DEFAULT_FAILURE_MESSAGE},
    types::{ApiError, OvertimeRequest, OvertimeSummary, Page, RequestListQuery},
};

pub const OVER_LIMIT_CODE: &str = "OT_OVER_LIMIT";
pub const CONFIRM_MARKER: &str = "CONFIRM";
pub const DEFAULT_OVER_LIMIT_MESSAGE: &str = "Vượt quá giới hạn OT. Bạn có muốn tiếp tục?";

/// A validated overtime request. Hours are whole hours on `ot_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeSubmission {
    pub ot_date: NaiveDate,
    pub from_hour: u32,
    pub to_hour: u32,
    pub reason: String,
}

impl OvertimeSubmission {
    fn at_hour(&self, hour: u32) -> String {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        NaiveDateTime::new(self.ot_date, time)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    pub fn form_fields(&self, confirm_over_limit: bool) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("otDate", self.ot_date.format("%Y-%m-%d").to_string()),
            ("fromTime", self.at_hour(self.from_hour)),
            ("toTime", self.at_hour(self.to_hour)),
            ("reason", self.reason.clone()),
        ];
        if confirm_over_limit {
            fields.push(("confirmOverLimit", "true".to_string()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OvertimeSubmitOutcome {
    Accepted,
    NeedsConfirmation { message: String },
}

#[derive(Deserialize)]
struct ConfirmationBody {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Classifies a successful submit response. Structured bodies are checked
/// first; any body carrying both markers still needs confirmation.
pub fn classify_submit_body(body: &str) -> OvertimeSubmitOutcome {
    let parsed = serde_json::from_str::<ConfirmationBody>(body).ok();
    if let Some(parsed) = &parsed {
        let structured = parsed.status.as_deref() == Some("NEEDS_CONFIRMATION")
            || (parsed.kind.as_deref() == Some(CONFIRM_MARKER)
                && parsed.code.as_deref() == Some(OVER_LIMIT_CODE));
        if structured {
            return OvertimeSubmitOutcome::NeedsConfirmation {
                message: non_empty_or_default(parsed.message.clone()),
            };
        }
    }
    if body.contains(OVER_LIMIT_CODE) && body.contains(CONFIRM_MARKER) {
        let message = match parsed {
            Some(parsed) => parsed.message,
            None => embedded_message(body),
        };
        return OvertimeSubmitOutcome::NeedsConfirmation {
            message: non_empty_or_default(message),
        };
    }
    OvertimeSubmitOutcome::Accepted
}

fn non_empty_or_default(message: Option<String>) -> String {
    message
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| DEFAULT_OVER_LIMIT_MESSAGE.to_string())
}

// Map.toString() style: {type=CONFIRM, code=OT_OVER_LIMIT, message=..., payload=...}
fn embedded_message(body: &str) -> Option<String> {
    let start = body.find("message=")? + "message=".len();
    let rest = &body[start..];
    let end = [", payload=", ", code=", ", type=", "}"]
        .iter()
        .filter_map(|terminator| rest.find(terminator))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

pub(crate) fn overtime_list_params(query: &RequestListQuery) -> Vec<(&'static str, String)> {
    vec![
        ("page", query.page.to_string()),
        ("size", query.size.to_string()),
        ("month", query.month.to_string()),
        ("year", query.year.to_string()),
        ("keyword", query.keyword.clone()),
    ]
}

impl ApiClient {
    pub async fn submit_overtime(
        &self,
        submission: &OvertimeSubmission,
        confirm_over_limit: bool,
    ) -> Result<OvertimeSubmitOutcome, ApiError> {
        let mut form = Form::new();
        for (name, value) in submission.form_fields(confirm_over_limit) {
            form = form.text(name, value);
        }
        let response = self
            .send(DEFAULT_FAILURE_MESSAGE, |client, base| {
                client
                    .post(format!("{}/api/overtime/submit", base))
                    .multipart(form)
            })
            .await?;
        let (status, body) = Self::read_text(response, DEFAULT_FAILURE_MESSAGE).await?;
        if status.is_success() {
            Ok(classify_submit_body(&body))
        } else {
            Err(Self::error_from_body(status, &body, DEFAULT_FAILURE_MESSAGE))
        }
    }

    pub async fn remaining_overtime_month(&self) -> Result<f64, ApiError> {
        let fallback = "Không thể tải số giờ OT còn lại";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/overtime/remaining-month", base))
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn overtime_summary(
        &self,
        employee_code: &str,
        year: i32,
    ) -> Result<OvertimeSummary, ApiError> {
        let fallback = "Không tìm thấy dữ liệu";
        let response = self
            .send(fallback, |client, base| {
                client
                    .get(format!("{}/api/overtime-balance/summary", base))
                    .query(&[("employeeCode", employee_code.to_string()), ("year", year.to_string())])
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn my_overtime_requests(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<OvertimeRequest>, ApiError> {
        let fallback = "Không thể tải danh sách OT";
        let response = self
            .send(fallback, |client, base| {
                client
                    .get(format!("{}/api/overtime/myrequest", base))
                    .query(&[("page", page), ("size", size)])
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn all_overtime_requests(
        &self,
        query: &RequestListQuery,
    ) -> Result<Page<OvertimeRequest>, ApiError> {
        let fallback = "Không thể tải danh sách OT";
        let params = overtime_list_params(query);
        let response = self
            .send(fallback, |client, base| {
                client
                    .get(format!("{}/api/overtime/all", base))
                    .query(&params)
            })
            .await?;
        Self::map_json_response(response, fallback).await
    }

    pub async fn overtime_detail(&self, id: &str) -> Result<Option<OvertimeRequest>, ApiError> {
        let fallback = "Không thể tải dữ liệu";
        let response = self
            .send(fallback, |client, base| {
                client.get(format!("{}/api/overtime/detail/{}", base, path_segment(id)))
            })
            .await?;
        Self::map_optional_json_response(response, fallback).await
    }

    pub async fn delete_my_overtime(&self, id: &str) -> Result<(), ApiError> {
        let fallback = "Xóa yêu cầu OT thất bại!";
        let response = self
            .send(fallback, |client, base| {
                client.delete(format!("{}/api/overtime/myrequest/{}", base, path_segment(id)))
            })
            .await?;
        Self::map_empty_response(response, fallback).await
    }

    pub async fn approve_overtime(&self, id: &str, note: &str) -> Result<(), ApiError> {
        self.decide_overtime(id, "approve", note, "Duyệt yêu cầu OT thất bại!")
            .await
    }

    pub async fn reject_overtime(&self, id: &str, note: &str) -> Result<(), ApiError> {
        self.decide_overtime(id, "reject", note, "Từ chối yêu cầu OT thất bại!")
            .await
    }

    async fn decide_overtime(
        &self,
        id: &str,
        action: &str,
        note: &str,
        fallback: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .send(fallback, |client, base| {
                client
                    .post(format!("{}/api/overtime/{}/{}", base, action, path_segment(id)))
                    .query(&[("note", note)])
            })
            .await?;
        Self::map_empty_response(response, fallback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> OvertimeSubmission {
        OvertimeSubmission {
            ot_date: NaiveDate::from_ymd_opt(2024, 8, 14).unwrap(),
            from_hour: 18,
            to_hour: 21,
            reason: "release".into(),
        }
    }

    #[test]
    fn form_fields_carry_full_timestamps() {
        let fields = submission().form_fields(false);
        assert!(fields.contains(&("otDate", "2024-08-14".to_string())));
        assert!(fields.contains(&("fromTime", "2024-08-14T18:00:00".to_string())));
        assert!(fields.contains(&("toTime", "2024-08-14T21:00:00".to_string())));
        assert!(!fields.iter().any(|(name, _)| *name == "confirmOverLimit"));
    }

    #[test]
    fn forced_submission_only_adds_the_confirmation_flag() {
        let plain = submission().form_fields(false);
        let forced = submission().form_fields(true);
        assert_eq!(forced.len(), plain.len() + 1);
        assert!(plain.iter().all(|field| forced.contains(field)));
        assert!(forced.contains(&("confirmOverLimit", "true".to_string())));
    }

    #[test]
    fn structured_confirmation_bodies_need_confirmation() {
        let envelope = r#"{"type":"CONFIRM","code":"OT_OVER_LIMIT","message":"Đã vượt 40 giờ OT trong tháng","payload":null}"#;
        assert_eq!(
            classify_submit_body(envelope),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: "Đã vượt 40 giờ OT trong tháng".into()
            }
        );

        let status = r#"{"status":"NEEDS_CONFIRMATION","message":""}"#;
        assert_eq!(
            classify_submit_body(status),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: DEFAULT_OVER_LIMIT_MESSAGE.into()
            }
        );
    }

    #[test]
    fn plain_text_markers_are_still_detected() {
        let body = "{type=CONFIRM, code=OT_OVER_LIMIT, message=Vượt quá 12 giờ OT/tuần, payload={}}";
        assert_eq!(
            classify_submit_body(body),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: "Vượt quá 12 giờ OT/tuần".into()
            }
        );
        assert_eq!(
            classify_submit_body("OT_OVER_LIMIT CONFIRM"),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: DEFAULT_OVER_LIMIT_MESSAGE.into()
            }
        );
    }

    #[test]
    fn json_bodies_with_markers_in_other_keys_need_confirmation() {
        let result_key = r#"{"result":"CONFIRM","code":"OT_OVER_LIMIT","message":"Vượt 40 giờ"}"#;
        assert_eq!(
            classify_submit_body(result_key),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: "Vượt 40 giờ".into()
            }
        );

        let in_message = r#"{"message":"OT_OVER_LIMIT: please CONFIRM"}"#;
        assert_eq!(
            classify_submit_body(in_message),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: "OT_OVER_LIMIT: please CONFIRM".into()
            }
        );

        let no_message = r#"{"flags":["OT_OVER_LIMIT","CONFIRM"]}"#;
        assert_eq!(
            classify_submit_body(no_message),
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: DEFAULT_OVER_LIMIT_MESSAGE.into()
            }
        );
    }

    #[test]
    fn ordinary_bodies_are_accepted() {
        assert_eq!(classify_submit_body(""), OvertimeSubmitOutcome::Accepted);
        assert_eq!(
            classify_submit_body("Gửi yêu cầu OT thành công"),
            OvertimeSubmitOutcome::Accepted
        );
        assert_eq!(
            classify_submit_body(r#"{"id":5,"status":"PENDING"}"#),
            OvertimeSubmitOutcome::Accepted
        );
        // A single marker is not enough.
        assert_eq!(
            classify_submit_body("OT_OVER_LIMIT"),
            OvertimeSubmitOutcome::Accepted
        );
    }

    #[test]
    fn list_params_use_page_and_size() {
        let params = overtime_list_params(&RequestListQuery {
            year: 2024,
            month: 8,
            page: 0,
            size: 10,
            keyword: String::new(),
        });
        assert!(params.contains(&("page", "0".to_string())));
        assert!(params.contains(&("size", "10".to_string())));
        assert!(params.contains(&("month", "8".to_string())));
    }
}
