#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{LeaveRequest, OvertimeRequest, RequestStatus, SessionUser};
    use crate::state::session::SessionContext;
    use chrono::NaiveDate;

    pub fn user(code: &str, role: &str) -> SessionUser {
        SessionUser {
            employee_code: code.into(),
            full_name: Some(format!("Nhân viên {}", code)),
            role: role.into(),
        }
    }

    pub fn session_with_role(code: &str, role: &str) -> SessionContext {
        SessionContext::new(Some(format!("token-{}", code)), Some(user(code, role)))
    }

    pub fn leave(id: &str, owner: &str, status: RequestStatus) -> LeaveRequest {
        LeaveRequest {
            id: id.into(),
            employee_code: owner.into(),
            full_name: Some("Nguyễn Văn A".into()),
            from_date: date(2024, 8, 12),
            to_date: Some(date(2024, 8, 13)),
            leave_type_code: "annual".into(),
            status,
            file: None,
            reason: Some("việc gia đình".into()),
            note: None,
            duration: Some("FULL_DAY".into()),
            is_paid_leave: Some(true),
            approval_date: None,
            create_date: Some("2024-08-01".into()),
        }
    }

    pub fn overtime(id: &str, owner: &str, status: RequestStatus) -> OvertimeRequest {
        let day = date(2024, 8, 12);
        OvertimeRequest {
            id: id.into(),
            employee_code: owner.into(),
            full_name: Some("Trần Thị B".into()),
            ot_date: day,
            from_time: day.and_hms_opt(18, 0, 0).unwrap(),
            to_time: day.and_hms_opt(20, 0, 0).unwrap(),
            worked_time: Some(2.0),
            reason: Some("chạy báo cáo".into()),
            day_type_id: Some(1),
            status,
            created_date_ot: Some("2024-08-10".into()),
            approved_date_ot: None,
            note: None,
        }
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}
