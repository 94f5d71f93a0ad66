use super::utils::OvertimeForm;
use crate::api::{ApiError, OvertimeSubmission, OvertimeSubmitOutcome};
use crate::pages::requests::repository::RequestsRepository;
use crate::state::{
    notifications::{use_notifications, Notifications},
    session::use_api_client,
};
use crate::utils::lifetime::MountGuard;
use leptos::*;

pub const SUBMIT_SUCCESS: &str = "Gửi yêu cầu OT thành công";
pub const CONFIRM_MESSAGE: &str = "Bạn có chắc chắn muốn gửi yêu cầu làm thêm giờ này không?";
pub const OVER_LIMIT_TITLE: &str = "Xác nhận vượt giới hạn OT";

/// One submit attempt. `forced` marks the resend that accepts the over-limit
/// warning; its answer is final.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAttempt {
    pub submission: OvertimeSubmission,
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    pub attempt: SubmitAttempt,
    pub result: Result<OvertimeSubmitOutcome, ApiError>,
}

#[derive(Clone, Copy)]
pub struct OvertimeRequestViewModel {
    pub form: RwSignal<OvertimeForm>,
    pub confirm_open: RwSignal<bool>,
    /// Message of the pending over-limit warning, if one is shown.
    pub over_limit: RwSignal<Option<String>>,
    pub awaiting_force: RwSignal<Option<OvertimeSubmission>>,
    pub submit_action: Action<SubmitAttempt, Option<SubmitReport>>,
    notifications: Notifications,
    guard: MountGuard,
}

fn failure_message(reason: &str) -> String {
    format!("Gửi yêu cầu OT thất bại: {}", reason)
}

fn apply_submit_click(
    form: &OvertimeForm,
    confirm_open: RwSignal<bool>,
    notifications: Notifications,
) -> bool {
    match form.validate() {
        Ok(_) => {
            confirm_open.set(true);
            true
        }
        Err(err) => {
            notifications.error(err.to_string(), 4000);
            false
        }
    }
}

/// A first over-limit answer parks the exact payload and asks again. The
/// forced resend's answer is shown as is.
fn apply_optional_submit_report(
    report: Option<SubmitReport>,
    form: RwSignal<OvertimeForm>,
    over_limit: RwSignal<Option<String>>,
    awaiting_force: RwSignal<Option<OvertimeSubmission>>,
    notifications: Notifications,
) {
    let Some(SubmitReport { attempt, result }) = report else {
        return;
    };
    match result {
        Ok(OvertimeSubmitOutcome::NeedsConfirmation { message }) if !attempt.forced => {
            awaiting_force.set(Some(attempt.submission));
            over_limit.set(Some(message));
        }
        Ok(OvertimeSubmitOutcome::NeedsConfirmation { message }) => {
            log::warn!("forced overtime submission still over limit");
            awaiting_force.set(None);
            notifications.error(failure_message(&message), 5000);
        }
        Ok(OvertimeSubmitOutcome::Accepted) => {
            awaiting_force.set(None);
            over_limit.set(None);
            form.set(OvertimeForm::default());
            notifications.success(SUBMIT_SUCCESS, 3000);
        }
        Err(err) => {
            awaiting_force.set(None);
            notifications.error(failure_message(&err.error), 5000);
        }
    }
}

impl OvertimeRequestViewModel {
    pub fn new() -> Self {
        let repository = store_value(RequestsRepository::new(use_api_client()));
        let notifications = use_notifications();
        let guard = MountGuard::attach();

        let form = create_rw_signal(OvertimeForm::default());
        let confirm_open = create_rw_signal(false);
        let over_limit = create_rw_signal(None::<String>);
        let awaiting_force = create_rw_signal(None::<OvertimeSubmission>);

        let submit_action = create_action(move |attempt: &SubmitAttempt| {
            let repo = repository.get_value();
            let attempt = attempt.clone();
            async move {
                let result = repo
                    .submit_overtime(&attempt.submission, attempt.forced)
                    .await;
                guard.run("overtime submission", || SubmitReport { attempt, result })
            }
        });

        create_effect(move |_| {
            apply_optional_submit_report(
                submit_action.value().get().flatten(),
                form,
                over_limit,
                awaiting_force,
                notifications,
            );
        });

        Self {
            form,
            confirm_open,
            over_limit,
            awaiting_force,
            submit_action,
            notifications,
            guard,
        }
    }

    pub fn on_submit_click(&self) -> impl Fn(()) + Copy + 'static {
        let form = self.form;
        let confirm_open = self.confirm_open;
        let notifications = self.notifications;
        move |_| {
            form.with_untracked(|form| apply_submit_click(form, confirm_open, notifications));
        }
    }

    pub fn on_confirm(&self) -> impl Fn(()) + Copy + 'static {
        let form = self.form;
        let confirm_open = self.confirm_open;
        let submit_action = self.submit_action;
        let notifications = self.notifications;
        let guard = self.guard;
        move |_| {
            confirm_open.set(false);
            if !guard.is_alive() || submit_action.pending().get_untracked() {
                return;
            }
            match form.with_untracked(OvertimeForm::validate) {
                Ok(submission) => submit_action.dispatch(SubmitAttempt {
                    submission,
                    forced: false,
                }),
                Err(err) => {
                    notifications.error(err.to_string(), 4000);
                }
            }
        }
    }

    pub fn on_cancel(&self) -> impl Fn(()) + Copy + 'static {
        let confirm_open = self.confirm_open;
        move |_| confirm_open.set(false)
    }

    /// Resends the parked payload with the over-limit flag set.
    pub fn on_accept_over_limit(&self) -> impl Fn(()) + Copy + 'static {
        let over_limit = self.over_limit;
        let awaiting_force = self.awaiting_force;
        let submit_action = self.submit_action;
        let guard = self.guard;
        move |_| {
            over_limit.set(None);
            if !guard.is_alive() {
                return;
            }
            if let Some(submission) = awaiting_force.get_untracked() {
                submit_action.dispatch(SubmitAttempt {
                    submission,
                    forced: true,
                });
            }
        }
    }

    pub fn on_decline_over_limit(&self) -> impl Fn(()) + Copy + 'static {
        let over_limit = self.over_limit;
        let awaiting_force = self.awaiting_force;
        move |_| {
            over_limit.set(None);
            awaiting_force.set(None);
        }
    }

    pub fn on_reset(&self) -> impl Fn(()) + Copy + 'static {
        let form = self.form;
        move |_| form.set(OvertimeForm::default())
    }

    /// Updates the start hour and warns early about weekday starts before 17h.
    pub fn set_from_hour(&self, hour: Option<u32>) {
        self.form.update(|form| form.from_hour = hour);
        if self.form.with_untracked(OvertimeForm::early_weekday_start) {
            self.notifications.error(
                super::utils::OvertimeValidationError::WeekdayBeforeEvening.to_string(),
                3000,
            );
        }
    }
}

pub fn use_overtime_request_view_model() -> OvertimeRequestViewModel {
    match use_context::<OvertimeRequestViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = OvertimeRequestViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::ApiClient;
    use crate::state::notifications::{provide_notifications, NotificationStatus};
    use crate::test_support::{helpers::date, ssr::with_runtime};
    use serde_json::json;

    fn filled() -> OvertimeForm {
        OvertimeForm {
            ot_date: "2024-08-12".into(),
            from_hour: Some(18),
            to_hour: Some(21),
            reason: "chốt sổ".into(),
        }
    }

    fn submission() -> OvertimeSubmission {
        OvertimeSubmission {
            ot_date: date(2024, 8, 12),
            from_hour: 18,
            to_hour: 21,
            reason: "chốt sổ".into(),
        }
    }

    fn report(forced: bool, result: Result<OvertimeSubmitOutcome, ApiError>) -> Option<SubmitReport> {
        Some(SubmitReport {
            attempt: SubmitAttempt {
                submission: submission(),
                forced,
            },
            result,
        })
    }

    #[test]
    fn weekday_morning_start_is_blocked_before_network() {
        with_runtime(|| {
            let notifications = provide_notifications();
            let confirm_open = create_rw_signal(false);
            let mut form = filled();
            form.from_hour = Some(9);
            assert!(!apply_submit_click(&form, confirm_open, notifications));
            assert!(!confirm_open.get());
            assert_eq!(
                notifications.snapshot().last().map(|n| n.message.clone()),
                Some("OT ngày thường phải bắt đầu từ 17 giờ trở đi".to_string())
            );

            form.from_hour = Some(21);
            assert!(!apply_submit_click(&form, confirm_open, notifications));
            assert_eq!(
                notifications.snapshot().last().map(|n| n.message.clone()),
                Some("Giờ bắt đầu phải nhỏ hơn giờ kết thúc".to_string())
            );
        });
    }

    #[test]
    fn over_limit_asks_again_without_any_success_toast() {
        with_runtime(|| {
            let notifications = provide_notifications();
            let form = create_rw_signal(filled());
            let over_limit = create_rw_signal(None::<String>);
            let awaiting_force = create_rw_signal(None::<OvertimeSubmission>);

            apply_optional_submit_report(
                report(
                    false,
                    Ok(OvertimeSubmitOutcome::NeedsConfirmation {
                        message: "Vượt 40 giờ OT trong tháng".into(),
                    }),
                ),
                form,
                over_limit,
                awaiting_force,
                notifications,
            );
            assert_eq!(over_limit.get(), Some("Vượt 40 giờ OT trong tháng".to_string()));
            assert_eq!(awaiting_force.get(), Some(submission()));
            assert!(notifications.snapshot().is_empty());
            assert_eq!(form.get(), filled());

            apply_optional_submit_report(
                report(true, Ok(OvertimeSubmitOutcome::Accepted)),
                form,
                over_limit,
                awaiting_force,
                notifications,
            );
            let queue = notifications.snapshot();
            assert_eq!(queue.len(), 1);
            assert_eq!(queue.entries()[0].status, NotificationStatus::Ok);
            assert_eq!(queue.entries()[0].message, SUBMIT_SUCCESS);
            assert_eq!(form.get(), OvertimeForm::default());
            assert!(awaiting_force.get().is_none());
        });
    }

    #[test]
    fn repeated_over_limit_on_forced_resend_is_an_error() {
        with_runtime(|| {
            let notifications = provide_notifications();
            let form = create_rw_signal(filled());
            let over_limit = create_rw_signal(None::<String>);
            let awaiting_force = create_rw_signal(Some(submission()));
            apply_optional_submit_report(
                report(
                    true,
                    Ok(OvertimeSubmitOutcome::NeedsConfirmation {
                        message: "Vẫn vượt giới hạn".into(),
                    }),
                ),
                form,
                over_limit,
                awaiting_force,
                notifications,
            );
            assert!(over_limit.get().is_none());
            assert!(awaiting_force.get().is_none());
            let last = notifications.snapshot().last().cloned().unwrap();
            assert_eq!(last.status, NotificationStatus::Error);
            assert_eq!(last.message, "Gửi yêu cầu OT thất bại: Vẫn vượt giới hạn");
        });
    }

    #[test]
    fn server_failure_keeps_the_form() {
        with_runtime(|| {
            let notifications = provide_notifications();
            let form = create_rw_signal(filled());
            let over_limit = create_rw_signal(None::<String>);
            let awaiting_force = create_rw_signal(None::<OvertimeSubmission>);
            apply_optional_submit_report(
                report(false, Err(ApiError::new("HTTP_409", "Trùng thời gian OT"))),
                form,
                over_limit,
                awaiting_force,
                notifications,
            );
            assert_eq!(form.get(), filled());
            let last = notifications.snapshot().last().cloned().unwrap();
            assert_eq!(last.message, "Gửi yêu cầu OT thất bại: Trùng thời gian OT");
            assert_eq!(last.duration.as_millis(), 5000);
        });
    }

    #[test]
    fn early_start_warning_fires_while_typing() {
        with_runtime(|| {
            provide_context(ApiClient::new_with_base_url("http://localhost:1"));
            let vm = OvertimeRequestViewModel::new();
            vm.form.update(|form| form.ot_date = "2024-08-12".into());
            vm.set_from_hour(Some(18));
            assert!(vm.notifications.snapshot().is_empty());
            vm.set_from_hour(Some(10));
            let last = vm.notifications.snapshot().last().cloned().unwrap();
            assert_eq!(last.duration.as_millis(), 3000);
        });
    }

    #[tokio::test]
    async fn forced_resend_reaches_the_server_twice() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/overtime/submit");
            then.status(200)
                .json_body(json!({
                    "type": "CONFIRM",
                    "code": "OT_OVER_LIMIT",
                    "message": "Vượt giới hạn OT tháng"
                }))
                .once();
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/overtime/submit");
            then.status(200).json_body(json!({ "id": 12 }));
        });
        let repo = RequestsRepository::new(ApiClient::new_with_base_url(server.base_url()));
        let first = repo.submit_overtime(&submission(), false).await.unwrap();
        assert_eq!(
            first,
            OvertimeSubmitOutcome::NeedsConfirmation {
                message: "Vượt giới hạn OT tháng".into()
            }
        );
        let second = repo.submit_overtime(&submission(), true).await.unwrap();
        assert_eq!(second, OvertimeSubmitOutcome::Accepted);
        assert_eq!(server.hits(POST, "/api/overtime/submit"), 2);
    }
}
