use super::utils::LeaveForm;
use crate::api::{ApiError, LeaveSubmission, LeaveTypeOption};
use crate::pages::requests::{
    repository::RequestsRepository,
    types::{builtin_leave_types, shows_balance},
};
use crate::state::{
    notifications::{use_notifications, Notifications},
    session::{use_api_client, use_session},
};
use crate::utils::lifetime::MountGuard;
use leptos::*;

pub const SUBMIT_SUCCESS: &str = "Gửi yêu cầu nghỉ phép thành công";
pub const CONFIRM_MESSAGE: &str = "Bạn có chắc chắn muốn gửi yêu cầu nghỉ phép này không?";

#[derive(Clone, Copy)]
pub struct LeaveRequestViewModel {
    pub form: RwSignal<LeaveForm>,
    pub confirm_open: RwSignal<bool>,
    pub options_resource: Resource<(), Result<Vec<LeaveTypeOption>, ApiError>>,
    pub balance_resource: Resource<String, Option<Result<f64, ApiError>>>,
    pub submit_action: Action<LeaveSubmission, Option<Result<(), ApiError>>>,
    notifications: Notifications,
    guard: MountGuard,
}

/// Server options when available and non-empty, the built-in list otherwise.
fn resolve_leave_options(
    result: Option<Result<Vec<LeaveTypeOption>, ApiError>>,
) -> Vec<LeaveTypeOption> {
    match result {
        Some(Ok(options)) if !options.is_empty() => options,
        Some(Err(err)) => {
            log::warn!("leave type options unavailable: {}", err);
            builtin_leave_types()
        }
        _ => builtin_leave_types(),
    }
}

/// Validation failures never reach the network.
fn apply_submit_click(
    form: &LeaveForm,
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

fn apply_optional_submit_result(
    result: Option<Result<(), ApiError>>,
    form: RwSignal<LeaveForm>,
    notifications: Notifications,
) {
    if let Some(result) = result {
        match result {
            Ok(()) => {
                notifications.success(SUBMIT_SUCCESS, 3000);
                form.update(LeaveForm::reset_after_submit);
            }
            Err(err) => {
                notifications.error(format!("Gửi yêu cầu thất bại: {}", err.error), 5000);
            }
        }
    }
}

impl LeaveRequestViewModel {
    pub fn new() -> Self {
        let session = use_session();
        let repository = store_value(RequestsRepository::new(use_api_client()));
        let notifications = use_notifications();
        let guard = MountGuard::attach();

        let form = create_rw_signal(LeaveForm::new(session.employee_code()));
        let confirm_open = create_rw_signal(false);

        let options_resource = create_resource(
            || (),
            move |_| {
                let repo = repository.get_value();
                async move { repo.leave_options().await }
            },
        );

        let balance_resource = create_resource(
            move || form.with(|form| form.leave_type.clone()),
            move |leave_type: String| {
                let repo = repository.get_value();
                async move {
                    if shows_balance(&leave_type) {
                        Some(repo.remaining_leave(&leave_type).await)
                    } else {
                        None
                    }
                }
            },
        );

        let submit_action = create_action(move |submission: &LeaveSubmission| {
            let repo = repository.get_value();
            let submission = submission.clone();
            async move {
                let result = repo.submit_leave(submission).await;
                guard.run("leave submission", || result)
            }
        });

        create_effect(move |_| {
            apply_optional_submit_result(submit_action.value().get().flatten(), form, notifications);
        });

        Self {
            form,
            confirm_open,
            options_resource,
            balance_resource,
            submit_action,
            notifications,
            guard,
        }
    }

    pub fn options(&self) -> Signal<Vec<LeaveTypeOption>> {
        let resource = self.options_resource;
        Signal::derive(move || resolve_leave_options(resource.get()))
    }

    pub fn balance_visible(&self) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|form| shows_balance(&form.leave_type)))
    }

    pub fn remaining_days(&self) -> Signal<Option<f64>> {
        let resource = self.balance_resource;
        Signal::derive(move || resource.get().flatten().and_then(|result| result.ok()))
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
            match form.with_untracked(LeaveForm::validate) {
                Ok(submission) => submit_action.dispatch(submission),
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

    pub fn on_reset(&self) -> impl Fn(()) + Copy + 'static {
        let form = self.form;
        move |_| form.update(LeaveForm::reset_after_submit)
    }

    pub fn attach_file(&self, file: Option<web_sys::File>) {
        let form = self.form;
        let notifications = self.notifications;
        let guard = self.guard;
        let Some(file) = file else {
            form.update(|form| form.attachment = None);
            return;
        };
        spawn_local(async move {
            let result = super::utils::read_attachment(file).await;
            guard.run("attachment read", || match result {
                Ok(attachment) => form.update(|form| form.attachment = Some(attachment)),
                Err(message) => {
                    notifications.error(message, 4000);
                }
            });
        });
    }
}

pub fn use_leave_request_view_model() -> LeaveRequestViewModel {
    match use_context::<LeaveRequestViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = LeaveRequestViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
