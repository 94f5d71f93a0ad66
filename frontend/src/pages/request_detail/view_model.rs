use super::utils::{
    decision_success, delete_success, detail_permissions, DetailOrigin, DetailPermissions,
    DetailState, PendingNavigation, RequestDetail, MISSING_ID,
};
use crate::api::{ApiError, RequestKind, SessionUser};
use crate::pages::requests::repository::{Decision, RequestsRepository};
use crate::state::{
    notifications::{use_notifications, Notifications},
    session::{use_api_client, use_session},
};
use crate::utils::{lifetime::MountGuard, timer};
use leptos::*;

type DetailResult = Result<Option<RequestDetail>, ApiError>;

#[derive(Clone, Copy)]
pub struct RequestDetailViewModel {
    pub kind: RequestKind,
    pub id: StoredValue<Option<String>>,
    pub origin: StoredValue<DetailOrigin>,
    user: StoredValue<Option<SessionUser>>,
    /// `None` inside when there is no id to load.
    pub detail_resource: Resource<Option<String>, Option<DetailResult>>,
    pub note: RwSignal<String>,
    /// The decision whose confirmation dialog is open.
    pub decision_prompt: RwSignal<Option<Decision>>,
    pub delete_open: RwSignal<bool>,
    pub decide_action: Action<(Decision, String), Option<Result<Decision, ApiError>>>,
    pub delete_action: Action<(), Option<Result<(), ApiError>>>,
    pub attachment_action: Action<String, Option<Result<(String, Vec<u8>), ApiError>>>,
    notifications: Notifications,
    guard: MountGuard,
}

fn apply_optional_decision_result(
    result: Option<Result<Decision, ApiError>>,
    kind: RequestKind,
    origin: &DetailOrigin,
    notifications: Notifications,
) -> Option<PendingNavigation> {
    match result? {
        Ok(decision) => {
            notifications.success(decision_success(kind, decision), 3000);
            Some(PendingNavigation::after_success(origin.back_url(kind)))
        }
        Err(err) => {
            log::warn!("decision on {:?} request failed: {}", kind, err);
            notifications.error(err.error, 5000);
            None
        }
    }
}

fn apply_optional_delete_result(
    result: Option<Result<(), ApiError>>,
    kind: RequestKind,
    notifications: Notifications,
) -> Option<PendingNavigation> {
    match result? {
        Ok(()) => {
            notifications.success(delete_success(kind), 3000);
            Some(PendingNavigation::after_success(
                DetailOrigin::Owner.back_url(kind),
            ))
        }
        Err(err) => {
            notifications.error(err.error, 5000);
            None
        }
    }
}

fn apply_optional_attachment_result(
    result: Option<Result<(String, Vec<u8>), ApiError>>,
    notifications: Notifications,
    open: impl FnOnce(&str, &[u8]) -> Result<(), String>,
) {
    match result {
        Some(Ok((file_name, bytes))) => {
            if let Err(message) = open(&file_name, &bytes) {
                log::error!("cannot open attachment {}: {}", file_name, message);
                notifications.error("Không thể mở tệp đính kèm", 4000);
            }
        }
        Some(Err(err)) => {
            notifications.error(err.error, 4000);
        }
        None => {}
    }
}

/// Runs the navigation after its delay unless the view is gone by then.
fn schedule(navigation: PendingNavigation, guard: MountGuard, navigate: Callback<String>) {
    let PendingNavigation { delay, url } = navigation;
    timer::after(delay, move || {
        if guard.is_alive() {
            navigate.call(url);
        } else {
            log::debug!("skipping navigation to {} after unmount", url);
        }
    });
}

impl RequestDetailViewModel {
    pub fn new(
        kind: RequestKind,
        id: Option<String>,
        origin: DetailOrigin,
        navigate: Callback<String>,
    ) -> Self {
        let repository = store_value(RequestsRepository::new(use_api_client()));
        let notifications = use_notifications();
        let guard = MountGuard::attach();
        let user = store_value(use_session().user);
        let id = store_value(id.filter(|value| !value.trim().is_empty()));
        let origin = store_value(origin);

        let detail_resource = create_resource(
            move || id.get_value(),
            move |id: Option<String>| {
                let repo = repository.get_value();
                async move {
                    let id = id?;
                    let result = match kind {
                        RequestKind::Leave => repo
                            .leave_detail(&id)
                            .await
                            .map(|detail| detail.map(RequestDetail::Leave)),
                        RequestKind::Overtime => repo
                            .overtime_detail(&id)
                            .await
                            .map(|detail| detail.map(RequestDetail::Overtime)),
                    };
                    Some(result)
                }
            },
        );

        let note = create_rw_signal(String::new());
        let decision_prompt = create_rw_signal(None::<Decision>);
        let delete_open = create_rw_signal(false);

        let decide_action = create_action(move |(decision, note): &(Decision, String)| {
            let repo = repository.get_value();
            let decision = *decision;
            let note = note.clone();
            let id = id.get_value();
            async move {
                let result = match id {
                    Some(id) => repo
                        .decide(kind, decision, &id, &note)
                        .await
                        .map(|_| decision),
                    None => Err(ApiError::validation(MISSING_ID)),
                };
                guard.run("request decision", || result)
            }
        });

        let delete_action = create_action(move |_: &()| {
            let repo = repository.get_value();
            let id = id.get_value();
            async move {
                let result = match id {
                    Some(id) => repo.delete_own(kind, &id).await,
                    None => Err(ApiError::validation(MISSING_ID)),
                };
                guard.run("request deletion", || result)
            }
        });

        let attachment_action = create_action(move |file_name: &String| {
            let repo = repository.get_value();
            let file_name = file_name.clone();
            async move {
                let result = repo
                    .leave_attachment(&file_name)
                    .await
                    .map(|bytes| (file_name, bytes));
                guard.run("attachment download", || result)
            }
        });

        create_effect(move |_| {
            let loaded_note = detail_resource
                .get()
                .flatten()
                .and_then(|result| result.ok())
                .flatten()
                .and_then(|detail| detail.note().map(str::to_string));
            if let Some(loaded) = loaded_note {
                if note.with_untracked(String::is_empty) {
                    note.set(loaded);
                }
            }
        });

        create_effect(move |_| {
            let result = decide_action.value().get().flatten();
            let navigation = origin.with_value(|origin| {
                apply_optional_decision_result(result, kind, origin, notifications)
            });
            if let Some(navigation) = navigation {
                schedule(navigation, guard, navigate);
            }
        });

        create_effect(move |_| {
            let result = delete_action.value().get().flatten();
            if let Some(navigation) = apply_optional_delete_result(result, kind, notifications) {
                schedule(navigation, guard, navigate);
            }
        });

        create_effect(move |_| {
            apply_optional_attachment_result(
                attachment_action.value().get().flatten(),
                notifications,
                crate::utils::download::open_attachment,
            );
        });

        Self {
            kind,
            id,
            origin,
            user,
            detail_resource,
            note,
            decision_prompt,
            delete_open,
            decide_action,
            delete_action,
            attachment_action,
            notifications,
            guard,
        }
    }

    pub fn state(&self) -> Signal<DetailState> {
        let id = self.id;
        let resource = self.detail_resource;
        Signal::derive(move || {
            let id = id.get_value();
            super::utils::detail_state(id.as_deref(), resource.get().flatten())
        })
    }

    pub fn permissions(&self, detail: &RequestDetail) -> DetailPermissions {
        let user = self.user.get_value();
        self.origin
            .with_value(|origin| detail_permissions(user.as_ref(), origin, detail))
    }

    pub fn back_url(&self) -> String {
        let kind = self.kind;
        self.origin.with_value(|origin| origin.back_url(kind))
    }

    /// True while a decision or deletion is in flight.
    pub fn busy(&self) -> Signal<bool> {
        let decide = self.decide_action.pending();
        let delete = self.delete_action.pending();
        Signal::derive(move || decide.get() || delete.get())
    }

    pub fn on_decision_click(&self, decision: Decision) -> impl Fn(()) + Copy + 'static {
        let prompt = self.decision_prompt;
        move |_| prompt.set(Some(decision))
    }

    pub fn on_decision_confirm(&self) -> impl Fn(()) + Copy + 'static {
        let prompt = self.decision_prompt;
        let note = self.note;
        let decide_action = self.decide_action;
        let busy = self.busy();
        let guard = self.guard;
        move |_| {
            let Some(decision) = prompt.get_untracked() else {
                return;
            };
            prompt.set(None);
            if !guard.is_alive() || busy.get_untracked() {
                return;
            }
            decide_action.dispatch((decision, note.get_untracked().trim().to_string()));
        }
    }

    pub fn on_decision_cancel(&self) -> impl Fn(()) + Copy + 'static {
        let prompt = self.decision_prompt;
        move |_| prompt.set(None)
    }

    pub fn on_delete_click(&self) -> impl Fn(()) + Copy + 'static {
        let delete_open = self.delete_open;
        move |_| delete_open.set(true)
    }

    pub fn on_delete_confirm(&self) -> impl Fn(()) + Copy + 'static {
        let delete_open = self.delete_open;
        let delete_action = self.delete_action;
        let busy = self.busy();
        let guard = self.guard;
        move |_| {
            delete_open.set(false);
            if guard.is_alive() && !busy.get_untracked() {
                delete_action.dispatch(());
            }
        }
    }

    pub fn on_delete_cancel(&self) -> impl Fn(()) + Copy + 'static {
        let delete_open = self.delete_open;
        move |_| delete_open.set(false)
    }

    pub fn on_open_attachment(&self, file_name: String) {
        if !self.attachment_action.pending().get_untracked() {
            self.attachment_action.dispatch(file_name);
        } else {
            self.notifications.info("Đang tải tệp đính kèm...", 3000);
        }
    }
}
