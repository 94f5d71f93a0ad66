use super::{
    utils::{
        decision_message, decision_title, delete_message, DetailOrigin, DetailState,
        RequestDetail, MISSING_ID, NOT_FOUND,
    },
    view_model::RequestDetailViewModel,
};
use crate::api::RequestKind;
use crate::components::{
    confirm_dialog::ConfirmDialog,
    empty_state::EmptyState,
    guard::{RequireApprover, RequireSession},
    layout::{ErrorMessage, Layout, LoadingSpinner},
};
use crate::pages::requests::{components::StatusLabel, repository::Decision};
use leptos::*;
use leptos_router::{use_navigate, use_query_map, NavigateOptions};

fn detail_title(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => "Chi tiết yêu cầu nghỉ phép",
        RequestKind::Overtime => "Chi tiết yêu cầu làm thêm giờ",
    }
}

fn navigate_callback() -> Callback<String> {
    let navigate = use_navigate();
    Callback::new(move |url: String| navigate(&url, NavigateOptions::default()))
}

/// Approver view: `?id&page&month&search`.
#[component]
pub fn ApprovalDetailPage(kind: RequestKind) -> impl IntoView {
    let query = use_query_map();
    let (id, origin) = query.with_untracked(|query| {
        let value = |key: &str| query.get(key).map(String::as_str);
        (
            query.get("id").cloned(),
            DetailOrigin::approver_from_query(value("page"), value("month"), value("search")),
        )
    });
    let vm = RequestDetailViewModel::new(kind, id, origin, navigate_callback());

    view! {
        <RequireApprover>
            <Layout>
                <RequestDetailPanel vm=vm />
            </Layout>
        </RequireApprover>
    }
}

/// Owner view: `?id` only.
#[component]
pub fn OwnDetailPage(kind: RequestKind) -> impl IntoView {
    let query = use_query_map();
    let id = query.with_untracked(|query| query.get("id").cloned());
    let vm = RequestDetailViewModel::new(kind, id, DetailOrigin::Owner, navigate_callback());

    view! {
        <RequireSession>
            <Layout>
                <RequestDetailPanel vm=vm />
            </Layout>
        </RequireSession>
    }
}

#[component]
pub fn RequestDetailPanel(vm: RequestDetailViewModel) -> impl IntoView {
    let state = vm.state();
    let kind = vm.kind;
    let busy = vm.busy();
    let prompt = vm.decision_prompt;
    let prompt_open = Signal::derive(move || prompt.with(Option::is_some));
    let prompt_decision = move || prompt.get().unwrap_or(Decision::Approve);

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-5 max-w-3xl">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold text-fg">{detail_title(kind)}</h2>
                <a href=vm.back_url() class="text-sm text-action-primary-bg hover:underline">
                    "Quay lại"
                </a>
            </div>
            {move || match state.get() {
                DetailState::MissingId => view! { <ErrorMessage message=MISSING_ID.to_string() /> }.into_view(),
                DetailState::Loading => view! { <LoadingSpinner label="Đang tải..." /> }.into_view(),
                DetailState::Failed(message) => view! { <ErrorMessage message=message /> }.into_view(),
                DetailState::NotFound => view! { <EmptyState title=NOT_FOUND /> }.into_view(),
                DetailState::Loaded(detail) => view! { <DetailBody vm=vm detail=detail /> }.into_view(),
            }}
            <ConfirmDialog
                is_open=prompt_open
                title=Signal::derive(move || decision_title(kind, prompt_decision()))
                message=Signal::derive(move || decision_message(kind, prompt_decision()))
                confirm_disabled=busy
                destructive=false
                on_confirm=Callback::new(vm.on_decision_confirm())
                on_cancel=Callback::new(vm.on_decision_cancel())
            />
            <ConfirmDialog
                is_open=vm.delete_open.into()
                title="Xác nhận xóa yêu cầu"
                message=delete_message(kind)
                confirm_label="Xóa"
                confirm_disabled=busy
                destructive=true
                on_confirm=Callback::new(vm.on_delete_confirm())
                on_cancel=Callback::new(vm.on_delete_cancel())
            />
        </section>
    }
}

#[component]
pub fn DetailBody(vm: RequestDetailViewModel, detail: RequestDetail) -> impl IntoView {
    let permissions = vm.permissions(&detail);
    let busy = vm.busy();
    let note = vm.note;
    let attachment = detail.attachment_name().map(str::to_string);
    let on_approve = vm.on_decision_click(Decision::Approve);
    let on_reject = vm.on_decision_click(Decision::Reject);
    let on_delete = vm.on_delete_click();

    view! {
        <div class="space-y-4">
            <div class="flex items-center gap-2">
                <span class="text-sm text-fg-muted">"Trạng thái:"</span>
                <StatusLabel status=detail.status() />
            </div>
            <dl class="grid grid-cols-1 md:grid-cols-2 gap-x-6 gap-y-3 text-sm">
                {detail
                    .fields()
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <div>
                                <dt class="text-fg-muted">{label}</dt>
                                <dd class="text-fg font-medium">{value}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
            {attachment
                .map(|file_name| {
                    let label = file_name.clone();
                    view! {
                        <div>
                            <button
                                type="button"
                                class="text-sm text-action-primary-bg hover:underline"
                                on:click=move |_| vm.on_open_attachment(file_name.clone())
                            >
                                {format!("Xem tệp đính kèm: {}", label)}
                            </button>
                        </div>
                    }
                })}
            <div>
                <label class="block text-sm font-medium text-fg mb-1" for="request-note">"Ghi chú"</label>
                <textarea
                    id="request-note"
                    rows="3"
                    class="w-full border border-border rounded px-3 py-2 bg-surface text-fg disabled:opacity-60"
                    disabled=!permissions.edit_note
                    aria-readonly=(!permissions.edit_note).to_string()
                    prop:value=move || note.get()
                    on:input=move |ev| note.set(event_target_value(&ev))
                >
                    {detail.note().map(str::to_string).unwrap_or_default()}
                </textarea>
            </div>
            <div class="flex justify-end gap-2">
                {permissions
                    .approve
                    .then(|| {
                        view! {
                            <button
                                type="button"
                                class="px-4 py-2 rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                disabled=move || busy.get()
                                on:click=move |_| on_reject(())
                            >
                                "Từ chối"
                            </button>
                            <button
                                type="button"
                                class="px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                                disabled=move || busy.get()
                                on:click=move |_| on_approve(())
                            >
                                "Duyệt"
                            </button>
                        }
                    })}
                {permissions
                    .delete
                    .then(|| {
                        view! {
                            <button
                                type="button"
                                class="px-4 py-2 rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                disabled=move || busy.get()
                                on:click=move |_| on_delete(())
                            >
                                "Xóa yêu cầu"
                            </button>
                        }
                    })}
            </div>
        </div>
    }
}
