use super::{
    components::OvertimeBalanceDialog,
    utils::ListParams,
    view_model::{use_request_approvals_view_model, OvertimeBalanceViewModel, RequestApprovalsViewModel},
};
use crate::api::RequestKind;
use crate::components::{
    error::InlineErrorMessage,
    guard::RequireApprover,
    layout::{Layout, LoadingSpinner},
    pagination::Pager,
};
use crate::pages::requests::components::RequestTable;
use leptos::*;
use leptos_router::{use_navigate, use_query_map, NavigateOptions};

fn list_title(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Leave => "Duyệt yêu cầu nghỉ phép",
        RequestKind::Overtime => "Duyệt yêu cầu làm thêm giờ",
    }
}

/// Approver list page. Reads its state from the URL once and writes it back
/// with history replace on every change.
#[component]
pub fn RequestApprovalsPage(kind: RequestKind) -> impl IntoView {
    let query = use_query_map();
    let vm = use_request_approvals_view_model(kind, || {
        query.with_untracked(|query| {
            ListParams::from_query_values(
                query.get("page").map(String::as_str),
                query.get("month").map(String::as_str),
                query.get("search").map(String::as_str),
            )
        })
    });

    let navigate = use_navigate();
    let params = vm.params;
    create_effect(move |_| {
        let url = params.with(|params| params.list_url(kind));
        navigate(
            &url,
            NavigateOptions {
                replace: true,
                scroll: false,
                ..Default::default()
            },
        );
    });

    view! {
        <RequireApprover>
            <Layout>
                <RequestApprovalsPanel vm=vm />
            </Layout>
        </RequireApprover>
    }
}

#[component]
pub fn RequestApprovalsPanel(vm: RequestApprovalsViewModel) -> impl IntoView {
    let params = vm.params;
    let search_draft = vm.search_draft;
    let resource = vm.rows_resource;
    let loading = resource.loading();
    let error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let on_month_change = vm.on_month_change();
    let on_search_input = vm.on_search_input();
    let on_search_submit = vm.on_search_submit();
    let row_href = vm.row_href();
    let balance = (vm.kind == RequestKind::Overtime).then(OvertimeBalanceViewModel::new);

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <h2 class="text-xl font-semibold text-fg">{list_title(vm.kind)}</h2>
            <div class="flex flex-wrap items-end gap-4">
                <div>
                    <label class="block text-sm font-medium text-fg mb-1" for="list-month">"Tháng"</label>
                    <input
                        id="list-month"
                        type="month"
                        class="border border-border rounded px-3 py-2 bg-surface text-fg"
                        prop:value=move || params.with(|params| params.month.clone())
                        on:change=move |ev| on_month_change(event_target_value(&ev))
                    />
                </div>
                <div class="flex-1 min-w-[240px]">
                    <label class="block text-sm font-medium text-fg mb-1" for="list-search">"Tìm kiếm"</label>
                    <input
                        id="list-search"
                        type="search"
                        class="w-full border border-border rounded px-3 py-2 bg-surface text-fg"
                        placeholder="Mã nhân viên, tên hoặc trạng thái"
                        prop:value=move || search_draft.get()
                        on:input=move |ev| on_search_input(event_target_value(&ev))
                        on:keydown=move |ev: ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_search_submit(());
                            }
                        }
                    />
                </div>
                {balance
                    .map(|balance| {
                        view! {
                            <button
                                type="button"
                                class="px-4 py-2 rounded border border-border text-sm text-fg hover:bg-action-ghost-bg-hover"
                                on:click=move |_| balance.on_open()(())
                            >
                                "Quản lí thời gian overtime"
                            </button>
                        }
                    })}
            </div>
            <InlineErrorMessage error=error />
            <Show when=move || loading.get()>
                <LoadingSpinner label="Đang tải..." />
            </Show>
            {move || {
                resource
                    .get()
                    .and_then(|result| result.ok())
                    .map(|page| {
                        view! {
                            <RequestTable
                                rows=page.content
                                row_href=row_href
                                show_employee=true
                            />
                        }
                    })
            }}
            <Pager
                page=vm.page()
                total_pages=vm.total_pages.into()
                on_move=Callback::new(vm.on_page_move())
                disabled=loading
            />
            {balance.map(|balance| view! { <OvertimeBalanceDialog vm=balance /> })}
        </section>
    }
}
