use super::view_model::{counter_label, use_my_requests_view_model, OwnRequestTable};
use crate::components::{
    error::InlineErrorMessage,
    guard::RequireSession,
    layout::{Layout, LoadingSpinner},
    pagination::Pager,
};
use crate::pages::requests::{
    components::RequestTable,
    types::{LEAVE_FORM_PATH, OVERTIME_FORM_PATH},
};
use leptos::*;

#[component]
pub fn MyRequestsPage() -> impl IntoView {
    view! {
        <RequireSession>
            <Layout>
                <MyRequestsPanel />
            </Layout>
        </RequireSession>
    }
}

#[component]
pub fn MyRequestsPanel() -> impl IntoView {
    let vm = use_my_requests_view_model();
    let remaining_leave = vm.remaining_leave;
    let remaining_overtime = vm.remaining_overtime;

    view! {
        <div class="space-y-6">
            <section class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="bg-surface-elevated shadow rounded-lg p-4">
                    <p class="text-sm text-fg-muted">"Phép năm còn lại"</p>
                    <p class="text-2xl font-semibold text-fg">
                        {move || counter_label(remaining_leave.get().as_ref(), "ngày")}
                    </p>
                    <a href=LEAVE_FORM_PATH class="text-sm text-action-primary-bg hover:underline">
                        "Tạo yêu cầu nghỉ phép"
                    </a>
                </div>
                <div class="bg-surface-elevated shadow rounded-lg p-4">
                    <p class="text-sm text-fg-muted">"OT còn lại tháng này"</p>
                    <p class="text-2xl font-semibold text-fg">
                        {move || counter_label(remaining_overtime.get().as_ref(), "giờ")}
                    </p>
                    <a href=OVERTIME_FORM_PATH class="text-sm text-action-primary-bg hover:underline">
                        "Đăng ký làm thêm giờ"
                    </a>
                </div>
            </section>
            <OwnRequestSection title="Yêu cầu nghỉ phép của tôi" table=vm.leaves empty_title="Chưa có yêu cầu nghỉ phép" />
            <OwnRequestSection title="Yêu cầu làm thêm giờ của tôi" table=vm.overtime empty_title="Chưa có yêu cầu làm thêm giờ" />
        </div>
    }
}

#[component]
fn OwnRequestSection(
    title: &'static str,
    table: OwnRequestTable,
    empty_title: &'static str,
) -> impl IntoView {
    let resource = table.rows_resource;
    let loading = resource.loading();
    let error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let row_href = table.row_href();

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-3">
            <h2 class="text-lg font-semibold text-fg">{title}</h2>
            <InlineErrorMessage error=error />
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            {move || {
                resource
                    .get()
                    .and_then(|result| result.ok())
                    .map(|page| {
                        view! {
                            <RequestTable rows=page.content row_href=row_href empty_title=empty_title />
                        }
                    })
            }}
            <Pager
                page=table.page.into()
                total_pages=table.total_pages.into()
                on_move=Callback::new(table.on_move())
                disabled=loading
            />
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn panel_shows_counters_and_form_links() {
        let html = render_to_string(move || {
            provide_context(ApiClient::new_with_base_url("http://localhost:1"));
            view! { <MyRequestsPanel /> }
        });
        assert!(html.contains("Phép năm còn lại"));
        assert!(html.contains("Đang tải..."));
        assert!(html.contains(LEAVE_FORM_PATH));
        assert!(html.contains(OVERTIME_FORM_PATH));
        assert!(html.contains("Yêu cầu làm thêm giờ của tôi"));
    }
}
