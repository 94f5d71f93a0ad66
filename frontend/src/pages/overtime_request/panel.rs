use super::{
    utils::parse_hour_input,
    view_model::{use_overtime_request_view_model, CONFIRM_MESSAGE, OVER_LIMIT_TITLE},
};
use crate::components::{confirm_dialog::ConfirmDialog, layout::Layout};
use crate::pages::requests::types::MY_REQUESTS_PATH;
use leptos::*;

const INPUT_CLASS: &str = "w-full border border-border rounded px-3 py-2 bg-surface text-fg";
const LABEL_CLASS: &str = "block text-sm font-medium text-fg mb-1";

#[component]
pub fn OvertimeRequestPage() -> impl IntoView {
    view! {
        <Layout>
            <OvertimeRequestPanel />
        </Layout>
    }
}

#[component]
pub fn OvertimeRequestPanel() -> impl IntoView {
    let vm = use_overtime_request_view_model();
    let form = vm.form;
    let submitting = vm.submit_action.pending();
    let confirm_details = Signal::derive(move || form.with(|form| form.confirm_details()));
    let over_limit_open = Signal::derive(move || vm.over_limit.with(Option::is_some));
    let over_limit_message =
        Signal::derive(move || vm.over_limit.get().unwrap_or_default());

    let on_submit_click = vm.on_submit_click();
    let on_reset = vm.on_reset();
    let hour_value = |hour: Option<u32>| hour.map(|h| h.to_string()).unwrap_or_default();

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-5 max-w-3xl">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold text-fg">"Đăng ký làm thêm giờ"</h2>
                <a href=MY_REQUESTS_PATH class="text-sm text-action-primary-bg hover:underline">
                    "Quay lại danh sách"
                </a>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div>
                    <label class=LABEL_CLASS for="ot-date">"Ngày làm thêm"</label>
                    <input
                        id="ot-date"
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| form.ot_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|form| form.ot_date = value);
                        }
                    />
                </div>
                <div>
                    <span class=LABEL_CLASS>"Loại ngày"</span>
                    <span class="text-sm text-fg">{move || form.with(|form| form.day_type_label())}</span>
                </div>
                <div>
                    <label class=LABEL_CLASS for="fromTime">"Từ (giờ)"</label>
                    <input
                        id="fromTime"
                        type="number"
                        min="0"
                        max="23"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| hour_value(form.from_hour))
                        on:input=move |ev| vm.set_from_hour(parse_hour_input(&event_target_value(&ev)))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="toTime">"Đến (giờ)"</label>
                    <input
                        id="toTime"
                        type="number"
                        min="0"
                        max="23"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| hour_value(form.to_hour))
                        on:input=move |ev| {
                            let hour = parse_hour_input(&event_target_value(&ev));
                            form.update(|form| form.to_hour = hour);
                        }
                    />
                </div>
                <div>
                    <span class=LABEL_CLASS>"Tổng số giờ"</span>
                    <span class="text-sm text-fg">{move || form.with(|form| form.total_hours_label())}</span>
                </div>
            </div>
            <div>
                <label class=LABEL_CLASS for="ot-reason">"Lý do"</label>
                <textarea
                    id="ot-reason"
                    rows="3"
                    class=INPUT_CLASS
                    prop:value=move || form.with(|form| form.reason.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|form| form.reason = value);
                    }
                ></textarea>
            </div>
            <div class="flex justify-end gap-2">
                <button
                    type="button"
                    class="px-4 py-2 rounded bg-surface-muted text-fg"
                    on:click=move |_| on_reset(())
                >
                    "Đặt lại"
                </button>
                <button
                    type="button"
                    class="px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    disabled=move || submitting.get()
                    on:click=move |_| on_submit_click(())
                >
                    {move || if submitting.get() { "Đang gửi..." } else { "Gửi yêu cầu" }}
                </button>
            </div>
            <ConfirmDialog
                is_open=vm.confirm_open.into()
                title="Xác nhận gửi yêu cầu OT"
                message=CONFIRM_MESSAGE
                details=confirm_details
                confirm_disabled=submitting
                on_confirm=Callback::new(vm.on_confirm())
                on_cancel=Callback::new(vm.on_cancel())
            />
            <ConfirmDialog
                is_open=over_limit_open
                title=OVER_LIMIT_TITLE
                message=over_limit_message
                confirm_label="Đồng ý"
                cancel_label="Từ chối"
                confirm_disabled=submitting
                on_confirm=Callback::new(vm.on_accept_over_limit())
                on_cancel=Callback::new(vm.on_decline_over_limit())
            />
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::pages::overtime_request::view_model::OvertimeRequestViewModel;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn panel_renders_inputs() {
        let html = render_to_string(move || {
            provide_context(ApiClient::new_with_base_url("http://localhost:1"));
            view! { <OvertimeRequestPanel /> }
        });
        assert!(html.contains("Đăng ký làm thêm giờ"));
        assert!(html.contains("Tổng số giờ"));
        assert!(html.contains("0 giờ"));
        assert!(!html.contains(OVER_LIMIT_TITLE));
    }

    #[test]
    fn over_limit_dialog_shows_server_message() {
        let html = render_to_string(move || {
            provide_context(ApiClient::new_with_base_url("http://localhost:1"));
            let vm = OvertimeRequestViewModel::new();
            vm.over_limit.set(Some("Vượt quá 40 giờ OT".into()));
            provide_context(vm);
            view! { <OvertimeRequestPanel /> }
        });
        assert!(html.contains(OVER_LIMIT_TITLE));
        assert!(html.contains("Vượt quá 40 giờ OT"));
        assert!(html.contains("Đồng ý"));
        assert!(html.contains("Từ chối"));
    }
}
