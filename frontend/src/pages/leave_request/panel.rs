use super::{
    utils::balance_label,
    view_model::{use_leave_request_view_model, CONFIRM_MESSAGE},
};
use crate::api::LeaveDuration;
use crate::components::{confirm_dialog::ConfirmDialog, layout::Layout};
use crate::pages::requests::types::MY_REQUESTS_PATH;
use leptos::*;

const INPUT_CLASS: &str = "w-full border border-border rounded px-3 py-2 bg-surface text-fg";
const LABEL_CLASS: &str = "block text-sm font-medium text-fg mb-1";

#[component]
pub fn LeaveRequestPage() -> impl IntoView {
    view! {
        <Layout>
            <LeaveRequestPanel />
        </Layout>
    }
}

#[component]
pub fn LeaveRequestPanel() -> impl IntoView {
    let vm = use_leave_request_view_model();
    let form = vm.form;
    let options = vm.options();
    let balance_visible = vm.balance_visible();
    let remaining = vm.remaining_days();
    let balance_loading = vm.balance_resource.loading();
    let submitting = vm.submit_action.pending();
    let confirm_details = Signal::derive(move || {
        let options = options.get();
        form.with(|form| form.confirm_details(&options))
    });

    let on_submit_click = vm.on_submit_click();
    let on_reset = vm.on_reset();
    let on_file_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        vm.attach_file(input.files().and_then(|files| files.get(0)));
    };

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-5 max-w-3xl">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold text-fg">"Tạo yêu cầu nghỉ phép"</h2>
                <a href=MY_REQUESTS_PATH class="text-sm text-action-primary-bg hover:underline">
                    "Quay lại danh sách"
                </a>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div>
                    <label class=LABEL_CLASS for="leave-type">"Loại nghỉ phép"</label>
                    <select
                        id="leave-type"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| form.leave_type.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|form| form.leave_type = value);
                        }
                    >
                        <For
                            each=move || options.get()
                            key=|option| option.code.clone()
                            children=move |option| {
                                let code = option.code.clone();
                                view! {
                                    <option
                                        value=option.code
                                        selected=move || form.with(|form| form.leave_type == code)
                                    >
                                        {option.name}
                                    </option>
                                }
                            }
                        />
                    </select>
                    <Show when=move || balance_visible.get()>
                        <p class="mt-1 text-sm text-fg-muted">
                            {move || balance_label(balance_loading.get(), remaining.get())}
                        </p>
                    </Show>
                </div>
                <div class="flex items-end">
                    <label class="inline-flex items-center gap-2 text-sm text-fg">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|form| form.is_paid_leave)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|form| form.is_paid_leave = checked);
                            }
                        />
                        "Nghỉ có lương"
                    </label>
                </div>
                <div>
                    <label class=LABEL_CLASS for="leave-request-start-date">"Ngày bắt đầu"</label>
                    <input
                        id="leave-request-start-date"
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| form.from_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|form| form.from_date = value);
                        }
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="leave-request-end-date">"Ngày kết thúc"</label>
                    <input
                        id="leave-request-end-date"
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| form.to_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|form| form.to_date = value);
                        }
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="leave-duration">"Thời lượng"</label>
                    <select
                        id="leave-duration"
                        class=INPUT_CLASS
                        prop:value=move || form.with(|form| form.duration.code().to_string())
                        on:change=move |ev| {
                            if let Some(duration) = LeaveDuration::from_code(&event_target_value(&ev)) {
                                form.update(|form| form.duration = duration);
                            }
                        }
                    >
                        {LeaveDuration::ALL
                            .iter()
                            .map(|duration| {
                                let duration = *duration;
                                view! {
                                    <option
                                        value=duration.code()
                                        selected=move || form.with(|form| form.duration == duration)
                                    >
                                        {duration.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <div>
                    <span class=LABEL_CLASS>"Số ngày nghỉ"</span>
                    <span class="text-sm text-fg">
                        {move || form.with(|form| form.requested_days_label())}
                    </span>
                </div>
            </div>
            <div>
                <label class=LABEL_CLASS for="leave-reason">"Lý do"</label>
                <textarea
                    id="leave-reason"
                    rows="4"
                    class=INPUT_CLASS
                    placeholder="Nhập lý do nghỉ phép..."
                    prop:value=move || form.with(|form| form.reason.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|form| form.reason = value);
                    }
                ></textarea>
            </div>
            <div>
                <label class=LABEL_CLASS for="leave-attachment">"Tệp đính kèm"</label>
                <input id="leave-attachment" type="file" class="text-sm" on:change=on_file_change />
                <Show when=move || form.with(|form| form.attachment.is_some())>
                    <p class="mt-1 text-xs text-fg-muted">
                        {move || {
                            form.with(|form| {
                                form.attachment
                                    .as_ref()
                                    .map(|file| file.file_name.clone())
                                    .unwrap_or_default()
                            })
                        }}
                    </p>
                </Show>
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
                title="Xác nhận gửi yêu cầu"
                message=CONFIRM_MESSAGE
                details=confirm_details
                confirm_disabled=submitting
                on_confirm=Callback::new(vm.on_confirm())
                on_cancel=Callback::new(vm.on_cancel())
            />
        </section>
    }
}
