use crate::api::OvertimeSummary;
use crate::pages::request_approvals::view_model::OvertimeBalanceViewModel;
use leptos::ev::KeyboardEvent;
use leptos::*;

const INPUT_CLASS: &str = "w-full border border-border rounded px-3 py-2 bg-surface text-fg";

#[component]
pub fn OvertimeBalanceDialog(vm: OvertimeBalanceViewModel) -> impl IntoView {
    let loading = vm.loading();
    let on_close = vm.on_close();
    let on_lookup = vm.on_lookup();
    let on_enter = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            on_lookup(());
        }
    };

    view! {
        <Show when=move || vm.open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Đóng"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-xl rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                >
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-fg">"Tra cứu thời gian Overtime"</h2>
                        <button
                            type="button"
                            aria-label="Đóng"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <div class="flex gap-4">
                        <div class="flex-1">
                            <label class="block text-sm font-medium text-fg mb-1" for="balance-employee">
                                "Mã nhân viên"
                            </label>
                            <input
                                id="balance-employee"
                                type="text"
                                class=INPUT_CLASS
                                placeholder="Nhập mã nhân viên"
                                prop:value=move || vm.employee_code.get()
                                on:input=move |ev| vm.employee_code.set(event_target_value(&ev))
                                on:keydown=on_enter
                            />
                        </div>
                        <div class="w-32">
                            <label class="block text-sm font-medium text-fg mb-1" for="balance-year">"Năm"</label>
                            <input
                                id="balance-year"
                                type="text"
                                class=INPUT_CLASS
                                prop:value=move || vm.year.get()
                                on:input=move |ev| vm.year.set(event_target_value(&ev))
                                on:keydown=on_enter
                            />
                        </div>
                    </div>
                    <button
                        type="button"
                        class="w-full px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || loading.get()
                        on:click=move |_| on_lookup(())
                    >
                        {move || if loading.get() { "Đang tìm kiếm..." } else { "Tra cứu" }}
                    </button>
                    {move || {
                        vm.error
                            .get()
                            .map(|message| {
                                view! {
                                    <div class="p-3 rounded border border-status-error-border bg-status-error-bg text-status-error-text text-sm">
                                        {message}
                                    </div>
                                }
                            })
                    }}
                    {move || vm.summary.get().map(|summary| view! { <SummaryTable summary=summary /> })}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn SummaryTable(summary: OvertimeSummary) -> impl IntoView {
    let facts = [
        ("Mã nhân viên", summary.employee_code.clone()),
        ("Tên nhân viên", summary.employee_name.clone().unwrap_or_default()),
        ("Năm", summary.year.to_string()),
        ("Tổng năm", summary.total_overtime.to_string()),
    ];

    view! {
        <div class="border border-border rounded-lg p-4 space-y-4">
            <dl class="grid grid-cols-2 gap-4 text-sm">
                {facts
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <div>
                                <dt class="text-fg-muted">{label}</dt>
                                <dd class="text-fg font-semibold">{value}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
            <table class="w-full text-sm border-collapse">
                <thead>
                    <tr>
                        <th class="px-3 py-2 text-left border border-border">"Tháng"</th>
                        <th class="px-3 py-2 text-right border border-border">"Giờ OT"</th>
                    </tr>
                </thead>
                <tbody>
                    {summary
                        .monthly
                        .into_iter()
                        .map(|month| {
                            view! {
                                <tr>
                                    <td class="px-3 py-2 border border-border">{month.month}</td>
                                    <td class="px-3 py-2 text-right border border-border">{month.hours}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiClient, MonthlyOvertime};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn closed_dialog_renders_nothing() {
        let html = render_to_string(move || {
            provide_context(ApiClient::new_with_base_url("http://localhost:1"));
            let vm = OvertimeBalanceViewModel::new();
            view! { <OvertimeBalanceDialog vm=vm /> }
        });
        assert!(!html.contains("Tra cứu thời gian Overtime"));
    }

    #[test]
    fn open_dialog_lists_monthly_hours() {
        let html = render_to_string(move || {
            provide_context(ApiClient::new_with_base_url("http://localhost:1"));
            let vm = OvertimeBalanceViewModel::new();
            vm.open.set(true);
            vm.summary.set(Some(OvertimeSummary {
                employee_code: "EMP007".into(),
                employee_name: Some("Phạm Văn D".into()),
                year: 2024,
                total_overtime: 14.5,
                monthly: vec![
                    MonthlyOvertime { month: 1, hours: 6.0 },
                    MonthlyOvertime { month: 2, hours: 8.5 },
                ],
            }));
            view! { <OvertimeBalanceDialog vm=vm /> }
        });
        assert!(html.contains("Tra cứu thời gian Overtime"));
        assert!(html.contains("Phạm Văn D"));
        assert!(html.contains("14.5"));
        assert!(html.contains("8.5"));
        assert!(html.contains("Tra cứu"));
    }
}
