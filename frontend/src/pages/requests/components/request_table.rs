use super::status_label::StatusLabel;
use crate::components::empty_state::EmptyState;
use crate::pages::requests::types::RequestRow;
use leptos::*;

#[component]
pub fn RequestTable(
    rows: Vec<RequestRow>,
    /// Link target for a row, given its id.
    row_href: Callback<String, String>,
    #[prop(optional)] show_employee: bool,
    #[prop(optional, into)] empty_title: Option<String>,
) -> impl IntoView {
    if rows.is_empty() {
        let title = empty_title.unwrap_or_else(|| "Không có yêu cầu nào".to_string());
        return view! { <EmptyState title=title /> }.into_view();
    }

    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-border text-sm">
                <thead class="bg-surface-muted">
                    <tr>
                        {show_employee
                            .then(|| {
                                view! {
                                    <th class="px-4 py-2 text-left font-medium text-fg-muted">"Nhân viên"</th>
                                }
                            })}
                        <th class="px-4 py-2 text-left font-medium text-fg-muted">"Loại"</th>
                        <th class="px-4 py-2 text-left font-medium text-fg-muted">"Thời gian"</th>
                        <th class="px-4 py-2 text-left font-medium text-fg-muted">"Số lượng"</th>
                        <th class="px-4 py-2 text-left font-medium text-fg-muted">"Trạng thái"</th>
                        <th class="px-4 py-2"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {rows
                        .into_iter()
                        .map(|row| {
                            let href = row_href.call(row.id.clone());
                            let employee = format!("{} - {}", row.employee_code, row.employee_name);
                            view! {
                                <tr class="hover:bg-surface-muted">
                                    {show_employee
                                        .then(|| view! { <td class="px-4 py-2 text-fg">{employee}</td> })}
                                    <td class="px-4 py-2 text-fg">{row.category}</td>
                                    <td class="px-4 py-2 text-fg">{row.period}</td>
                                    <td class="px-4 py-2 text-fg">{row.amount}</td>
                                    <td class="px-4 py-2">
                                        <StatusLabel status=row.status />
                                    </td>
                                    <td class="px-4 py-2 text-right">
                                        <a href=href class="text-action-primary-bg hover:underline">
                                            "Chi tiết"
                                        </a>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::RequestStatus;
    use crate::test_support::helpers::leave;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn rows_link_to_their_detail() {
        let html = render_to_string(move || {
            let rows = vec![RequestRow::from(&leave("42", "EMP003", RequestStatus::Pending))];
            view! {
                <RequestTable
                    rows=rows
                    row_href=Callback::new(|id: String| format!("/detail?id={}", id))
                    show_employee=true
                />
            }
        });
        assert!(html.contains("/detail?id=42"));
        assert!(html.contains("EMP003 - Nguyễn Văn A"));
        assert!(html.contains("Nghỉ phép năm"));
        assert!(html.contains("Chờ duyệt"));
    }

    #[test]
    fn empty_rows_show_placeholder() {
        let html = render_to_string(move || {
            view! {
                <RequestTable
                    rows=Vec::new()
                    row_href=Callback::new(|id: String| id)
                    empty_title="Chưa có yêu cầu OT"
                />
            }
        });
        assert!(html.contains("Chưa có yêu cầu OT"));
        assert!(!html.contains("<table"));
    }
}
