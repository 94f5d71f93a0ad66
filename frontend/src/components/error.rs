use crate::api::ApiError;
use leptos::*;

/// Inline banner for a failed load. Validation errors list their field
/// messages from `details.errors`.
#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || {
                    error
                        .get()
                        .map(|e| {
                            let lines = detail_lines(&e);
                            if lines.is_empty() {
                                ().into_view()
                            } else {
                                view! {
                                    <ul class="list-disc list-inside text-sm">
                                        {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                                    </ul>
                                }
                                .into_view()
                            }
                        })
                        .unwrap_or_else(|| ().into_view())
                }}
            </div>
        </Show>
    }
}

fn detail_lines(error: &ApiError) -> Vec<String> {
    if !error.is_validation() {
        return Vec::new();
    }
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_validation_details() {
        let html = render_to_string(move || {
            let mut error = ApiError::validation("Dữ liệu không hợp lệ");
            error.details = Some(json!({
                "errors": ["Vui lòng chọn ngày bắt đầu", "Lý do không được để trống"]
            }));
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Dữ liệu không hợp lệ"));
        assert!(html.contains("Vui lòng chọn ngày bắt đầu"));
        assert!(html.contains("Lý do không được để trống"));
    }

    #[test]
    fn inline_error_hides_details_for_other_codes() {
        let html = render_to_string(move || {
            let mut error = ApiError::new("HTTP_500", "Không thể tải dữ liệu");
            error.details = Some(json!({ "errors": ["internal"] }));
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Không thể tải dữ liệu"));
        assert!(!html.contains("internal"));
    }
}
