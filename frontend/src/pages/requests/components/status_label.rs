use crate::api::RequestStatus;
use leptos::*;

fn status_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "bg-status-warning-bg text-status-warning-text",
        RequestStatus::Approved => "bg-status-success-bg text-status-success-text",
        RequestStatus::Rejected => "bg-status-error-bg text-status-error-text",
    }
}

#[component]
pub fn StatusLabel(status: RequestStatus) -> impl IntoView {
    let class = format!(
        "inline-flex px-2 py-0.5 rounded-full text-xs font-semibold {}",
        status_class(status)
    );
    view! { <span class=class>{status.label()}</span> }
}
