use crate::state::notifications::{use_notifications, Notification, NotificationStatus};
use leptos::*;

fn toast_class(status: NotificationStatus) -> &'static str {
    match status {
        NotificationStatus::Ok => {
            "bg-status-success-bg border border-status-success-border text-status-success-text"
        }
        NotificationStatus::Error => {
            "bg-status-error-bg border border-status-error-border text-status-error-text"
        }
        NotificationStatus::Info => {
            "bg-status-info-bg border border-status-info-border text-status-info-text"
        }
    }
}

/// Renders the queued notifications, newest at the bottom.
#[component]
pub fn ToastStack() -> impl IntoView {
    let notifications = use_notifications();
    let entries = notifications.entries();

    view! {
        <div
            class="fixed top-4 right-4 z-[80] flex flex-col gap-2 w-80"
            role="status"
            aria-live="polite"
        >
            <For
                each=move || entries.get()
                key=|entry| entry.id.clone()
                children=move |entry: Notification| {
                    let id = entry.id.clone();
                    let class = format!("rounded-md shadow px-4 py-3 {}", toast_class(entry.status));
                    view! {
                        <div class=class>
                            <div class="flex items-start justify-between gap-2">
                                <div>
                                    <p class="font-semibold text-sm">{entry.title}</p>
                                    <p class="text-sm">{entry.message}</p>
                                </div>
                                <button
                                    type="button"
                                    aria-label="Đóng"
                                    class="text-xs opacity-70 hover:opacity-100"
                                    on:click=move |_| notifications.remove(&id)
                                >
                                    {"✕"}
                                </button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
