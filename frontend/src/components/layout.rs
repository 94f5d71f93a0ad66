use crate::{
    api::{ApiClient, ApiError, RequestKind},
    components::toast::ToastStack,
    pages::requests::types::{
        approver_list_path, LEAVE_FORM_PATH, MY_REQUESTS_PATH, OVERTIME_FORM_PATH,
    },
    state::session::{use_api_client, use_session},
};
use leptos::*;

const NAV_LINK_CLASS: &str = "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

/// Employee links for everyone signed in, approval lists for approvers.
pub fn nav_links(is_approver: bool) -> Vec<NavLink> {
    let mut links = vec![
        NavLink {
            href: MY_REQUESTS_PATH,
            label: "Yêu cầu của tôi",
        },
        NavLink {
            href: LEAVE_FORM_PATH,
            label: "Xin nghỉ phép",
        },
        NavLink {
            href: OVERTIME_FORM_PATH,
            label: "Đăng ký OT",
        },
    ];
    if is_approver {
        links.push(NavLink {
            href: approver_list_path(RequestKind::Leave),
            label: "Duyệt nghỉ phép",
        });
        links.push(NavLink {
            href: approver_list_path(RequestKind::Overtime),
            label: "Duyệt OT",
        });
    }
    links
}

/// A failed refresh keeps whatever count was shown before.
fn apply_unread_count_result(result: Option<Result<u64, ApiError>>, unread: RwSignal<Option<u64>>) {
    match result {
        Some(Ok(count)) => unread.set(Some(count)),
        Some(Err(err)) => log::warn!("unread notification count unavailable: {}", err),
        None => {}
    }
}

fn badge_text(count: u64) -> String {
    if count > 99 {
        "99+".to_string()
    } else {
        count.to_string()
    }
}

/// The unread-count endpoint needs a bearer token.
fn fetches_unread_count(signed_in: bool, api: &ApiClient) -> bool {
    signed_in && api.has_token()
}

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let api = use_api_client();
    let is_approver = session.role().is_approver();
    let display_name = session
        .user
        .as_ref()
        .map(|user| user.full_name.clone().unwrap_or_else(|| user.employee_code.clone()))
        .unwrap_or_default();
    let signed_in = fetches_unread_count(session.is_signed_in(), &api);

    let unread = create_rw_signal(None::<u64>);
    let unread_resource = create_resource(
        move || signed_in,
        move |signed_in| {
            let api = api.clone();
            async move {
                if signed_in {
                    Some(api.unread_notification_count().await)
                } else {
                    None
                }
            }
        },
    );
    create_effect(move |_| {
        apply_unread_count_result(unread_resource.get().flatten(), unread);
    });

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Payroll"</h1>
                    <nav class="flex items-center space-x-2">
                        {nav_links(is_approver)
                            .into_iter()
                            .map(|link| view! { <a href=link.href class=NAV_LINK_CLASS>{link.label}</a> })
                            .collect_view()}
                        <span class="relative inline-flex items-center px-3 py-2 text-sm text-fg-muted" title="Thông báo chưa đọc">
                            <i class="fas fa-bell"></i>
                            <Show when=move || unread.get().map(|count| count > 0).unwrap_or(false)>
                                <span class="ml-1 rounded-full bg-action-danger-bg text-action-danger-text text-xs px-2">
                                    {move || unread.get().map(badge_text).unwrap_or_default()}
                                </span>
                            </Show>
                        </span>
                        <span class="text-sm text-fg">{display_name}</span>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header />
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
            <ToastStack />
        </div>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex justify-center items-center gap-3 p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            {label.map(|text| view! { <span class="text-sm text-fg-muted">{text}</span> })}
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approvers_get_list_links() {
        let employee: Vec<_> = nav_links(false).into_iter().map(|link| link.href).collect();
        assert_eq!(employee, vec![MY_REQUESTS_PATH, LEAVE_FORM_PATH, OVERTIME_FORM_PATH]);
        let approver: Vec<_> = nav_links(true).into_iter().map(|link| link.href).collect();
        assert!(approver.contains(&"/manager/requests/leaves"));
        assert!(approver.contains(&"/manager/requests/overtime"));
    }

    #[test]
    fn unread_count_needs_session_and_token() {
        let anonymous = ApiClient::new_with_base_url("http://localhost:1");
        let authorised = anonymous.clone().with_token(Some("token-1".into()));
        assert!(fetches_unread_count(true, &authorised));
        assert!(!fetches_unread_count(true, &anonymous));
        assert!(!fetches_unread_count(false, &authorised));
    }

    #[test]
    fn badge_caps_large_counts() {
        assert_eq!(badge_text(7), "7");
        assert_eq!(badge_text(120), "99+");
    }
}
