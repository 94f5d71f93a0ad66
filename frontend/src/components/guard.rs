use crate::{
    components::layout::ErrorMessage,
    pages::requests::types::MY_REQUESTS_PATH,
    state::session::{use_session, SessionContext},
};
use leptos::*;

pub const LOGIN_PATH: &str = "/login";

fn redirect_to(target: &'static str) {
    create_effect(move |_| {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(target);
        }
    });
}

#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let target = session_redirect(&session);
    if let Some(target) = target {
        redirect_to(target);
    }
    view! {
        <Show when=move || target.is_none() fallback=|| ()>
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireApprover(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let target = approver_redirect(&session);
    if let Some(target) = target {
        redirect_to(target);
    }
    view! {
        <Show
            when=move || target.is_none()
            fallback=|| view! { <ErrorMessage message="Bạn không có quyền truy cập trang này".into() /> }
        >
            {children()}
        </Show>
    }
}

fn session_redirect(session: &SessionContext) -> Option<&'static str> {
    (!session.is_signed_in()).then_some(LOGIN_PATH)
}

fn approver_redirect(session: &SessionContext) -> Option<&'static str> {
    session_redirect(session).or_else(|| (!session.role().is_approver()).then_some(MY_REQUESTS_PATH))
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::session_with_role;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn require_session_renders_children_when_signed_in() {
        let html = render_to_string(move || {
            provide_context(session_with_role("E1", "EMPLOYEE"));
            view! {
                <RequireSession>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireSession>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_session_hides_children_when_anonymous() {
        let html = render_to_string(move || {
            view! {
                <RequireSession>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireSession>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_approver_blocks_employees() {
        let html = render_to_string(move || {
            provide_context(session_with_role("E1", "EMPLOYEE"));
            view! {
                <RequireApprover>
                    {|| view! { <div>"approver-only"</div> }}
                </RequireApprover>
            }
        });
        assert!(!html.contains("approver-only"));
        assert!(html.contains("Bạn không có quyền truy cập trang này"));
    }

    #[test]
    fn require_approver_renders_for_managers() {
        let html = render_to_string(move || {
            provide_context(session_with_role("M1", "MANAGER"));
            view! {
                <RequireApprover>
                    {|| view! { <div>"approver-only"</div> }}
                </RequireApprover>
            }
        });
        assert!(html.contains("approver-only"));
    }
}
