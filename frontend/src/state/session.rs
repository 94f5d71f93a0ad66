use crate::api::{ApiClient, SessionUser};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Employee,
    Manager,
    Hr,
    Admin,
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Role::Employee,
            "MANAGER" => Role::Manager,
            "HR" => Role::Hr,
            "ADMIN" => Role::Admin,
            _ => Role::Unknown,
        }
    }

    pub fn is_approver(self) -> bool {
        matches!(self, Role::Manager | Role::Hr)
    }
}

/// Who is signed in. Read from session storage once when the app mounts and
/// passed down through context afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl SessionContext {
    pub fn new(token: Option<String>, user: Option<SessionUser>) -> Self {
        Self { token, user }
    }

    pub fn from_storage_values(token: Option<String>, user_json: Option<String>) -> Self {
        let token = token.filter(|value| !value.trim().is_empty());
        let user = user_json.and_then(|raw| match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("ignoring unreadable session user: {}", err);
                None
            }
        });
        Self { token, user }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn read_from_storage() -> Self {
        use crate::utils::storage::{read_session_item, TOKEN_KEY, USER_KEY};
        Self::from_storage_values(read_session_item(TOKEN_KEY), read_session_item(USER_KEY))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn read_from_storage() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Role {
        self.user
            .as_ref()
            .map(|user| Role::parse(&user.role))
            .unwrap_or(Role::Unknown)
    }

    pub fn employee_code(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.employee_code.as_str())
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new().with_token(self.token.clone())
    }
}

#[component]
pub fn SessionProvider(
    #[prop(optional)] session: Option<SessionContext>,
    children: Children,
) -> impl IntoView {
    let session = session.unwrap_or_else(SessionContext::read_from_storage);
    if use_context::<ApiClient>().is_none() {
        provide_context(session.api_client());
    }
    provide_context(session);
    children()
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_default()
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(|| use_session().api_client())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!(Role::parse("manager"), Role::Manager);
        assert_eq!(Role::parse(" HR "), Role::Hr);
        assert_eq!(Role::parse("intern"), Role::Unknown);
        assert!(Role::Manager.is_approver());
        assert!(Role::Hr.is_approver());
        assert!(!Role::Employee.is_approver());
        assert!(!Role::Admin.is_approver());
    }

    #[test]
    fn storage_values_are_read_once_into_context() {
        let session = SessionContext::from_storage_values(
            Some("jwt".into()),
            Some(r#"{"employeeCode":"EMP100","fullName":"Phạm D","role":"MANAGER"}"#.into()),
        );
        assert!(session.is_signed_in());
        assert_eq!(session.role(), Role::Manager);
        assert_eq!(session.employee_code(), Some("EMP100"));
        assert!(session.api_client().has_token());
    }

    #[test]
    fn broken_storage_values_yield_anonymous_session() {
        let session = SessionContext::from_storage_values(Some("".into()), Some("{oops".into()));
        assert!(!session.is_signed_in());
        assert_eq!(session.role(), Role::Unknown);
        assert!(session.employee_code().is_none());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn use_session_defaults_without_provider() {
        with_runtime(|| {
            assert_eq!(use_session(), SessionContext::default());
            assert!(!use_api_client().has_token());
        });
    }

    #[test]
    fn provided_session_is_returned() {
        with_runtime(|| {
            let session = SessionContext::new(
                Some("t".into()),
                Some(SessionUser {
                    employee_code: "EMP7".into(),
                    full_name: None,
                    role: "HR".into(),
                }),
            );
            provide_context(session.clone());
            assert_eq!(use_session(), session);
            assert!(use_api_client().has_token());
        });
    }
}
