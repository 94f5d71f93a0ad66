use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    api::types::{decode_json, ApiError},
    config,
};

pub const DEFAULT_FAILURE_MESSAGE: &str = "Đã xảy ra lỗi";

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encodes one URL path segment so ids and file names cannot add segments,
/// queries or fragments.
pub(crate) fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    token: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            token: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => config::await_api_base_url().await,
        };
        base.trim_end_matches('/').to_string()
    }

    /// Builds a request against the resolved base URL and sends it with the
    /// bearer token attached.
    pub(crate) async fn send<F>(&self, fallback: &str, build: F) -> Result<Response, ApiError>
    where
        F: FnOnce(&Client, &str) -> RequestBuilder,
    {
        let base_url = self.resolved_base_url().await;
        let mut request = build(&self.client, &base_url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        self.execute(request, fallback).await
    }

    #[cfg(not(all(test, not(target_arch = "wasm32"))))]
    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        request.send().await.map_err(|err| {
            log::warn!("request failed: {}", err);
            ApiError::request_failed(fallback)
        })
    }

    #[cfg(all(test, not(target_arch = "wasm32")))]
    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|err| ApiError::request_failed(format!("{}: {}", fallback, err)))?;
        if let Some(responder) = find_mock(request.url().as_str()) {
            return responder.respond(&request)?.into_response();
        }
        self.client
            .execute(request)
            .await
            .map_err(|_| ApiError::request_failed(fallback))
    }

    fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("session token rejected by server");
        }
    }

    /// Maps a failed response body to an `ApiError`, surfacing the server's
    /// `message` verbatim when the body is JSON.
    pub(crate) fn error_from_body(status: StatusCode, body: &str, fallback: &str) -> ApiError {
        let parsed = serde_json::from_str::<ServerErrorBody>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|payload| payload.message.clone())
            .filter(|message| !message.trim().is_empty());
        let code = parsed.and_then(|payload| payload.code).unwrap_or_else(|| {
            if status == StatusCode::UNAUTHORIZED {
                "UNAUTHORIZED".to_string()
            } else {
                format!("HTTP_{}", status.as_u16())
            }
        });
        ApiError::new(code, message.unwrap_or_else(|| fallback.to_string()))
    }

    pub(crate) async fn read_text(
        response: Response,
        fallback: &str,
    ) -> Result<(StatusCode, String), ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        let body = response
            .text()
            .await
            .map_err(|_| ApiError::request_failed(fallback))?;
        Ok((status, body))
    }

    pub(crate) async fn map_json_response<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let (status, body) = Self::read_text(response, fallback).await?;
        if status.is_success() {
            decode_json(&body).map_err(|err| {
                log::error!("unexpected response shape: {}", err);
                ApiError::from(err)
            })
        } else {
            Err(Self::error_from_body(status, &body, fallback))
        }
    }

    /// Like `map_json_response`, but a 404 or an empty/`null` body means the
    /// record does not exist.
    pub(crate) async fn map_optional_json_response<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<Option<T>, ApiError> {
        let (status, body) = Self::read_text(response, fallback).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::error_from_body(status, &body, fallback));
        }
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        decode_json(&body).map(Some).map_err(|err| {
            log::error!("unexpected response shape: {}", err);
            ApiError::from(err)
        })
    }

    pub(crate) async fn map_empty_response(
        response: Response,
        fallback: &str,
    ) -> Result<(), ApiError> {
        let (status, body) = Self::read_text(response, fallback).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_body(status, &body, fallback))
        }
    }

    pub(crate) async fn map_bytes_response(
        response: Response,
        fallback: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_body(status, &body, fallback));
        }
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|_| ApiError::request_failed(fallback))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock_registry::{register_mock, MockResponse, TestResponder};
#[cfg(all(test, not(target_arch = "wasm32")))]
use mock_registry::find_mock;
