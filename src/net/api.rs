//! REST client shared by the session loader and every other API caller.
//!
//! SYSTEM CONTEXT
//! ==============
//! All outbound HTTP goes through `ApiClient::send`, which resolves the URL,
//! lets the invalidation interceptor decorate the request, bounds the
//! exchange with a timeout, and hands the response back to the interceptor.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>`. A 401 is reported as
//! `ApiError::Unauthorized` after the interceptor has already cleared the
//! session and scheduled the login redirect.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::http::{ApiRequest, ApiResponse, HttpTransport};
use super::timeout::with_timeout;
use crate::auth::invalidation::InvalidationInterceptor;
use crate::error::ApiError;

pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    interceptor: Rc<InvalidationInterceptor>,
    base_url: String,
    default_timeout: Duration,
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base_url.is_empty() {
        return path.to_owned();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

impl ApiClient {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        interceptor: Rc<InvalidationInterceptor>,
        base_url: impl Into<String>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            interceptor,
            base_url: base_url.into(),
            default_timeout,
        }
    }

    #[must_use]
    pub fn interceptor(&self) -> &Rc<InvalidationInterceptor> {
        &self.interceptor
    }

    /// Send one request through the interceptor.
    ///
    /// # Errors
    ///
    /// Transport failures and timeouts as `ApiError::Transport`; non-2xx
    /// statuses as `Unauthorized`/`Status` unless the request accepts any
    /// status.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.url = join_url(&self.base_url, &request.url);
        self.interceptor.on_request(&mut request);
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        let accept_any_status = request.accept_any_status;

        log::debug!("{:?} {}", request.method, request.url);
        let response = with_timeout(timeout, self.transport.send(request)).await??;
        self.interceptor.on_response(response, accept_any_status)
    }

    /// `GET path` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`], plus `ApiError::Decode` for a bad body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    /// `POST path` with a JSON body and decode a JSON reply.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn post_json<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T, ApiError> {
        self.send(ApiRequest::post(path).json(body)).await?.json()
    }
}
