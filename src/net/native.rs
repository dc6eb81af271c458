//! `reqwest` transport for non-browser consumers (CLI tools, end-to-end
//! tests). A cookie jar stands in for the browser's credential store.

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::http::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::error::TransportError;

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Client with an in-memory cookie store.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` if the TLS backend fails to
    /// initialize.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await.map_err(|e| map_error(&e, &request))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Ok(ApiResponse { status, body })
    }
}

fn map_error(err: &reqwest::Error, request: &ApiRequest) -> TransportError {
    if err.is_timeout() {
        let ms = request
            .timeout
            .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        TransportError::Timeout(ms)
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        self.exchange(request).boxed_local()
    }
}
