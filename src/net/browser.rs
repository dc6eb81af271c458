//! `fetch`-based transport for the WASM build.
//!
//! Same-origin requests carry the session cookie automatically, so cookie
//! mode needs nothing beyond a plain `gloo-net` request.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;

use super::http::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::error::TransportError;

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

async fn fetch(request: ApiRequest) -> Result<ApiResponse, TransportError> {
    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let built = match &request.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

    let resp = built.send().await.map_err(|e| TransportError::Network(e.to_string()))?;
    let status = resp.status();
    // A body that cannot be read still leaves a usable status.
    let body = resp.text().await.unwrap_or_default();
    Ok(ApiResponse { status, body })
}

impl HttpTransport for GlooTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        fetch(request).boxed_local()
    }
}
