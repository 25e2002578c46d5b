//! Authenticated request construction and execution.
//!
//! # Design
//! `Client` holds the base URL, credentials and a transport, and carries no
//! mutable state between calls. Each call is split into `build_request`,
//! which produces a plain `HttpRequest`, and `execute`, which sends it once
//! and decodes the body. Resource-specific paths and payloads live in the
//! services returned by `blocks()` and `templates()`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;

use crate::blocks::Blocks;
use crate::config::{ClientConfig, Credentials};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport};
use crate::resource::Service;
use crate::templates::Templates;

const ACCEPT: &str = "application/json; charset=utf-8";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous client for the Box Panel API.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    config: ClientConfig,
    credentials: Credentials,
    transport: T,
}

impl Client<UreqTransport> {
    /// Client for the default host.
    pub fn new(customer_id: &str, api_key: &str) -> Self {
        Self::with_config(ClientConfig::default(), Credentials::new(customer_id, api_key))
    }

    pub fn with_config(config: ClientConfig, credentials: Credentials) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, credentials, transport)
    }
}

impl<T: HttpTransport> Client<T> {
    pub fn with_transport(mut config: ClientConfig, credentials: Credentials, transport: T) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            credentials,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn blocks(&self) -> Service<'_, Blocks, T> {
        Service::new(self)
    }

    pub fn templates(&self) -> Service<'_, Templates, T> {
        Service::new(self)
    }

    /// Resolves a logical path such as `/blocks/abc` to
    /// `{base_url}/api/blocks/abc.json`.
    pub fn url_for_path(&self, path: &str) -> Result<String> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidUrl(format!(
                "path must start with '/': {path:?}"
            )));
        }
        let url = format!("{}/api{path}.json", self.config.base_url);
        let uri = ureq::http::Uri::try_from(url.as_str())
            .map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(ApiError::InvalidUrl(format!("{url}: missing scheme or host")));
        }
        Ok(url)
    }

    /// Builds an authenticated request. `body` is an already encoded form.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpRequest> {
        let url = self.url_for_path(path)?;

        let mut headers = Vec::with_capacity(4);
        if method.carries_form() {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
        }
        headers.push(("Authorization".to_string(), self.basic_auth()));
        headers.push(("Accept".to_string(), ACCEPT.to_string()));
        headers.push(("User-Agent".to_string(), self.config.user_agent.clone()));

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Sends `request` once and decodes a 2xx body into `R`.
    pub fn execute<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R> {
        let response = self.send(request)?;
        tracing::trace!(bytes = response.body.len(), "Decoding response body");
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Sends `request` once; success is decided by the status code alone.
    pub fn execute_empty(&self, request: &HttpRequest) -> Result<()> {
        self.send(request).map(|_| ())
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.send(request)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "Received response"
        );
        check_status(response)
    }

    fn basic_auth(&self) -> String {
        let pair = format!("{}:{}", self.credentials.customer_id, self.credentials.api_key);
        format!("Basic {}", STANDARD.encode(pair))
    }
}

/// Any status outside [200, 300) is an error; the body is discarded.
fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status,
        })
    }
}
