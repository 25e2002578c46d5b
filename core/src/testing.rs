//! Test transport shared by the unit tests.

use std::cell::RefCell;

use crate::config::{ClientConfig, Credentials};
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::Client;

pub(crate) const BASE_URL: &str = "http://localhost:3000";

/// base64("customer:secret")
pub(crate) const AUTHORIZATION: &str = "Basic Y3VzdG9tZXI6c2VjcmV0";

/// Answers every request with one canned response and keeps what it saw.
pub(crate) struct RecordingTransport {
    status: u16,
    body: Vec<u8>,
    seen: RefCell<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.seen.borrow().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.seen.borrow().last().cloned().expect("no request was sent")
    }
}

impl HttpTransport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.seen.borrow_mut().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Client for `BASE_URL` as customer/secret answering with `status`/`body`.
pub(crate) fn client(status: u16, body: impl Into<Vec<u8>>) -> Client<RecordingTransport> {
    Client::with_transport(
        ClientConfig::default().with_base_url(BASE_URL),
        Credentials::new("customer", "secret"),
        RecordingTransport::new(status, body),
    )
}
