use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

use crate::{AppSvcError, Result};

/// One outgoing call, built fresh for every `execute`.
#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Overrides the connect share of this call's per-attempt ceiling.
    /// The dialer itself always uses the client's connect budget.
    pub connect_timeout: Option<Duration>,
    /// Overrides the body read budget and the read share of the per-attempt
    /// ceiling. Socket reads are still bounded by the client's read budget.
    pub read_timeout: Option<Duration>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            connect_timeout: None,
            read_timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Builds a request with a JSON payload and `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(
        method: Method,
        url: impl Into<String>,
        payload: &T,
    ) -> Result<Self> {
        let body = serde_json::to_vec(payload)
            .map_err(|err| AppSvcError::InvalidRequest(format!("payload is not JSON: {err}")))?;
        Ok(Self::new(method, url).with_json_content_type().with_body(body))
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_json_content_type(self) -> Self {
        self.with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = Some(connect);
        self.read_timeout = Some(read);
        self
    }
}

/// A response returned verbatim by the transport, whatever its status.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
    /// Attempts it took to obtain this response.
    pub attempts: u32,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
