//! HTTP request data and the client capability.
//!
//! # Design
//! `HttpRequest` describes a request as plain data. An `HttpClient` receives
//! it together with a single-shot completion, dispatches it, and returns
//! immediately; the completion runs later on whatever thread the
//! implementation picks. `Completion` is `FnOnce`, so a result is delivered
//! at most once by construction. Implementations must also make sure it is
//! delivered at least once.
//!
//! `TransportOutcome` is the raw `(data, error)` pair a transport ends up
//! with. Converting it is the one place the tie-break lives.

use url::Url;

use crate::error::{ApiError, TransportError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Turn this request into a POST carrying `body`.
    ///
    /// The method is forced to `Post` and any existing body is replaced,
    /// whatever the request was configured with before.
    pub fn into_post(mut self, body: Vec<u8>) -> Self {
        self.method = HttpMethod::Post;
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Single-shot receiver of a request's raw result.
pub type Completion = Box<dyn FnOnce(Result<Vec<u8>, ApiError>) + Send + 'static>;

/// What a transport observed at the end of one exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOutcome {
    pub data: Option<Vec<u8>>,
    pub error: Option<TransportError>,
}

impl TransportOutcome {
    pub fn data(data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: TransportError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Data wins whenever it is present, even alongside an error.
    /// With neither, the result is `TransportError::NoResponse`.
    pub fn into_result(self) -> Result<Vec<u8>, ApiError> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(ApiError::Transport(error)),
            (None, None) => Err(ApiError::Transport(TransportError::NoResponse)),
        }
    }
}

/// Capability to execute requests asynchronously.
///
/// Only `send` is required; `get` and `post` are provided on top of it.
/// Implementations perform exactly one outbound call per invocation and do
/// not retry.
pub trait HttpClient {
    fn send(&self, request: HttpRequest, completion: Completion);

    fn get(&self, url: Url, completion: Completion) {
        self.send(HttpRequest::get(url), completion);
    }

    fn post(&self, request: HttpRequest, body: Vec<u8>, completion: Completion) {
        self.send(request.into_post(body), completion);
    }
}
