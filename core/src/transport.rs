//! Default `HttpClient` backed by `ureq`.
//!
//! # Design
//! `ureq` is blocking, so every `send` moves the request onto a fresh worker
//! thread and returns. The completion runs on that thread. The agent is
//! configured with `http_status_as_error(false)`: 4xx/5xx bodies come back as
//! data and status interpretation is left to decoding.

use std::fmt;
use std::thread;

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::http::{Completion, HttpClient, HttpMethod, HttpRequest, TransportOutcome};

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqTransport {
    fn send(&self, request: HttpRequest, completion: Completion) {
        let agent = self.agent.clone();
        debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        thread::spawn(move || {
            let outcome = execute(&agent, &request);
            if let Some(error) = &outcome.error {
                warn!(url = %request.url, %error, "request failed");
            }
            let result = outcome.into_result();
            if let Ok(bytes) = &result {
                debug!(url = %request.url, bytes = bytes.len(), "request completed");
            }
            completion(result);
        });
    }
}

/// Run one blocking exchange and report what happened.
fn execute(agent: &ureq::Agent, request: &HttpRequest) -> TransportOutcome {
    let url = request.url.as_str();
    let sent = match request.method {
        HttpMethod::Get => {
            let mut builder = agent.get(url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match &request.body {
                Some(body) => builder.send(&body[..]),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = match sent {
        Ok(response) => response,
        Err(e) => return TransportOutcome::error(TransportError::Request(e.to_string())),
    };
    debug!(url, status = response.status().as_u16(), "response received");
    match response.body_mut().read_to_vec() {
        Ok(data) => TransportOutcome::data(data),
        Err(e) => TransportOutcome::error(TransportError::Request(e.to_string())),
    }
}
