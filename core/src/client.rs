//! Typed resource client and the per-shape `Resources` wrapper.
//!
//! # Design
//! `TypedResourceClient` holds only a validated `BaseUrl` and a transport.
//! Each call builds one `HttpRequest`, hands it to the transport with a
//! completion, and returns. Typed calls wrap the caller's completion so the
//! raw bytes go through `decode` before delivery. `Resources<T>` is sugar
//! over `fetch` and carries no logic of its own.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::config::BaseUrl;
use crate::decode::decode;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpClient, HttpRequest};
use crate::transport::UreqTransport;
use crate::types::Resource;

#[derive(Debug, Clone)]
pub struct TypedResourceClient<C = UreqTransport> {
    base_url: BaseUrl,
    transport: C,
}

impl TypedResourceClient<UreqTransport> {
    /// Client on the default `ureq` transport.
    ///
    /// Fails only when `base_url` is not a usable absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_transport(BaseUrl::parse(base_url)?, UreqTransport::new()))
    }
}

impl<C: HttpClient> TypedResourceClient<C> {
    pub fn with_transport(base_url: BaseUrl, transport: C) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        endpoint.url_for(&self.base_url)
    }

    /// GET `endpoint` and deliver the raw body.
    pub fn fetch_raw<F>(&self, endpoint: Endpoint, completion: F)
    where
        F: FnOnce(Result<Vec<u8>, ApiError>) + Send + 'static,
    {
        self.transport.get(self.url_for(&endpoint), Box::new(completion));
    }

    /// GET `endpoint` and deliver the body decoded as `T`.
    pub fn fetch<T, F>(&self, endpoint: Endpoint, completion: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        self.fetch_raw(endpoint, move |raw| completion(decode(raw)));
    }

    /// POST `body` to `endpoint` and deliver the raw reply.
    pub fn post<F>(&self, endpoint: Endpoint, body: Vec<u8>, completion: F)
    where
        F: FnOnce(Result<Vec<u8>, ApiError>) + Send + 'static,
    {
        let request = HttpRequest::get(self.url_for(&endpoint));
        self.transport.post(request, body, Box::new(completion));
    }

    /// POST `body` as JSON and deliver the reply decoded as `T`.
    ///
    /// Serialization happens before dispatch; if it fails, the error is
    /// returned here and the completion is never called.
    pub fn post_json<B, T, F>(
        &self,
        endpoint: Endpoint,
        body: &B,
        completion: F,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        let bytes = serde_json::to_vec(body).map_err(ApiError::Serialization)?;
        let request = HttpRequest::get(self.url_for(&endpoint))
            .with_header("content-type", "application/json");
        self.transport
            .post(request, bytes, Box::new(move |raw| completion(decode(raw))));
        Ok(())
    }
}

/// A typed handle on one endpoint: `Resources::<Person>::item(1)`.
pub struct Resources<T> {
    endpoint: Endpoint,
    _shape: PhantomData<fn() -> T>,
}

impl<T: Resource> Resources<T> {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            _shape: PhantomData,
        }
    }

    pub fn item(id: u32) -> Self {
        Self::new(T::endpoint(Some(id)))
    }

    pub fn collection() -> Self {
        Self::new(T::endpoint(None))
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Fetch and forward the typed result.
    pub fn load<C, F>(&self, client: &TypedResourceClient<C>, completion: F)
    where
        C: HttpClient,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        client.fetch(self.endpoint, completion);
    }
}

impl<T: Resource + fmt::Debug> Resources<T> {
    /// Fetch, log the outcome, and drop it.
    pub fn load_logged<C: HttpClient>(&self, client: &TypedResourceClient<C>) {
        let endpoint = self.endpoint;
        self.load(client, move |result| match result {
            Ok(value) => info!(%endpoint, ?value, "resource loaded"),
            Err(error) => warn!(%endpoint, %error, "resource load failed"),
        });
    }
}

impl<T> Clone for Resources<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint,
            _shape: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Resources<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("endpoint", &self.endpoint)
            .field("shape", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::TransportError;
    use crate::http::{Completion, HttpMethod, TransportOutcome};
    use crate::types::{Page, Person, Planet, Starship};

    const LUKE: &str = r#"{"name":"Luke Skywalker","height":"172","mass":"77","gender":"male"}"#;

    /// Records requests and answers each one synchronously with `outcome`.
    #[derive(Clone)]
    struct Canned {
        sent: Arc<Mutex<Vec<HttpRequest>>>,
        outcome: TransportOutcome,
    }

    impl Canned {
        fn new(outcome: TransportOutcome) -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                outcome,
            }
        }

        fn body(body: &str) -> Self {
            Self::new(TransportOutcome::data(body.as_bytes().to_vec()))
        }

        fn last(&self) -> HttpRequest {
            self.sent.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl HttpClient for Canned {
        fn send(&self, request: HttpRequest, completion: Completion) {
            self.sent.lock().unwrap().push(request);
            completion(self.outcome.clone().into_result());
        }
    }

    fn client(transport: Canned) -> TypedResourceClient<Canned> {
        let base = BaseUrl::parse("https://api.example/").unwrap();
        TypedResourceClient::with_transport(base, transport)
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        assert!(matches!(
            TypedResourceClient::new("not a url").unwrap_err(),
            ConfigError::InvalidBaseUrl { .. }
        ));
    }

    #[test]
    fn new_accepts_valid_base_url() {
        let client = TypedResourceClient::new("https://swapi.dev/api").unwrap();
        assert_eq!(client.base_url().to_string(), "https://swapi.dev/api/");
    }

    #[test]
    fn fetch_decodes_person() {
        let transport = Canned::body(LUKE);
        let (tx, rx) = mpsc::channel();
        client(transport.clone()).fetch(Endpoint::Person(Some(1)), move |r: Result<Person, _>| {
            tx.send(r).unwrap();
        });

        let person = rx.recv().unwrap().unwrap();
        assert_eq!(person.name, "Luke Skywalker");
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url.as_str(), "https://api.example/people/1/");
    }

    #[test]
    fn fetch_raw_delivers_bytes_untouched() {
        let (tx, rx) = mpsc::channel();
        client(Canned::body("not json")).fetch_raw(Endpoint::Planet(None), move |r| {
            tx.send(r).unwrap();
        });
        assert_eq!(rx.recv().unwrap().unwrap(), b"not json");
    }

    #[test]
    fn fetch_surfaces_decode_error() {
        let (tx, rx) = mpsc::channel();
        client(Canned::body(r#"{"detail":"Not found"}"#))
            .fetch(Endpoint::Planet(Some(99)), move |r: Result<Planet, _>| tx.send(r).unwrap());
        assert!(matches!(rx.recv().unwrap(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn fetch_surfaces_transport_error() {
        let transport = Canned::new(TransportOutcome::error(TransportError::Request(
            "connection refused".to_string(),
        )));
        let (tx, rx) = mpsc::channel();
        client(transport).fetch(Endpoint::Person(Some(1)), move |r: Result<Person, _>| {
            tx.send(r).unwrap();
        });
        assert!(matches!(rx.recv().unwrap(), Err(ApiError::Transport(_))));
    }

    #[test]
    fn completion_runs_exactly_once() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        client(Canned::body(LUKE)).fetch(Endpoint::Person(Some(1)), move |_: Result<Person, _>| {
            *counter.lock().unwrap() += 1;
        });
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn post_sends_body_to_endpoint() {
        let transport = Canned::body("{}");
        let (tx, rx) = mpsc::channel();
        client(transport.clone()).post(Endpoint::Person(None), b"payload".to_vec(), move |r| {
            tx.send(r).unwrap();
        });

        assert_eq!(rx.recv().unwrap().unwrap(), b"{}");
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url.as_str(), "https://api.example/people/");
        assert_eq!(sent.body.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn post_json_serializes_and_decodes() {
        let transport = Canned::body(LUKE);
        let person: Person = serde_json::from_str(LUKE).unwrap();
        let (tx, rx) = mpsc::channel();
        client(transport.clone())
            .post_json(Endpoint::Person(None), &person, move |r: Result<Person, _>| {
                tx.send(r).unwrap();
            })
            .unwrap();

        assert_eq!(rx.recv().unwrap().unwrap(), person);
        let sent = transport.last();
        assert_eq!(
            sent.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Luke Skywalker");
    }

    #[test]
    fn post_json_serialization_failure_skips_dispatch() {
        use std::collections::HashMap;

        // Non-string map keys cannot be represented in JSON.
        let mut body = HashMap::new();
        body.insert((1, 2), "tuple key");
        let transport = Canned::body("{}");
        let err = client(transport.clone())
            .post_json(Endpoint::Person(None), &body, |_: Result<Person, _>| {
                panic!("completion must not run");
            })
            .unwrap_err();

        assert!(matches!(err, ApiError::Serialization(_)));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn resources_item_targets_shape_endpoint() {
        let transport = Canned::body(
            r#"{"name":"X-wing","model":"T-65 X-wing","manufacturer":"Incom Corporation"}"#,
        );
        let (tx, rx) = mpsc::channel();
        Resources::<Starship>::item(12).load(&client(transport.clone()), move |r| {
            tx.send(r).unwrap();
        });

        assert_eq!(rx.recv().unwrap().unwrap().model, "T-65 X-wing");
        assert_eq!(transport.last().url.as_str(), "https://api.example/starships/12/");
    }

    #[test]
    fn resources_collection_loads_page() {
        let body = format!(r#"{{"count":1,"next":null,"previous":null,"results":[{LUKE}]}}"#);
        let transport = Canned::body(&body);
        let (tx, rx) = mpsc::channel();
        Resources::<Page<Person>>::collection().load(&client(transport.clone()), move |r| {
            tx.send(r).unwrap();
        });

        let page = rx.recv().unwrap().unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(transport.last().url.as_str(), "https://api.example/people/");
    }

    #[test]
    fn page_item_ignores_id() {
        let resources = Resources::<Page<Person>>::item(3);
        assert_eq!(resources.endpoint(), Endpoint::Person(None));
    }

    #[test]
    fn resources_new_uses_given_endpoint() {
        let resources = Resources::<Person>::new(Endpoint::Person(Some(2)));
        assert_eq!(resources.endpoint(), Endpoint::Person(Some(2)));
    }

    #[test]
    fn load_logged_dispatches_once() {
        let transport = Canned::body("garbage");
        Resources::<Planet>::item(1).load_logged(&client(transport.clone()));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }
}
