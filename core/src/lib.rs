//! Typed client core for a SWAPI-style REST service.
//!
//! # Overview
//! Resolves an `Endpoint` against a validated `BaseUrl`, sends one request
//! through an `HttpClient`, and delivers either a decoded value or an
//! `ApiError` to a single-shot completion.
//!
//! # Design
//! - `HttpClient` is the only seam to the network. `UreqTransport` is the
//!   default; tests plug in their own.
//! - Calls never block the caller: the transport runs the exchange and
//!   invokes the completion later, exactly once.
//! - Two calling styles share the same path: `fetch_raw` + `Decoded` at the
//!   call site, or `fetch` / `Resources<T>` which decode internally.
//! - No retries, timeouts, caching or cancellation. Callers wanting those
//!   wrap `HttpClient`.
//! - Shapes are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{Resources, TypedResourceClient};
pub use config::{BaseUrl, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use decode::{decode, Decoded};
pub use endpoint::Endpoint;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{Completion, HttpClient, HttpMethod, HttpRequest, TransportOutcome};
pub use transport::UreqTransport;
pub use types::{Page, Person, Planet, Resource, Starship};
