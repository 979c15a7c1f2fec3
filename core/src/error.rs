//! Error types for the SWAPI client.
//!
//! # Design
//! Request-time failures (`TransportError`, decode and serialization errors)
//! are values of `ApiError` and always reach the caller through a completion.
//! `ConfigError` is separate: it only comes out of constructors, because a
//! malformed base URL is a deployment mistake rather than something a single
//! request can recover from.

use thiserror::Error;

/// Errors delivered to request completions.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not complete the exchange.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The response bytes did not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Failures reported by an `HttpClient` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The underlying HTTP stack reported an error.
    #[error("{0}")]
    Request(String),

    /// The exchange finished with neither a body nor an error.
    #[error("no response body and no error")]
    NoResponse,
}

/// Invalid base URL. Returned from construction only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {input:?}: {source}")]
    InvalidBaseUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url {0:?} cannot be used as a base")]
    CannotBeABase(String),

    #[error("base url {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}
