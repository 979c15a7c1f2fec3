//! Turning raw results into typed ones.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode the bytes of a successful result into `T`. Failures pass through.
pub fn decode<T: DeserializeOwned>(result: Result<Vec<u8>, ApiError>) -> Result<T, ApiError> {
    let bytes = result?;
    serde_json::from_slice(&bytes).map_err(ApiError::Decode)
}

/// Call-site decoding for raw results: `result.decoded::<Person>()`.
pub trait Decoded {
    fn decoded<T: DeserializeOwned>(self) -> Result<T, ApiError>;
}

impl Decoded for Result<Vec<u8>, ApiError> {
    fn decoded<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        decode(self)
    }
}
