//! Resource shapes returned by the API.
//!
//! # Design
//! Every shape rejects unknown fields, so a body with extra or missing fields
//! is a decode failure rather than a partially filled value. The mock-server
//! crate defines its own copies of these records; the integration tests catch
//! drift between the two.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// A shape that can be fetched from one endpoint family.
pub trait Resource: DeserializeOwned + Send + 'static {
    fn endpoint(id: Option<u32>) -> Endpoint;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub diameter: String,
    pub population: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
}

/// Envelope returned by the collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Page<T> {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl Resource for Person {
    fn endpoint(id: Option<u32>) -> Endpoint {
        Endpoint::Person(id)
    }
}

impl Resource for Planet {
    fn endpoint(id: Option<u32>) -> Endpoint {
        Endpoint::Planet(id)
    }
}

impl Resource for Starship {
    fn endpoint(id: Option<u32>) -> Endpoint {
        Endpoint::Vehicle(id)
    }
}

/// A page of `T` comes from the unidentified endpoint of `T`. Pages have no
/// id, so any id passed in is ignored: `Resources::<Page<Person>>::item(3)`
/// still targets `people/`.
impl<T: Resource> Resource for Page<T> {
    fn endpoint(_id: Option<u32>) -> Endpoint {
        T::endpoint(None)
    }
}
