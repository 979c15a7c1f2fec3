//! Resource endpoints and their URL paths.

use std::fmt;

use url::Url;

use crate::config::BaseUrl;

/// A remote collection, or one item in it when an id is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Person(Option<u32>),
    Planet(Option<u32>),
    Vehicle(Option<u32>),
}

impl Endpoint {
    /// Path relative to the base URL.
    ///
    /// The starship collection has no trailing slash while every other path
    /// does. Kept as-is to match the paths callers already depend on.
    pub fn path(&self) -> String {
        match *self {
            Endpoint::Person(Some(id)) => format!("people/{id}/"),
            Endpoint::Person(None) => "people/".to_string(),
            Endpoint::Planet(Some(id)) => format!("planets/{id}/"),
            Endpoint::Planet(None) => "planets/".to_string(),
            Endpoint::Vehicle(Some(id)) => format!("starships/{id}/"),
            Endpoint::Vehicle(None) => "starships".to_string(),
        }
    }

    pub fn url_for(&self, base: &BaseUrl) -> Url {
        base.join_path(&self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
