//! Validated base URL for the API.
//!
//! # Design
//! Validation happens once, in `BaseUrl::parse`. Everything downstream takes a
//! `BaseUrl` by reference, which is what keeps `Endpoint::url_for` total.

use std::env::VarError;
use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// Used when `SWAPI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// Environment variable consulted by `BaseUrl::from_env`.
pub const BASE_URL_ENV: &str = "SWAPI_BASE_URL";

/// An absolute `http`/`https` URL whose path always ends in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(input).map_err(|source| ConfigError::InvalidBaseUrl {
            input: input.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(input.to_string()));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(input.to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self(url))
    }

    /// Read `SWAPI_BASE_URL`, falling back to [`DEFAULT_BASE_URL`] only when
    /// the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_var(std::env::var(BASE_URL_ENV))
    }

    fn from_var(var: Result<String, VarError>) -> Result<Self, ConfigError> {
        match var {
            Ok(value) => Self::parse(&value),
            Err(VarError::NotPresent) => Self::parse(DEFAULT_BASE_URL),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(BASE_URL_ENV)),
        }
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Append `fragment` to the base path. Query and fragment of the base are kept.
    pub(crate) fn join_path(&self, fragment: &str) -> Url {
        let mut url = self.0.clone();
        let path = format!("{}{fragment}", self.0.path());
        url.set_path(&path);
        url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for BaseUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
