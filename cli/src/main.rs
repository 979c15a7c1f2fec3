//! `swapi`: fetch one resource or collection and print it as JSON.

use std::io;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use swapi_core::{
    ApiError, BaseUrl, ConfigError, Page, Person, Planet, Resource, Resources, Starship,
    TransportError, TypedResourceClient, UreqTransport,
};
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Person,
    Planet,
    Starship,
}

/// `swapi` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "swapi", about = "Fetch a SWAPI resource and print it as JSON", version)]
struct CliArgs {
    /// Resource kind to fetch.
    #[arg(value_enum)]
    kind: Kind,
    /// Item id. Omit to fetch the whole collection.
    id: Option<u32>,
    /// Absolute base URL of the API. Defaults to `SWAPI_BASE_URL`, then
    /// `https://swapi.dev/api/`.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("request failed: {0}")]
    Request(#[from] ApiError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) => 2,
            CliError::Request(_) => 1,
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run(&CliArgs::parse()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "swapi failed");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Resolve the base URL, fetch, and render the result as pretty JSON.
///
/// Configuration is checked before any request is sent.
fn run(args: &CliArgs) -> Result<String, CliError> {
    let base_url = match &args.base_url {
        Some(url) => BaseUrl::parse(url)?,
        None => BaseUrl::from_env()?,
    };
    let client = TypedResourceClient::with_transport(base_url, UreqTransport::new());

    let json = match (args.kind, args.id) {
        (Kind::Person, Some(id)) => fetch::<Person>(&client, Some(id)),
        (Kind::Person, None) => fetch::<Page<Person>>(&client, None),
        (Kind::Planet, Some(id)) => fetch::<Planet>(&client, Some(id)),
        (Kind::Planet, None) => fetch::<Page<Planet>>(&client, None),
        (Kind::Starship, Some(id)) => fetch::<Starship>(&client, Some(id)),
        (Kind::Starship, None) => fetch::<Page<Starship>>(&client, None),
    }?;
    Ok(json)
}

/// Load `T` and wait for the completion on the calling thread.
fn fetch<T: Resource + Serialize>(
    client: &TypedResourceClient,
    id: Option<u32>,
) -> Result<String, ApiError> {
    let resources = Resources::<T>::new(T::endpoint(id));
    let (tx, rx) = mpsc::channel();
    resources.load(client, move |result| {
        // The receiver only goes away if main has already returned.
        let _ = tx.send(result);
    });
    let value = rx.recv().map_err(|_| TransportError::NoResponse)??;
    serde_json::to_string_pretty(&value).map_err(ApiError::Serialization)
}
