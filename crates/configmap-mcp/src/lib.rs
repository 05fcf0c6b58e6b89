pub mod config;
pub mod kubernetes;
pub mod metrics;
pub mod operator;
pub mod params;
pub mod server;
pub mod tools;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Status message returned by the Kubernetes API server, rendered as-is.
    #[error("{0}")]
    Api(String),
    #[error("Kubernetes error: {0}")]
    Kubernetes(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<kube::Error> for Error {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) => Error::Api(response.message),
            other => Error::Kubernetes(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
