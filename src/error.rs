use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to resolve or parse a connection configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to load kubeconfig from {path}: {source}")]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("in-cluster configuration unavailable: {0}")]
    InCluster(#[from] kube::config::InClusterError),
}

/// Adapter error taxonomy. Errors are surfaced verbatim; this layer
/// performs no retry or masking of upstream failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cluster configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build cluster connection: {0}")]
    Connection(#[source] kube::Error),

    #[error("cluster API request failed: {0}")]
    Upstream(#[from] kube::Error),
}

/// Errors produced by the in-memory fake API server.
///
/// Each variant maps to the HTTP status code a real API server would
/// return, so errors injected through the fake reach the adapter as
/// ordinary `kube::Error::Api` responses.
#[derive(Debug, Error)]
pub enum FakeError {
    #[error("pods \"{name}\" not found in namespace {namespace}")]
    NotFound { name: String, namespace: String },

    #[error("pods \"{name}\" already exists in namespace {namespace}")]
    AlreadyExists { name: String, namespace: String },

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FakeError {
    /// HTTP status code and machine-readable reason for the Status body.
    pub(crate) fn status(&self) -> (u16, &'static str) {
        match self {
            FakeError::NotFound { .. } => (404, "NotFound"),
            FakeError::AlreadyExists { .. } => (409, "AlreadyExists"),
            FakeError::Forbidden(_) => (403, "Forbidden"),
            FakeError::InvalidRequest(_) => (422, "Invalid"),
            FakeError::Serialization(_) => (500, "InternalError"),
        }
    }
}
