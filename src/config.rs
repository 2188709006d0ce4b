//! Connection mode detection and configuration loading.
//!
//! Mirrors the conventional client-go resolution order: absence of the
//! in-cluster service host marker selects kubeconfig mode, where the path
//! is `$KUBECONFIG` if set, else `$HOME/.kube/config`.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::debug;

use crate::error::ConfigError;

/// Set by the kubelet for every pod; its presence marks in-cluster execution.
pub const IN_CLUSTER_ENV: &str = "KUBERNETES_SERVICE_HOST";

/// Explicit kubeconfig path override.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

const HOME_ENV: &str = "HOME";

/// How the adapter authenticates against the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Mounted service-account credentials.
    InCluster,
    /// External kubeconfig file at the given path.
    Kubeconfig(PathBuf),
}

impl ConnectionMode {
    /// Inspect the process environment and pick a connection mode.
    pub fn detect() -> Self {
        Self::resolve(
            env::var_os(IN_CLUSTER_ENV),
            env::var_os(KUBECONFIG_ENV),
            env::var_os(HOME_ENV),
        )
    }

    // Pure over its inputs so tests do not have to mutate process env.
    // Empty values are treated as unset, matching Go's os.Getenv checks.
    fn resolve(
        service_host: Option<OsString>,
        kubeconfig: Option<OsString>,
        home: Option<OsString>,
    ) -> Self {
        if service_host.is_some_and(|v| !v.is_empty()) {
            return ConnectionMode::InCluster;
        }

        let path = match kubeconfig.filter(|v| !v.is_empty()) {
            Some(explicit) => PathBuf::from(explicit),
            None => home
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".kube")
                .join("config"),
        };

        ConnectionMode::Kubeconfig(path)
    }
}

/// Build a client configuration for the given mode.
pub(crate) async fn load(mode: &ConnectionMode) -> std::result::Result<kube::Config, ConfigError> {
    match mode {
        ConnectionMode::InCluster => {
            debug!("loading in-cluster configuration");
            Ok(kube::Config::incluster()?)
        }
        ConnectionMode::Kubeconfig(path) => {
            debug!(path = %path.display(), "loading kubeconfig");
            let kubeconfig =
                Kubeconfig::read_from(path).map_err(|source| ConfigError::Kubeconfig {
                    path: path.clone(),
                    source,
                })?;
            kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|source| ConfigError::Kubeconfig {
                    path: path.clone(),
                    source,
                })
        }
    }
}
