//! The cluster client adapter: a capability trait plus the real,
//! `kube`-backed implementation.

use std::fmt;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams, ObjectList};
use tracing::debug;

use crate::config::{self, ConnectionMode};
use crate::error::{Error, Result};
use crate::watch::WatchFactory;

/// A namespace + name pair identifying a pod. The adapter holds no pod
/// state; references are supplied by the caller per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRef {
    pub namespace: String,
    pub name: String,
}

impl PodRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl From<&Pod> for PodRef {
    fn from(pod: &Pod) -> Self {
        Self {
            namespace: pod
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| "default".to_string()),
            name: pod.metadata.name.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Capability interface over the cluster API.
///
/// Calling code should depend on this trait rather than on
/// [`KubeClusterClient`] so it can be exercised against a substitute
/// implementation without a live cluster. Every operation is a transparent
/// delegation; no retry, timeout, or masking happens at this layer.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List pods in a namespace, forwarding `params` unmodified.
    async fn list_pods(&self, namespace: &str, params: &ListParams) -> Result<ObjectList<Pod>>;

    /// Delete the referenced pod with default delete options.
    async fn delete_pod(&self, pod: &PodRef) -> Result<()>;

    /// Build a watch factory scoped to `namespace`, with no periodic resync.
    fn watch_factory(&self, namespace: &str) -> Result<WatchFactory>;
}

/// The real adapter. Holds one [`kube::Client`] built at construction and
/// never mutated afterwards; `kube::Client` is internally synchronized, so
/// independent calls run concurrently without adapter-level locks.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: kube::Client,
}

impl KubeClusterClient {
    /// Connect to the cluster, selecting in-cluster or kubeconfig mode from
    /// the environment.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when neither path yields a valid configuration,
    /// [`Error::Connection`] when the handle cannot be built from it.
    pub async fn connect() -> Result<Self> {
        let mode = ConnectionMode::detect();
        debug!(?mode, "resolving cluster configuration");
        let config = config::load(&mode).await?;
        let client = kube::Client::try_from(config).map_err(Error::Connection)?;
        debug!("cluster connection established");
        Ok(Self { client })
    }

    /// Wrap an existing handle, e.g. one backed by the in-memory fake.
    pub fn from_client(client: kube::Client) -> Self {
        Self { client }
    }

    /// A clone of the underlying handle, for callers needing APIs beyond
    /// this adapter's surface.
    pub fn kube_client(&self) -> kube::Client {
        self.client.clone()
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn list_pods(&self, namespace: &str, params: &ListParams) -> Result<ObjectList<Pod>> {
        Ok(self.pods(namespace).list(params).await?)
    }

    async fn delete_pod(&self, pod: &PodRef) -> Result<()> {
        self.pods(&pod.namespace)
            .delete(&pod.name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    fn watch_factory(&self, namespace: &str) -> Result<WatchFactory> {
        Ok(WatchFactory::new(self.client.clone(), namespace))
    }
}
