//! A thin cluster client adapter for pod operations.
//!
//! Exposes three operations behind the [`ClusterClient`] capability trait:
//! listing pods in a namespace, deleting a pod, and constructing a
//! namespace-scoped watch factory. Connection setup transparently selects
//! in-cluster service-account credentials or a local kubeconfig, and every
//! operation is a direct delegation to the `kube` client stack.
//!
//! # Examples
//!
//! ## Against a live cluster
//!
//! ```rust,no_run
//! use kube_cluster_client::{ClusterClient, KubeClusterClient, PodRef};
//! use kube::api::ListParams;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = KubeClusterClient::connect().await?;
//!
//! let pods = client.list_pods("default", &ListParams::default()).await?;
//! for pod in &pods.items {
//!     println!("{:?}", pod.metadata.name);
//! }
//!
//! client.delete_pod(&PodRef::new("default", "web-0")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Against the in-memory fake
//!
//! ```rust
//! use kube_cluster_client::{ClusterClient, FakeClusterBuilder, KubeClusterClient};
//! use k8s_openapi::api::core::v1::Pod;
//! use kube::api::ListParams;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pod = Pod::default();
//! pod.metadata.name = Some("web-0".to_string());
//! pod.metadata.namespace = Some("default".to_string());
//!
//! let fake = FakeClusterBuilder::new().with_pod(pod).build()?;
//! let client = KubeClusterClient::from_client(fake);
//!
//! let pods = client.list_pods("default", &ListParams::default()).await?;
//! assert_eq!(pods.items.len(), 1);
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod config;
mod error;
pub mod interceptor;
mod mock_service;
mod tracker;
mod utils;
mod watch;

#[cfg(test)]
mod mock_service_test;
#[cfg(test)]
mod utils_test;

pub use builder::FakeClusterBuilder;
pub use client::{ClusterClient, KubeClusterClient, PodRef};
pub use config::{ConnectionMode, IN_CLUSTER_ENV, KUBECONFIG_ENV};
pub use error::{ConfigError, Error, FakeError, Result};
pub use watch::WatchFactory;
