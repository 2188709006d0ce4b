//! Builder for fake cluster backends.

use k8s_openapi::api::core::v1::Pod;

use crate::error::FakeError;
use crate::interceptor;
use crate::mock_service::MockService;
use crate::tracker::PodTracker;

/// Builds a `kube::Client` backed by an in-memory pod store instead of a
/// live API server, so adapter code paths can be exercised in tests.
///
/// # Example
///
/// ```rust
/// use kube_cluster_client::FakeClusterBuilder;
/// use k8s_openapi::api::core::v1::Pod;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut pod = Pod::default();
/// pod.metadata.name = Some("web-0".to_string());
/// pod.metadata.namespace = Some("default".to_string());
///
/// let client = FakeClusterBuilder::new().with_pod(pod).build().unwrap();
/// # });
/// ```
#[derive(Default)]
pub struct FakeClusterBuilder {
    pods: Vec<Pod>,
    interceptors: Option<interceptor::Funcs>,
}

impl FakeClusterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pod into the fake cluster.
    pub fn with_pod(mut self, pod: Pod) -> Self {
        self.pods.push(pod);
        self
    }

    /// Seed multiple pods.
    pub fn with_pods(mut self, pods: Vec<Pod>) -> Self {
        self.pods.extend(pods);
        self
    }

    /// Install interceptors for overriding list/delete behavior.
    pub fn with_interceptors(mut self, funcs: interceptor::Funcs) -> Self {
        self.interceptors = Some(funcs);
        self
    }

    /// Build the fake-backed `kube::Client`.
    ///
    /// # Errors
    ///
    /// Returns an error when a seeded pod is invalid (unnamed, a
    /// duplicate, or unserializable); seeds are never silently dropped.
    pub fn build(self) -> Result<kube::Client, FakeError> {
        let tracker = PodTracker::new();
        for pod in self.pods {
            tracker.add(serde_json::to_value(&pod)?)?;
        }

        let service = MockService::new(tracker, self.interceptors);
        Ok(kube::Client::new(service, "default"))
    }
}
