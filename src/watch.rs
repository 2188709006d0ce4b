//! Namespace-scoped watch factory, the shared-informer analog.
//!
//! Streams are built with [`watcher::Config::default()`]: the view is kept
//! current purely from watch events, with no periodic full resync.

use futures::Stream;
use k8s_openapi::api::core::v1::Pod;
use kube::api::Api;
use kube::runtime::reflector::Store;
use kube::runtime::{reflector, watcher};

/// Produces watch streams and cached views of pods in one namespace.
///
/// The factory holds no watch state itself; streams own their connection
/// and the client library handles reconnection and relisting.
pub struct WatchFactory {
    client: kube::Client,
    namespace: String,
}

impl WatchFactory {
    pub(crate) fn new(client: kube::Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// The namespace this factory is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn api(&self) -> Api<Pod> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    /// A raw watch stream of pod events, beginning with an initial list.
    pub fn pods(&self) -> impl Stream<Item = Result<watcher::Event<Pod>, watcher::Error>> {
        watcher(self.api(), watcher::Config::default())
    }

    /// An eventually-consistent local cache of the namespace's pods.
    ///
    /// The cache fills as the returned stream is driven; callers must poll
    /// the stream (or spawn it) for the [`Store`] to stay current.
    pub fn pod_store(
        &self,
    ) -> (
        Store<Pod>,
        impl Stream<Item = Result<watcher::Event<Pod>, watcher::Error>>,
    ) {
        let (reader, writer) = reflector::store();
        let stream = reflector(writer, watcher(self.api(), watcher::Config::default()));
        (reader, stream)
    }
}
