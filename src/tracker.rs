use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::FakeError;
use crate::utils::{ensure_metadata, extract_metadata};

type PodsByName = HashMap<String, Value>;
type PodsByNamespace = HashMap<String, PodsByName>;

/// In-memory pod store backing the fake API server.
///
/// Shared-ownership with interior locking so the mock service can be
/// cloned per request; a poisoned lock is unrecoverable for a test
/// backend, hence the unwraps.
pub struct PodTracker {
    pods: Arc<RwLock<PodsByNamespace>>,
}

impl PodTracker {
    pub fn new() -> Self {
        Self {
            pods: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a pod, applying server-style metadata defaults. The name is
    /// required; the namespace defaults to `default`.
    pub fn add(&self, mut pod: Value) -> Result<Value, FakeError> {
        let mut meta = extract_metadata(&pod)?;

        let name = meta
            .name
            .clone()
            .ok_or_else(|| FakeError::InvalidRequest("pod name is required".to_string()))?;
        let namespace = meta
            .namespace
            .clone()
            .unwrap_or_else(|| "default".to_string());

        ensure_metadata(&mut meta, &namespace);
        pod["metadata"] = serde_json::to_value(&meta)?;

        if pod.get("apiVersion").is_none() {
            pod["apiVersion"] = Value::from("v1");
        }
        if pod.get("kind").is_none() {
            pod["kind"] = Value::from("Pod");
        }

        let mut pods = self.pods.write().unwrap();
        let ns_pods = pods.entry(namespace.clone()).or_default();
        if ns_pods.contains_key(&name) {
            return Err(FakeError::AlreadyExists { name, namespace });
        }
        ns_pods.insert(name.clone(), pod.clone());

        debug!("added pod {}/{}", namespace, name);
        Ok(pod)
    }

    pub fn get(&self, namespace: &str, name: &str) -> Result<Value, FakeError> {
        trace!("getting pod {}/{}", namespace, name);

        let pods = self.pods.read().unwrap();
        pods.get(namespace)
            .and_then(|ns_pods| ns_pods.get(name))
            .cloned()
            .ok_or_else(|| FakeError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
    }

    /// All pods in a namespace, name-sorted for deterministic lists.
    /// An unknown namespace is an empty list, matching upstream semantics.
    pub fn list(&self, namespace: &str) -> Vec<Value> {
        trace!("listing pods in {}", namespace);

        let pods = self.pods.read().unwrap();
        let mut items: Vec<(String, Value)> = pods
            .get(namespace)
            .map(|ns_pods| {
                ns_pods
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        items.sort_by(|a, b| a.0.cmp(&b.0));
        items.into_iter().map(|(_, value)| value).collect()
    }

    /// Remove a pod, returning the removed object.
    pub fn delete(&self, namespace: &str, name: &str) -> Result<Value, FakeError> {
        trace!("deleting pod {}/{}", namespace, name);

        let mut pods = self.pods.write().unwrap();
        let removed = pods
            .get_mut(namespace)
            .and_then(|ns_pods| ns_pods.remove(name))
            .ok_or_else(|| FakeError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })?;

        debug!("deleted pod {}/{}", namespace, name);
        Ok(removed)
    }
}

impl Default for PodTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PodTracker {
    fn clone(&self) -> Self {
        Self {
            pods: Arc::clone(&self.pods),
        }
    }
}
