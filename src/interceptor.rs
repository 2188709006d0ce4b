//! Interceptors for customizing the fake cluster's behavior during tests.
//!
//! Hooks cover the two verbs the adapter exposes. Return `Ok(Some(value))`
//! to override the tracker's answer, `Ok(None)` to continue with the
//! default behavior, or `Err(e)` to inject an upstream failure.
//!
//! # Example
//! ```
//! use kube_cluster_client::interceptor;
//! use kube_cluster_client::FakeError;
//!
//! let funcs = interceptor::Funcs::new().delete(|ctx| {
//!     Err(FakeError::Forbidden(format!(
//!         "pods \"{}\" is forbidden",
//!         ctx.name
//!     )))
//! });
//! ```

use std::sync::Arc;

use kube::api::ListParams;
use serde_json::Value;

use crate::error::FakeError;

/// Interceptor functions for fake cluster operations.
#[derive(Default, Clone)]
pub struct Funcs {
    pub(crate) list: Option<ListInterceptor>,
    pub(crate) delete: Option<DeleteInterceptor>,
}

/// Context passed to list interceptors.
pub struct ListContext<'a> {
    /// Namespace being listed.
    pub namespace: &'a str,
    /// List options as parsed from the request.
    pub params: &'a ListParams,
}

/// Context passed to delete interceptors.
pub struct DeleteContext<'a> {
    /// Namespace of the pod.
    pub namespace: &'a str,
    /// Name of the pod.
    pub name: &'a str,
}

pub type ListInterceptor =
    Arc<dyn Fn(ListContext) -> Result<Option<Vec<Value>>, FakeError> + Send + Sync>;

pub type DeleteInterceptor =
    Arc<dyn Fn(DeleteContext) -> Result<Option<Value>, FakeError> + Send + Sync>;

impl Funcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intercept list operations.
    pub fn list<F>(mut self, f: F) -> Self
    where
        F: Fn(ListContext) -> Result<Option<Vec<Value>>, FakeError> + Send + Sync + 'static,
    {
        self.list = Some(Arc::new(f));
        self
    }

    /// Intercept delete operations.
    pub fn delete<F>(mut self, f: F) -> Self
    where
        F: Fn(DeleteContext) -> Result<Option<Value>, FakeError> + Send + Sync + 'static,
    {
        self.delete = Some(Arc::new(f));
        self
    }
}
